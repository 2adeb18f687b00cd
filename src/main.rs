use anyhow::{Context, Result};
use content_crew::agent::{MistralClient, ModelBackend};
use content_crew::cli::commands::{CompareCommand, TeamCommand, ValidateCommand, WorkflowCommand};
use content_crew::cli::output::*;
use content_crew::cli::{Cli, Command};
use content_crew::core::config::{credential_from_env, load_api_key, CrewConfig};
use content_crew::core::Crew;
use content_crew::execution::{
    compare_concurrently, ContentTeam, ContentWorkflow, LeaderCoordinator,
};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Lines of research and draft shown by `workflow --show-intermediate`
const PREVIEW_LINES: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = CrewConfig::load(cli.config.as_deref()).context("Failed to load crew config")?;

    match cli.command() {
        Command::Compare(cmd) => run_compare(&config, &cmd).await?,
        Command::Team(cmd) => run_team(&config, &cmd).await?,
        Command::Workflow(cmd) => run_workflow(&config, &cmd).await?,
        Command::Validate(cmd) => validate_config(&config, &cmd)?,
    }

    Ok(())
}

/// Resolve the credential and build the shared backend and crew
fn build_crew(config: &CrewConfig) -> Result<(Crew, Arc<dyn ModelBackend>)> {
    Crew::with_credential(config, credential_from_env(), |model| {
        let client = MistralClient::new(model);
        info!("Using model {}", client.model());
        Arc::new(client) as Arc<dyn ModelBackend>
    })
    .context("Failed to build crew")
}

fn workflow_with_console(crew: &Crew) -> ContentWorkflow {
    ContentWorkflow::from_crew(crew).on_event(|event| {
        println!("{}", format_workflow_event(event));
    })
}

async fn run_compare(config: &CrewConfig, cmd: &CompareCommand) -> Result<()> {
    let (crew, backend) = build_crew(config)?;
    let inputs = cmd.run.resolve(&config.defaults);

    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend)));
    let workflow = workflow_with_console(&crew);

    println!(
        "{} Comparing strategies on {} ({} for {})",
        INFO,
        style(&inputs.topic).bold(),
        style(&inputs.content_type).cyan(),
        style(&inputs.audience).cyan()
    );

    let (team_run, workflow_run) = if cmd.concurrent {
        let comparison = compare_concurrently(
            &team,
            &workflow,
            &inputs.topic,
            &inputs.audience,
            &inputs.content_type,
        )
        .await?;
        (comparison.team, comparison.workflow)
    } else {
        let spinner = create_spinner(format!("{} working...", crew.team.name));
        let team_result = team
            .run(&inputs.topic, &inputs.audience, &inputs.content_type)
            .await;
        spinner.finish_and_clear();
        let team_run = team_result.context("Coordinator team failed")?;
        println!("{} {} finished", CHECK, style(&crew.team.name).green());

        let workflow_run = workflow
            .run(&inputs.topic, &inputs.content_type)
            .await
            .context("Workflow failed")?;
        (team_run, workflow_run)
    };

    println!();
    print_comparison(&team_run.content, &workflow_run.final_content);
    Ok(())
}

async fn run_team(config: &CrewConfig, cmd: &TeamCommand) -> Result<()> {
    let (crew, backend) = build_crew(config)?;
    let inputs = cmd.run.resolve(&config.defaults);
    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend)));

    let spinner = create_spinner(format!("{} working...", crew.team.name));
    let result = team
        .run(&inputs.topic, &inputs.audience, &inputs.content_type)
        .await;
    spinner.finish_and_clear();

    let run = result.context("Coordinator team failed")?;
    print_section("Coordinator Result", &run.content);
    Ok(())
}

async fn run_workflow(config: &CrewConfig, cmd: &WorkflowCommand) -> Result<()> {
    let (crew, _backend) = build_crew(config)?;
    let inputs = cmd.resolve(&config.defaults);
    let workflow = workflow_with_console(&crew);

    let run = match workflow.run(&inputs.topic, &inputs.content_type).await {
        Ok(run) => run,
        Err(failure) => {
            error!(
                "Workflow ended in stage {:?} after {} step",
                failure.stage(),
                failure.step
            );
            return Err(failure).context("Workflow failed");
        }
    };

    if cmd.show_intermediate {
        if let Some(research) = run.state.research_findings() {
            print_section("Research Findings", &format_output(research, PREVIEW_LINES));
        }
        if let Some(draft) = run.state.draft_content() {
            print_section("Draft", &format_output(draft, PREVIEW_LINES));
        }
    }
    print_section("Workflow Result", &run.final_content);

    if let Ok(elapsed) = run
        .finished_at
        .signed_duration_since(run.started_at)
        .to_std()
    {
        println!(
            "\n{} Finished in {}",
            INFO,
            style(format!("{}s", elapsed.as_secs())).dim()
        );
    }
    Ok(())
}

fn validate_config(config: &CrewConfig, cmd: &ValidateCommand) -> Result<()> {
    config.validate().context("Crew configuration is invalid")?;

    println!("{} Crew configuration is valid!", CHECK);
    println!("  Model: {}", style(&config.model.id).bold());
    for (key, agent) in config.agents.iter() {
        println!(
            "  {}: {} [{}]",
            style(key).cyan(),
            style(&agent.name).bold(),
            agent.capabilities.join(", ")
        );
    }
    println!(
        "  Team: {} ({} success criteria)",
        style(&config.team.name).bold(),
        config.team.success_criteria.len()
    );

    match load_api_key() {
        Ok(_) => println!("{} Credential found", CHECK),
        Err(e) => println!("{} {}", CROSS, style(e).red()),
    }

    if cmd.json {
        let json = serde_json::to_string_pretty(config)?;
        println!("\n{}", json);
    }
    Ok(())
}
