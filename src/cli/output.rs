//! CLI output formatting

use crate::core::{StepKind, WorkflowStage};
use crate::execution::WorkflowEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static MEMO: Emoji<'_, '_> = Emoji("📝 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");

/// Create a spinner shown while a model call is in flight
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn terminal_width() -> usize {
    term_size::dimensions_stdout()
        .map(|(w, _)| w)
        .unwrap_or(80)
}

/// Horizontal rule with an optional centered title
pub fn rule(title: &str, width: usize) -> String {
    if title.is_empty() {
        return "─".repeat(width);
    }
    let label = format!(" {} ", title);
    let label_width = console::measure_text_width(&label);
    if label_width + 2 > width {
        return label.trim().to_string();
    }
    let left = (width - label_width) / 2;
    let right = width - label_width - left;
    format!("{}{}{}", "─".repeat(left), label, "─".repeat(right))
}

/// Headed section as printed in the comparison
pub fn section(heading: &str, body: &str) -> String {
    format!("## {}{}\n{}", MEMO, heading, body)
}

/// Render both results as one comparison block
pub fn format_comparison(team_result: &str, workflow_result: &str, width: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style(rule(
            &format!("{}Coordinator vs Workflow Comparison", CHART),
            width
        ))
        .green()
        .bold()
    ));
    out.push_str(&section("Coordinator Result", team_result));
    out.push('\n');
    out.push_str(&format!("{}\n", style(rule("⬇⬇⬇", width)).blue().bold()));
    out.push_str(&section("Workflow Result", workflow_result));
    out.push('\n');
    out
}

/// Print the comparison to stdout
pub fn print_comparison(team_result: &str, workflow_result: &str) {
    print!(
        "{}",
        format_comparison(team_result, workflow_result, terminal_width())
    );
}

/// Print one headed result
pub fn print_section(heading: &str, body: &str) {
    println!("{}", style(rule("", terminal_width())).dim());
    println!("{}", section(heading, body));
}

fn step_label(step: StepKind) -> String {
    format!("[{}/{}] {}", step.position(), StepKind::ALL.len(), step)
}

/// Format a workflow stage for display
pub fn format_stage(stage: WorkflowStage) -> String {
    match stage {
        WorkflowStage::NotStarted => style("NOT STARTED").dim().to_string(),
        WorkflowStage::Researched => style("RESEARCHED").yellow().to_string(),
        WorkflowStage::Drafted => style("DRAFTED").yellow().to_string(),
        WorkflowStage::Finalized => style("FINALIZED").green().to_string(),
        WorkflowStage::Failed { step } => style(format!("FAILED at {}", step)).red().to_string(),
    }
}

/// Format a workflow event for display
pub fn format_workflow_event(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::WorkflowStarted { run_id, topic } => format!(
            "{} Starting workflow on {} ({})",
            ROCKET,
            style(topic).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        WorkflowEvent::StepStarted { step } => {
            format!("{} {}", SPINNER, style(step_label(*step)).cyan())
        }
        WorkflowEvent::StepCompleted { step, output } => format!(
            "{} {} {}",
            CHECK,
            style(step_label(*step)).green(),
            style(format!("({} chars)", output.chars().count())).dim()
        ),
        WorkflowEvent::StepFailed { step, error } => format!(
            "{} {}: {}",
            CROSS,
            style(step_label(*step)).red(),
            style(error).dim()
        ),
        WorkflowEvent::WorkflowCompleted { run_id, stage } => format!(
            "{} Workflow ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            format_stage(*stage)
        ),
    }
}

/// Format output with truncation
pub fn format_output(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    if lines.len() <= max_lines {
        output.to_string()
    } else {
        let truncated = lines[..max_lines].join("\n");
        format!(
            "{}\n{}... ({} more lines)",
            truncated,
            style("[truncated]").dim(),
            lines.len() - max_lines
        )
    }
}
