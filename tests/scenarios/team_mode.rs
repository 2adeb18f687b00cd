//! Test: Team Mode - one composite prompt, one result

use crate::helpers::*;
use async_trait::async_trait;
use content_crew::agent::{AgentError, AgentResponse};
use content_crew::core::{PipelineState, StepKind};
use content_crew::execution::{
    compare_concurrently, team_prompt, CompareError, ContentTeam, LeaderCoordinator,
    TeamCoordinator,
};
use std::sync::{Arc, Mutex};

struct RecordingCoordinator {
    prompts: Mutex<Vec<String>>,
    reply: Result<String, String>,
}

impl RecordingCoordinator {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Ok(reply.to_string()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Err(message.to_string()),
        })
    }
}

#[async_trait]
impl TeamCoordinator for RecordingCoordinator {
    async fn coordinate(&self, prompt: &str) -> Result<AgentResponse, AgentError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(AgentResponse::new(text.clone())),
            Err(message) => Err(AgentError::Api(message.clone())),
        }
    }
}

#[tokio::test]
async fn test_team_returns_coordinator_text() {
    let coordinator = RecordingCoordinator::replying("Finished article");
    let team = ContentTeam::new(coordinator.clone());

    let run = team
        .run("solar panels", "homeowners", "blog post")
        .await
        .unwrap();

    assert_eq!(run.content, "Finished article");
    let prompts = coordinator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        team_prompt("solar panels", "homeowners", "blog post")
    );
}

#[tokio::test]
async fn test_team_failure_propagates() {
    let team = ContentTeam::new(RecordingCoordinator::failing("unavailable"));

    let err = team.run("a", "b", "c").await.unwrap_err();

    assert!(matches!(err, AgentError::Api(ref msg) if msg == "unavailable"));
}

#[tokio::test]
async fn test_team_empty_reply_is_error() {
    let team = ContentTeam::new(RecordingCoordinator::replying(""));

    assert!(matches!(
        team.run("a", "b", "c").await,
        Err(AgentError::EmptyResponse)
    ));
}

/// The leader is briefed on members and success criteria
#[tokio::test]
async fn test_leader_coordinator_briefing() {
    let backend = Arc::new(StubBackend::new().on("Content Creation Team", |_| {
        "Team article".to_string()
    }));
    let crew = crew_with(backend.clone());
    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend.clone())));

    let run = team
        .run("solar panels", "homeowners", "blog post")
        .await
        .unwrap();

    assert_eq!(run.content, "Team article");
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].agent, "Content Creation Team");
    assert!(calls[0].prompt.contains("Target audience: homeowners"));

    let system = calls[0].system_message();
    assert!(system.contains("Team member Research Agent: "));
    assert!(system.contains("Team member Editor Agent: "));
    assert!(system.contains("Success criterion: Comprehensive, credible research"));
    assert!(system.contains("Work as a team to produce high-quality content"));
}

/// The two strategies run side by side against one backend
#[tokio::test]
async fn test_compare_both_strategies() {
    let backend = Arc::new(
        tagging_backend().on("Content Creation Team", |_| "Team article".to_string()),
    );
    let crew = crew_with(backend.clone());
    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend.clone())));
    let (workflow, _) = workflow_with(backend.clone());

    let comparison = compare_concurrently(&team, &workflow, "solar panels", "homeowners", "blog post")
        .await
        .unwrap();

    assert_eq!(comparison.team.content, "Team article");
    assert!(comparison.workflow.final_content.starts_with("E["));
    assert_eq!(backend.calls().len(), 4);
}

/// A failing coordinator stops the workflow before it reaches the backend
#[tokio::test]
async fn test_compare_stops_on_team_failure() {
    let backend = Arc::new(tagging_backend().failing("Content Creation Team", "rate limited"));
    let crew = crew_with(backend.clone());
    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend.clone())));
    let (workflow, events) = workflow_with(backend.clone());

    let err = compare_concurrently(&team, &workflow, "solar panels", "homeowners", "blog post")
        .await
        .unwrap_err();

    assert!(matches!(err, CompareError::Team(AgentError::Api(_))));
    assert_eq!(backend.call_order(), vec!["Content Creation Team"]);
    assert!(events.lock().unwrap().is_empty());
}

/// A failing workflow step is reported with the step that failed
#[tokio::test]
async fn test_compare_reports_workflow_failure() {
    let backend = Arc::new(
        tagging_backend()
            .on("Content Creation Team", |_| "Team article".to_string())
            .failing(RESEARCH_AGENT, "search unavailable"),
    );
    let crew = crew_with(backend.clone());
    let team = ContentTeam::new(Arc::new(LeaderCoordinator::from_crew(&crew, backend.clone())));
    let (workflow, _) = workflow_with(backend.clone());

    let err = compare_concurrently(&team, &workflow, "solar panels", "homeowners", "blog post")
        .await
        .unwrap_err();

    match err {
        CompareError::Workflow(failure) => {
            assert_eq!(failure.step, StepKind::Research);
            assert_eq!(failure.state, PipelineState::new());
        }
        other => panic!("expected workflow failure, got {:?}", other),
    }
    assert!(!backend.call_order().contains(&WRITING_AGENT.to_string()));
}
