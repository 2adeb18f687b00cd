//! Test: Failure Handling - no recovery, earlier results kept

use crate::helpers::*;
use content_crew::agent::AgentError;
use content_crew::core::{PipelineState, SequencingError, StepKind, WorkflowStage};
use content_crew::execution::{WorkflowError, WorkflowEvent};
use std::sync::Arc;

/// A failing research step stops the run before writing or editing
#[tokio::test]
async fn test_research_failure_stops_run() {
    let backend = Arc::new(tagging_backend().failing(RESEARCH_AGENT, "rate limited"));
    let (workflow, events) = workflow_with(backend.clone());

    let failure = workflow.run("solar panels", "blog post").await.unwrap_err();

    assert_eq!(failure.step, StepKind::Research);
    assert_eq!(
        failure.stage(),
        WorkflowStage::Failed {
            step: StepKind::Research
        }
    );
    assert!(matches!(
        failure.error,
        WorkflowError::Collaborator(AgentError::Api(ref msg)) if msg == "rate limited"
    ));
    assert_eq!(failure.state.research_findings(), None);
    assert_eq!(failure.state.draft_content(), None);
    assert_eq!(failure.state.final_content(), None);
    assert_eq!(backend.call_order(), vec![RESEARCH_AGENT]);

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, WorkflowEvent::StepFailed { step: StepKind::Research, .. })));
    assert!(!events
        .iter()
        .any(|e| matches!(e, WorkflowEvent::StepStarted { step: StepKind::Writing })));
}

/// A failing writing step keeps the research findings
#[tokio::test]
async fn test_writing_failure_keeps_research() {
    let backend = Arc::new(tagging_backend().failing(WRITING_AGENT, "server error"));
    let (workflow, _events) = workflow_with(backend.clone());

    let failure = workflow.run("solar panels", "blog post").await.unwrap_err();

    assert_eq!(failure.step, StepKind::Writing);
    assert!(failure.state.research_findings().unwrap().starts_with("R["));
    assert_eq!(failure.state.draft_content(), None);
    assert_eq!(failure.state.final_content(), None);
    assert_eq!(backend.call_order(), vec![RESEARCH_AGENT, WRITING_AGENT]);
    assert!(failure.to_string().contains("writing"));
}

/// An empty model reply counts as a collaborator failure
#[tokio::test]
async fn test_empty_reply_fails_step() {
    let backend = Arc::new(tagging_backend().on(EDITING_AGENT, |_| "   ".to_string()));
    let (workflow, _events) = workflow_with(backend.clone());

    let failure = workflow.run("solar panels", "blog post").await.unwrap_err();

    assert_eq!(failure.step, StepKind::Editing);
    assert!(matches!(
        failure.error,
        WorkflowError::Collaborator(AgentError::EmptyResponse)
    ));
    assert!(failure.state.draft_content().is_some());
    assert_eq!(failure.state.final_content(), None);
    assert_eq!(failure.state.stage(), WorkflowStage::Drafted);
}

/// Editing before a draft exists is a sequencing error and calls nothing
#[tokio::test]
async fn test_edit_without_draft() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    let err = workflow.edit(&PipelineState::new()).await.unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Sequencing(SequencingError::MissingInput {
            step: StepKind::Editing,
            missing: StepKind::Writing
        })
    ));
    assert!(backend.calls().is_empty());
}

/// Editing straight after research reports the missing draft, not an empty one
#[tokio::test]
async fn test_edit_after_research_only() {
    let backend = Arc::new(tagging_backend());
    let (workflow, events) = workflow_with(backend.clone());

    let researched = workflow
        .research(&PipelineState::new(), "solar panels")
        .await
        .unwrap();
    let err = workflow.edit(&researched).await.unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Sequencing(SequencingError::MissingInput {
            step: StepKind::Editing,
            missing: StepKind::Writing
        })
    ));
    assert_eq!(backend.call_order(), vec![RESEARCH_AGENT]);
    assert!(matches!(
        events.lock().unwrap().last(),
        Some(WorkflowEvent::StepFailed {
            step: StepKind::Editing,
            ..
        })
    ));
}

/// Writing before research is rejected the same way
#[tokio::test]
async fn test_write_without_research() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    let err = workflow
        .write(&PipelineState::new(), "blog post")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Sequencing(SequencingError::MissingInput {
            step: StepKind::Writing,
            missing: StepKind::Research
        })
    ));
    assert!(backend.calls().is_empty());
}

/// A second research pass on the same record never overwrites it
#[tokio::test]
async fn test_research_twice_is_rejected() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    let researched = workflow
        .research(&PipelineState::new(), "first topic")
        .await
        .unwrap();
    let err = workflow
        .research(&researched, "second topic")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Sequencing(SequencingError::AlreadyRecorded(StepKind::Research))
    ));
    assert!(researched.research_findings().unwrap().contains("first topic"));
    assert_eq!(backend.calls().len(), 1);
}
