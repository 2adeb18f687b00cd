//! Test: Success Chain - research → write → edit threading

use crate::helpers::*;
use content_crew::core::{PipelineState, StepKind, StepRequest, WorkflowStage};
use content_crew::execution::WorkflowEvent;
use std::sync::Arc;

/// Each step's input is the recorded output of its predecessor
#[tokio::test]
async fn test_solar_panels_blog_post() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    let run = workflow.run("solar panels", "blog post").await.unwrap();

    let research = format!("R[{}]", StepRequest::research("solar panels").instruction());
    let draft = format!(
        "W[{}]",
        StepRequest::writing(&research, "blog post").instruction()
    );
    let edited = format!("E[{}]", StepRequest::editing(&draft).instruction());

    assert_eq!(run.final_content, edited);
    assert_eq!(run.state.research_findings(), Some(research.as_str()));
    assert_eq!(run.state.draft_content(), Some(draft.as_str()));
    assert_eq!(run.state.final_content(), Some(edited.as_str()));
    assert_eq!(run.state.stage(), WorkflowStage::Finalized);
    assert_eq!(run.topic, "solar panels");
    assert_eq!(run.content_type, "blog post");
    assert!(run.finished_at >= run.started_at);
}

/// Every step runs exactly once, in order
#[tokio::test]
async fn test_steps_run_once_in_order() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    workflow.run("tidal power", "newsletter").await.unwrap();

    assert_eq!(
        backend.call_order(),
        vec![RESEARCH_AGENT, WRITING_AGENT, EDITING_AGENT]
    );

    let calls = backend.calls();
    // The writing prompt embeds exactly what research returned, and so on.
    let research_out = format!("R[{}]", calls[0].prompt);
    assert!(calls[1].prompt.contains(&research_out));
    let draft_out = format!("W[{}]", calls[1].prompt);
    assert!(calls[2].prompt.contains(&draft_out));
}

/// An echoing collaborator shows the topic lands in the research instruction
#[tokio::test]
async fn test_research_contains_topic() {
    let backend = Arc::new(StubBackend::echo());
    let (workflow, _events) = workflow_with(backend.clone());

    let state = workflow.research(&PipelineState::new(), "X").await.unwrap();

    assert!(state.research_findings().unwrap().contains("X"));
    assert_eq!(state.draft_content(), None);
    assert_eq!(state.final_content(), None);
}

/// Steps can be driven one at a time; earlier records are untouched
#[tokio::test]
async fn test_manual_step_by_step() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    let empty = PipelineState::new();
    let researched = workflow.research(&empty, "wind farms").await.unwrap();
    assert_eq!(researched.stage(), WorkflowStage::Researched);
    assert_eq!(researched.draft_content(), None);

    let drafted = workflow.write(&researched, "white paper").await.unwrap();
    assert_eq!(drafted.stage(), WorkflowStage::Drafted);
    assert!(drafted.draft_content().unwrap().contains("white paper"));

    let finalized = workflow.edit(&drafted).await.unwrap();
    assert_eq!(finalized.stage(), WorkflowStage::Finalized);

    assert_eq!(empty.stage(), WorkflowStage::NotStarted);
    assert_eq!(researched.stage(), WorkflowStage::Researched);
    assert_eq!(
        finalized.output_of(StepKind::Research),
        researched.research_findings()
    );
}

/// Empty topic and content type pass through verbatim
#[tokio::test]
async fn test_empty_inputs_are_not_validated() {
    let backend = Arc::new(StubBackend::echo());
    let (workflow, _events) = workflow_with(backend.clone());

    let run = workflow.run("", "").await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].prompt.contains("facts about ,"));
    assert!(calls[1].prompt.starts_with("You are a professional  writer."));
    assert!(!run.final_content.is_empty());
}

/// Events describe the run in order
#[tokio::test]
async fn test_event_sequence() {
    let backend = Arc::new(tagging_backend());
    let (workflow, events) = workflow_with(backend);

    let run = workflow.run("geothermal", "article").await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 8);
    assert!(matches!(&events[0], WorkflowEvent::WorkflowStarted { run_id, topic }
        if *run_id == run.run_id && topic == "geothermal"));

    let steps: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            WorkflowEvent::StepStarted { step } => Some(("start", *step)),
            WorkflowEvent::StepCompleted { step, .. } => Some(("done", *step)),
            _ => None,
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            ("start", StepKind::Research),
            ("done", StepKind::Research),
            ("start", StepKind::Writing),
            ("done", StepKind::Writing),
            ("start", StepKind::Editing),
            ("done", StepKind::Editing),
        ]
    );
    assert!(matches!(
        events[7],
        WorkflowEvent::WorkflowCompleted {
            stage: WorkflowStage::Finalized,
            ..
        }
    ));
}

/// Agents carry their configured role and capabilities into each call
#[tokio::test]
async fn test_requests_carry_agent_configuration() {
    let backend = Arc::new(tagging_backend());
    let (workflow, _events) = workflow_with(backend.clone());

    workflow.run("hydrogen", "explainer").await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls[0].capabilities.names(), vec!["web_search", "reasoning"]);
    assert_eq!(
        calls[2].capabilities.names(),
        vec!["reasoning", "file", "python"]
    );
    assert!(calls[2]
        .instructions
        .iter()
        .any(|i| i.contains("Return ONLY the polished text")));
    assert!(calls[0].system_message().contains("Include source URLs in APA format"));
}
