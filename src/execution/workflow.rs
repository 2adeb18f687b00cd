//! Explicit research → write → edit workflow

use crate::{
    agent::{Agent, AgentError},
    core::{Crew, PipelineState, SequencingError, StepKind, StepRequest, WorkflowStage},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Why a single step failed
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("collaborator failed: {0}")]
    Collaborator(#[from] AgentError),

    #[error(transparent)]
    Sequencing(#[from] SequencingError),
}

/// A failed run, keeping whatever earlier steps produced
#[derive(Debug, Error)]
#[error("workflow stopped at the {step} step: {error}")]
pub struct WorkflowFailure {
    pub step: StepKind,
    #[source]
    pub error: WorkflowError,
    pub state: PipelineState,
}

impl WorkflowFailure {
    pub fn stage(&self) -> WorkflowStage {
        WorkflowStage::Failed { step: self.step }
    }
}

/// A finished run
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub run_id: Uuid,
    pub topic: String,
    pub content_type: String,
    pub final_content: String,
    pub state: PipelineState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Events that can occur during a workflow run
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    WorkflowStarted {
        run_id: Uuid,
        topic: String,
    },
    StepStarted {
        step: StepKind,
    },
    StepCompleted {
        step: StepKind,
        output: String,
    },
    StepFailed {
        step: StepKind,
        error: String,
    },
    WorkflowCompleted {
        run_id: Uuid,
        stage: WorkflowStage,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&WorkflowEvent) + Send + Sync>;

/// Three-step content workflow with injected agents
pub struct ContentWorkflow {
    research_agent: Agent,
    writing_agent: Agent,
    editing_agent: Agent,
    event_handlers: Vec<EventHandler>,
}

impl ContentWorkflow {
    pub fn new(research_agent: Agent, writing_agent: Agent, editing_agent: Agent) -> Self {
        Self {
            research_agent,
            writing_agent,
            editing_agent,
            event_handlers: Vec::new(),
        }
    }

    pub fn from_crew(crew: &Crew) -> Self {
        Self::new(
            crew.research.clone(),
            crew.writing.clone(),
            crew.editing.clone(),
        )
    }

    /// Add an event handler
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&WorkflowEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    fn emit(&self, event: WorkflowEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    fn agent_for(&self, step: StepKind) -> &Agent {
        match step {
            StepKind::Research => &self.research_agent,
            StepKind::Writing => &self.writing_agent,
            StepKind::Editing => &self.editing_agent,
        }
    }

    /// Research `topic`; the findings land in `research_findings`
    pub async fn research(
        &self,
        state: &PipelineState,
        topic: &str,
    ) -> Result<PipelineState, WorkflowError> {
        self.run_step(state, StepRequest::research(topic)).await
    }

    /// Draft a `content_type` from the recorded research findings
    pub async fn write(
        &self,
        state: &PipelineState,
        content_type: &str,
    ) -> Result<PipelineState, WorkflowError> {
        let research = self.require_input(state, StepKind::Writing, StepKind::Research)?;
        self.run_step(state, StepRequest::writing(research, content_type))
            .await
    }

    /// Polish the recorded draft
    pub async fn edit(&self, state: &PipelineState) -> Result<PipelineState, WorkflowError> {
        let draft = self.require_input(state, StepKind::Editing, StepKind::Writing)?;
        self.run_step(state, StepRequest::editing(draft)).await
    }

    /// Output of `from`, which `step` cannot run without
    fn require_input<'s>(
        &self,
        state: &'s PipelineState,
        step: StepKind,
        from: StepKind,
    ) -> Result<&'s str, WorkflowError> {
        state.output_of(from).ok_or_else(|| {
            let e = SequencingError::MissingInput {
                step,
                missing: from,
            };
            error!("Refusing to run {} step: {}", step, e);
            self.emit(WorkflowEvent::StepFailed {
                step,
                error: e.to_string(),
            });
            e.into()
        })
    }

    async fn run_step(
        &self,
        state: &PipelineState,
        request: StepRequest,
    ) -> Result<PipelineState, WorkflowError> {
        let step = request.step();
        if let Err(e) = state.check(step) {
            error!("Refusing to run {} step: {}", step, e);
            self.emit(WorkflowEvent::StepFailed {
                step,
                error: e.to_string(),
            });
            return Err(e.into());
        }

        let agent = self.agent_for(step);
        info!("Executing {} step with {}", step, agent.name);
        debug!("Prompt for {} step: {}", step, request.instruction());
        self.emit(WorkflowEvent::StepStarted { step });

        let response = match agent.run(request.instruction()).await {
            Ok(response) => response,
            Err(e) => {
                error!("Agent error for {} step: {}", step, e);
                self.emit(WorkflowEvent::StepFailed {
                    step,
                    error: e.to_string(),
                });
                return Err(e.into());
            }
        };

        debug!("Output of {} step: {}", step, response.content);
        let next = state.with_output(step, response.content.clone())?;
        self.emit(WorkflowEvent::StepCompleted {
            step,
            output: response.content,
        });
        Ok(next)
    }

    /// Run research, writing and editing in order and return the final text
    pub async fn run(
        &self,
        topic: &str,
        content_type: &str,
    ) -> Result<WorkflowRun, WorkflowFailure> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting workflow run {} on '{}'", run_id, topic);
        self.emit(WorkflowEvent::WorkflowStarted {
            run_id,
            topic: topic.to_string(),
        });

        let state = PipelineState::new();
        let state = self
            .research(&state, topic)
            .await
            .map_err(|e| self.failed(run_id, StepKind::Research, e, &state))?;
        let state = self
            .write(&state, content_type)
            .await
            .map_err(|e| self.failed(run_id, StepKind::Writing, e, &state))?;
        let state = self
            .edit(&state)
            .await
            .map_err(|e| self.failed(run_id, StepKind::Editing, e, &state))?;

        let final_content = state.final_content().unwrap_or_default().to_string();
        info!("Workflow run {} finalized", run_id);
        self.emit(WorkflowEvent::WorkflowCompleted {
            run_id,
            stage: state.stage(),
        });

        Ok(WorkflowRun {
            run_id,
            topic: topic.to_string(),
            content_type: content_type.to_string(),
            final_content,
            state,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn failed(
        &self,
        run_id: Uuid,
        step: StepKind,
        error: WorkflowError,
        state: &PipelineState,
    ) -> WorkflowFailure {
        error!("Workflow run {} failed at {} step: {}", run_id, step, error);
        self.emit(WorkflowEvent::WorkflowCompleted {
            run_id,
            stage: WorkflowStage::Failed { step },
        });
        WorkflowFailure {
            step,
            error,
            state: state.clone(),
        }
    }
}
