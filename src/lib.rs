//! content-crew - compare a coordinated agent team with an explicit
//! research → write → edit workflow

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use crate::agent::{Agent, AgentError, AgentResponse, CompletionRequest, ModelBackend, MistralClient};
pub use crate::core::{Crew, CrewConfig, PipelineState, SequencingError, StepKind, WorkflowStage};
pub use crate::execution::{ContentTeam, ContentWorkflow, TeamCoordinator, WorkflowEvent, WorkflowFailure};
