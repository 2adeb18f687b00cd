//! The two orchestration strategies

pub mod compare;
pub mod team;
pub mod workflow;

pub use compare::{compare_concurrently, CompareError, Comparison};
pub use team::{team_prompt, ContentTeam, LeaderCoordinator, TeamCoordinator, TeamRun};
pub use workflow::{
    ContentWorkflow, EventHandler, WorkflowError, WorkflowEvent, WorkflowFailure, WorkflowRun,
};
