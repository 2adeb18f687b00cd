//! Scenario-based tests for content-crew

mod failure_handling;
mod success_chain;
mod team_mode;
