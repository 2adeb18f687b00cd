//! Core domain models
//!
//! This module defines the crew configuration, the workflow steps and their
//! prompt templates, and the state record threaded between steps.

pub mod config;
pub mod crew;
pub mod state;
pub mod step;

pub use config::{ConfigError, CrewConfig};
pub use crew::Crew;
pub use state::*;
pub use step::*;
