//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{CompareCommand, TeamCommand, ValidateCommand, WorkflowCommand};
use std::ffi::OsString;

/// Compare a coordinated agent team with an explicit content workflow
#[derive(Debug, Parser, Clone)]
#[command(name = "content-crew")]
#[command(version = "0.1.0")]
#[command(about = "Compare a coordinated agent team with an explicit research/write/edit workflow", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to crew configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run both strategies and print their results side by side (default)
    Compare(CompareCommand),

    /// Run the coordinated team only
    Team(TeamCommand),

    /// Run the research → write → edit workflow only
    Workflow(WorkflowCommand),

    /// Validate the crew configuration without calling the model
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// The command to run; `compare` with defaults when none is given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Compare(CompareCommand::default()))
    }
}
