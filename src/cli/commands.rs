//! CLI command definitions

use crate::core::config::RunDefaults;
use clap::Args;

/// Topic, audience and content type for a run
#[derive(Debug, Args, Clone, Default)]
pub struct RunArgs {
    /// Topic to write about
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Kind of content to produce (e.g. "blog post")
    #[arg(long)]
    pub content_type: Option<String>,

    /// Target audience (coordinator mode only)
    #[arg(short, long)]
    pub audience: Option<String>,
}

/// Resolved run inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInputs {
    pub topic: String,
    pub content_type: String,
    pub audience: String,
}

impl RunArgs {
    /// Fill unset values from configured defaults
    pub fn resolve(&self, defaults: &RunDefaults) -> RunInputs {
        RunInputs {
            topic: self.topic.clone().unwrap_or_else(|| defaults.topic.clone()),
            content_type: self
                .content_type
                .clone()
                .unwrap_or_else(|| defaults.content_type.clone()),
            audience: self
                .audience
                .clone()
                .unwrap_or_else(|| defaults.audience.clone()),
        }
    }
}

/// Run both strategies and compare
#[derive(Debug, Args, Clone, Default)]
pub struct CompareCommand {
    #[command(flatten)]
    pub run: RunArgs,

    /// Run both strategies at the same time
    #[arg(long)]
    pub concurrent: bool,
}

/// Run the coordinated team only
#[derive(Debug, Args, Clone)]
pub struct TeamCommand {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Run the explicit workflow only
#[derive(Debug, Args, Clone)]
pub struct WorkflowCommand {
    /// Topic to write about
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Kind of content to produce (e.g. "blog post")
    #[arg(long)]
    pub content_type: Option<String>,

    /// Also print research findings and the draft
    #[arg(long)]
    pub show_intermediate: bool,
}

impl WorkflowCommand {
    pub fn resolve(&self, defaults: &RunDefaults) -> RunInputs {
        RunArgs {
            topic: self.topic.clone(),
            content_type: self.content_type.clone(),
            audience: None,
        }
        .resolve(defaults)
    }
}

/// Validate a crew configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}
