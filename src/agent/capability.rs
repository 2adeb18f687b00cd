//! Capabilities advertised to agents
//!
//! Each capability is its own type behind the [`Capability`] trait. Agents
//! receive a [`CapabilitySet`] built for their role; the set is rendered into
//! the agent's system instructions and handed to the backend alongside the
//! prompt. Capabilities are advertised only, never dispatched here.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A single capability an agent may use
pub trait Capability: Send + Sync {
    /// Stable identifier used in configuration
    fn name(&self) -> &'static str;

    /// One-line description shown to the model
    fn description(&self) -> &'static str;
}

/// Search the web for recent sources
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSearch;

impl Capability for WebSearch {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web for recent, credible sources on a topic"
    }
}

/// Think step by step before answering
#[derive(Debug, Clone, Copy, Default)]
pub struct Reasoning;

impl Capability for Reasoning {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    fn description(&self) -> &'static str {
        "Reason step by step and check intermediate conclusions"
    }
}

/// Read and write local files
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAccess;

impl Capability for FileAccess {
    fn name(&self) -> &'static str {
        "file"
    }

    fn description(&self) -> &'static str {
        "Read and write files in the working directory"
    }
}

/// Run Python snippets
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeExecution;

impl Capability for CodeExecution {
    fn name(&self) -> &'static str {
        "python"
    }

    fn description(&self) -> &'static str {
        "Execute short Python snippets for calculations or formatting"
    }
}

/// Names accepted by [`CapabilitySet::from_names`]
pub const KNOWN_CAPABILITIES: &[&str] = &["web_search", "reasoning", "file", "python"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown capability '{0}' (expected one of: web_search, reasoning, file, python)")]
pub struct UnknownCapability(pub String);

/// Look up the implementation for a capability name
pub fn capability_by_name(name: &str) -> Result<Arc<dyn Capability>, UnknownCapability> {
    match name {
        "web_search" => Ok(Arc::new(WebSearch)),
        "reasoning" => Ok(Arc::new(Reasoning)),
        "file" => Ok(Arc::new(FileAccess)),
        "python" => Ok(Arc::new(CodeExecution)),
        other => Err(UnknownCapability(other.to_string())),
    }
}

/// Ordered, duplicate-free set of capabilities for one agent
#[derive(Clone, Default)]
pub struct CapabilitySet {
    capabilities: Vec<Arc<dyn Capability>>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from configuration names
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownCapability> {
        let mut set = Self::new();
        for name in names {
            set = set.with(capability_by_name(name.as_ref())?);
        }
        Ok(set)
    }

    /// Add a capability; a second capability with the same name is ignored
    pub fn with(mut self, capability: Arc<dyn Capability>) -> Self {
        if !self.contains(capability.name()) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Render the set as a block for system instructions
    pub fn describe(&self) -> String {
        self.capabilities
            .iter()
            .map(|c| format!("- {}: {}\n", c.name(), c.description()))
            .collect()
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
