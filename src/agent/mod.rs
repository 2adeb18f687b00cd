//! Agents and the model backend they call

pub mod capability;
pub mod client;
pub mod mistral;
pub mod response;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub use capability::{Capability, CapabilitySet, UnknownCapability};
pub use client::ModelConfig;
pub use mistral::MistralClient;
pub use response::{AgentError, AgentResponse, TokenUsage};

/// Trait for model execution - allows for different implementations
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Run one completion and return the full response
    async fn complete(&self, request: &CompletionRequest) -> Result<AgentResponse, AgentError>;
}

/// Everything the backend needs for one call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Name of the calling agent
    pub agent: String,

    /// Role statement of the calling agent
    pub role: String,

    /// Standing instructions for the agent
    pub instructions: Vec<String>,

    /// Capabilities advertised to the model
    pub capabilities: CapabilitySet,

    /// Ask for markdown-formatted output
    pub markdown: bool,

    /// The user prompt
    pub prompt: String,
}

impl CompletionRequest {
    /// Build the system message from role, instructions and capabilities
    pub fn system_message(&self) -> String {
        let mut message = format!("You are {}. Your role: {}\n", self.agent, self.role);

        if !self.instructions.is_empty() {
            message.push_str("\nInstructions:\n");
            for instruction in &self.instructions {
                message.push_str(&format!("- {}\n", instruction));
            }
        }

        if !self.capabilities.is_empty() {
            message.push_str("\nAvailable capabilities:\n");
            message.push_str(&self.capabilities.describe());
        }

        if self.markdown {
            message.push_str("\nFormat your response as Markdown.\n");
        }

        message
    }
}

/// A role-bound agent: instructions and capabilities paired with a backend
#[derive(Clone)]
pub struct Agent {
    pub name: String,
    pub role: String,
    pub instructions: Vec<String>,
    pub capabilities: CapabilitySet,
    pub markdown: bool,
    backend: Arc<dyn ModelBackend>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        backend: Arc<dyn ModelBackend>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            instructions: Vec::new(),
            capabilities: CapabilitySet::new(),
            markdown: true,
            backend,
        }
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Request this agent would send for `prompt`
    pub fn request_for(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            agent: self.name.clone(),
            role: self.role.clone(),
            instructions: self.instructions.clone(),
            capabilities: self.capabilities.clone(),
            markdown: self.markdown,
            prompt: prompt.to_string(),
        }
    }

    /// Run a prompt through the backend
    ///
    /// Empty responses are reported as [`AgentError::EmptyResponse`].
    pub async fn run(&self, prompt: &str) -> Result<AgentResponse, AgentError> {
        let request = self.request_for(prompt);
        debug!(
            "{} running prompt ({} chars, capabilities {:?})",
            self.name,
            prompt.len(),
            self.capabilities
        );

        let response = self.backend.complete(&request).await?.non_empty()?;

        if let Some(usage) = &response.usage {
            debug!("{} used {} tokens", self.name, usage.total_tokens);
        }

        Ok(response)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("instructions", &self.instructions)
            .field("capabilities", &self.capabilities)
            .field("markdown", &self.markdown)
            .finish_non_exhaustive()
    }
}
