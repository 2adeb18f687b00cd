//! Agent response types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for model collaborator calls
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Response from the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The response content
    pub content: String,

    /// Model that produced the response (if reported)
    pub model: Option<String>,

    /// Token usage information (if available)
    pub usage: Option<TokenUsage>,
}

impl AgentResponse {
    /// Create a new agent response
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            usage: None,
        }
    }

    /// Reject responses that carry no text
    pub fn non_empty(self) -> Result<Self, AgentError> {
        if self.content.trim().is_empty() {
            Err(AgentError::EmptyResponse)
        } else {
            Ok(self)
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
