//! Mistral chat-completions backend

use crate::agent::{
    AgentError, AgentResponse, CompletionRequest, ModelBackend, ModelConfig, TokenUsage,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Client for the Mistral chat-completions API
#[derive(Debug, Clone)]
pub struct MistralClient {
    config: ModelConfig,
    http: reqwest::Client,
}

impl MistralClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(request.system_message()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(request.prompt.clone()),
                },
            ],
        }
    }

    fn into_response(response: ChatResponse) -> Result<AgentResponse, AgentError> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AgentError::EmptyResponse)?;

        Ok(AgentResponse {
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[async_trait]
impl ModelBackend for MistralClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<AgentResponse, AgentError> {
        let url = self.config.completions_url();
        debug!("POST {} as {} (model {})", url, request.agent, self.config.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| AgentError::Transport(format!("Mistral request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Mistral API returned {}: {}", status, body.trim());
            return Err(AgentError::Api(format!("{}: {}", status, body.trim())));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AgentError::Internal(format!("Failed to decode Mistral response: {}", e))
        })?;

        Self::into_response(parsed)
    }
}
