//! Crew configuration: credential, model, agents, team and run defaults

use crate::agent::capability::KNOWN_CAPABILITIES;
use crate::agent::client::{API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::agent::ModelConfig;
use crate::core::step::StepKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; export it or add it to a .env file")]
    MissingCredential(&'static str),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse crew config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid crew config: {0}")]
    Invalid(String),
}

/// Read the API credential from the environment
///
/// A `.env` file in the working directory is loaded first if present.
pub fn load_api_key() -> Result<String, ConfigError> {
    api_key_from(credential_from_env())
}

/// Raw credential value from the environment, after loading `.env`
pub fn credential_from_env() -> Option<String> {
    // Missing .env is fine; the variable may already be exported.
    let _ = dotenvy::dotenv();
    std::env::var(API_KEY_ENV).ok()
}

/// Validate a raw credential value
pub fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingCredential(API_KEY_ENV)),
    }
}

/// Top-level crew configuration, optionally loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CrewConfig {
    /// Model settings shared by every agent
    pub model: ModelSettings,

    /// Agent definitions for the three workflow roles
    pub agents: AgentsConfig,

    /// Coordinator-mode team definition
    pub team: TeamConfig,

    /// Topic, content type and audience used when the CLI omits them
    pub defaults: RunDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub id: String,
    pub endpoint: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            id: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ModelSettings {
    /// Combine with a credential into a client configuration
    pub fn to_model_config(&self, api_key: String) -> ModelConfig {
        ModelConfig::new(api_key)
            .with_model(self.id.clone())
            .with_endpoint(self.endpoint.clone())
    }
}

/// Definition of one agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Display name
    pub name: String,

    /// Role statement
    pub role: String,

    /// Standing instructions
    #[serde(default)]
    pub instructions: Vec<String>,

    /// Capability names (see `KNOWN_CAPABILITIES`)
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Ask for markdown output
    #[serde(default = "default_true")]
    pub markdown: bool,
}

fn default_true() -> bool {
    true
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentsConfig {
    pub research: AgentConfig,
    pub writing: AgentConfig,
    pub editing: AgentConfig,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            research: AgentConfig {
                name: "Research Agent".to_string(),
                role: "Conduct thorough research on given topics using web search".to_string(),
                instructions: strings(&[
                    "Gather comprehensive information from multiple recent and credible sources",
                    "Include source URLs in APA format",
                    "Organize findings in a clear, structured format",
                    "Focus on key trends, facts, and insights",
                ]),
                capabilities: strings(&["web_search", "reasoning"]),
                markdown: true,
            },
            writing: AgentConfig {
                name: "Writing Agent".to_string(),
                role: "Create engaging, well-structured content based on research findings"
                    .to_string(),
                instructions: Vec::new(),
                capabilities: strings(&["reasoning", "file", "python"]),
                markdown: true,
            },
            editing: AgentConfig {
                name: "Editor Agent".to_string(),
                role: "Review and improve content for quality, accuracy, and engagement"
                    .to_string(),
                instructions: strings(&[
                    "Review for clarity, grammar, and logical flow",
                    "Ensure all claims are supported",
                    "Make it engaging for the target audience",
                    "Return ONLY the polished text, no explanations",
                ]),
                capabilities: strings(&["reasoning", "file", "python"]),
                markdown: true,
            },
        }
    }
}

impl AgentsConfig {
    /// Definition of the agent that runs `step`
    pub fn for_step(&self, step: StepKind) -> &AgentConfig {
        match step {
            StepKind::Research => &self.research,
            StepKind::Writing => &self.writing,
            StepKind::Editing => &self.editing,
        }
    }

    /// Agents keyed by role, in workflow order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AgentConfig)> {
        StepKind::ALL
            .into_iter()
            .map(move |step| (step.agent_key(), self.for_step(step)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TeamConfig {
    pub name: String,
    pub instructions: Vec<String>,
    pub success_criteria: Vec<String>,
    pub markdown: bool,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            name: "Content Creation Team".to_string(),
            instructions: strings(&[
                "Work as a team to produce high-quality content ready for publication",
            ]),
            success_criteria: strings(&[
                "Comprehensive, credible research",
                "Well-structured and engaging content",
                "Reviewed for accuracy and readability",
            ]),
            markdown: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunDefaults {
    pub topic: String,
    pub content_type: String,
    pub audience: String,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            topic: "The Future of Artificial Intelligence in Healthcare".to_string(),
            content_type: "technical report".to_string(),
            audience: "healthcare professionals".to_string(),
        }
    }
}

impl CrewConfig {
    /// Load crew configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse crew configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: CrewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the built-in crew
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the crew configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.id.trim().is_empty() {
            return Err(ConfigError::Invalid("model id must not be empty".to_string()));
        }
        if self.model.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "model endpoint must not be empty".to_string(),
            ));
        }

        for (key, agent) in self.agents.iter() {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "agent '{}' has an empty name",
                    key
                )));
            }
            if agent.role.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "agent '{}' has an empty role",
                    key
                )));
            }
            for capability in &agent.capabilities {
                if !KNOWN_CAPABILITIES.contains(&capability.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "agent '{}' lists unknown capability '{}'",
                        key, capability
                    )));
                }
            }
        }

        if self.team.name.trim().is_empty() {
            return Err(ConfigError::Invalid("team name must not be empty".to_string()));
        }

        Ok(())
    }
}
