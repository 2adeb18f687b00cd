//! Agents built from configuration, ready for injection

use crate::agent::{Agent, CapabilitySet, ModelBackend, ModelConfig};
use crate::core::config::{api_key_from, AgentConfig, ConfigError, CrewConfig, TeamConfig};
use crate::core::step::StepKind;
use std::sync::Arc;

/// The three role agents plus the team definition
#[derive(Debug, Clone)]
pub struct Crew {
    pub research: Agent,
    pub writing: Agent,
    pub editing: Agent,
    pub team: TeamConfig,
}

impl Crew {
    /// Build every agent against one shared backend
    pub fn from_config(
        config: &CrewConfig,
        backend: Arc<dyn ModelBackend>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            research: build_agent(config.agents.for_step(StepKind::Research), backend.clone())?,
            writing: build_agent(config.agents.for_step(StepKind::Writing), backend.clone())?,
            editing: build_agent(config.agents.for_step(StepKind::Editing), backend)?,
            team: config.team.clone(),
        })
    }

    /// Resolve the credential, then build the backend and the crew on it
    ///
    /// `connect` is only called once the credential is known to be present.
    pub fn with_credential<F>(
        config: &CrewConfig,
        api_key: Option<String>,
        connect: F,
    ) -> Result<(Self, Arc<dyn ModelBackend>), ConfigError>
    where
        F: FnOnce(ModelConfig) -> Arc<dyn ModelBackend>,
    {
        let api_key = api_key_from(api_key)?;
        let backend = connect(config.model.to_model_config(api_key));
        let crew = Self::from_config(config, backend.clone())?;
        Ok((crew, backend))
    }

    /// Members in workflow order
    pub fn members(&self) -> [&Agent; 3] {
        [&self.research, &self.writing, &self.editing]
    }
}

/// Build one agent from its definition
pub fn build_agent(
    config: &AgentConfig,
    backend: Arc<dyn ModelBackend>,
) -> Result<Agent, ConfigError> {
    let capabilities = CapabilitySet::from_names(&config.capabilities)
        .map_err(|e| ConfigError::Invalid(format!("agent '{}': {}", config.name, e)))?;

    Ok(Agent::new(config.name.clone(), config.role.clone(), backend)
        .with_instructions(config.instructions.clone())
        .with_capabilities(capabilities)
        .with_markdown(config.markdown))
}
