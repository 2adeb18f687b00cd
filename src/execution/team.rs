//! Coordinator mode: one composite prompt handed to a team

use crate::{
    agent::{Agent, AgentError, AgentResponse, ModelBackend},
    core::{render_prompt, Crew},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

pub const TEAM_TEMPLATE: &str = "Create a comprehensive {{ content_type }} on: \"{{ topic }}\"
Target audience: {{ audience }}

Process:
1. Research thoroughly using credible sources
2. Write engaging, well-structured content
3. Review and refine for quality and accuracy

Return the final, publication-ready version with citations.";

/// Build the composite instruction for the whole task
pub fn team_prompt(topic: &str, audience: &str, content_type: &str) -> String {
    let vars = HashMap::from([
        ("topic", topic),
        ("audience", audience),
        ("content_type", content_type),
    ]);
    render_prompt(TEAM_TEMPLATE, &vars)
}

/// Collaborator that turns a composite instruction into finished text
#[async_trait]
pub trait TeamCoordinator: Send + Sync {
    async fn coordinate(&self, prompt: &str) -> Result<AgentResponse, AgentError>;
}

/// Coordinator backed by a single leader agent briefed on the team
#[derive(Debug, Clone)]
pub struct LeaderCoordinator {
    leader: Agent,
}

impl LeaderCoordinator {
    pub fn new(leader: Agent) -> Self {
        Self { leader }
    }

    /// Brief a leader on the crew's members, instructions and success criteria
    pub fn from_crew(crew: &Crew, backend: Arc<dyn ModelBackend>) -> Self {
        let mut instructions = crew.team.instructions.clone();
        for member in crew.members() {
            instructions.push(format!("Team member {}: {}", member.name, member.role));
        }
        for criterion in &crew.team.success_criteria {
            instructions.push(format!("Success criterion: {}", criterion));
        }

        let leader = Agent::new(
            crew.team.name.clone(),
            "Coordinate the team members to complete the task end to end",
            backend,
        )
        .with_instructions(instructions)
        .with_markdown(crew.team.markdown);

        Self::new(leader)
    }
}

#[async_trait]
impl TeamCoordinator for LeaderCoordinator {
    async fn coordinate(&self, prompt: &str) -> Result<AgentResponse, AgentError> {
        self.leader.run(prompt).await
    }
}

/// A finished coordinator-mode run
#[derive(Debug, Clone)]
pub struct TeamRun {
    pub run_id: Uuid,
    pub content: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Runs the whole task through a [`TeamCoordinator`]
#[derive(Clone)]
pub struct ContentTeam {
    coordinator: Arc<dyn TeamCoordinator>,
}

impl ContentTeam {
    pub fn new(coordinator: Arc<dyn TeamCoordinator>) -> Self {
        Self { coordinator }
    }

    pub async fn run(
        &self,
        topic: &str,
        audience: &str,
        content_type: &str,
    ) -> Result<TeamRun, AgentError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting team run {} on '{}'", run_id, topic);

        let prompt = team_prompt(topic, audience, content_type);
        debug!("Team prompt: {}", prompt);

        let response = self
            .coordinator
            .coordinate(&prompt)
            .await
            .and_then(AgentResponse::non_empty)
            .map_err(|e| {
                error!("Team run {} failed: {}", run_id, e);
                e
            })?;

        info!("Team run {} finished", run_id);
        Ok(TeamRun {
            run_id,
            content: response.content,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
