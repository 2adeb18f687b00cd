//! Both strategies on the same inputs

use crate::{
    agent::AgentError,
    execution::{ContentTeam, ContentWorkflow, TeamRun, WorkflowFailure, WorkflowRun},
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Coordinator team failed")]
    Team(#[source] AgentError),

    #[error("Workflow failed")]
    Workflow(#[source] WorkflowFailure),
}

/// Results of both strategies for one topic
#[derive(Debug, Clone)]
pub struct Comparison {
    pub team: TeamRun,
    pub workflow: WorkflowRun,
}

/// Run the team and the workflow at the same time
///
/// The first failure drops the other strategy, so no further model calls are made.
pub async fn compare_concurrently(
    team: &ContentTeam,
    workflow: &ContentWorkflow,
    topic: &str,
    audience: &str,
    content_type: &str,
) -> Result<Comparison, CompareError> {
    info!("Running both strategies concurrently on '{}'", topic);

    let result = tokio::try_join!(
        async {
            team.run(topic, audience, content_type)
                .await
                .map_err(CompareError::Team)
        },
        async {
            workflow
                .run(topic, content_type)
                .await
                .map_err(CompareError::Workflow)
        }
    );

    match result {
        Ok((team_run, workflow_run)) => Ok(Comparison {
            team: team_run,
            workflow: workflow_run,
        }),
        Err(e) => {
            error!("Comparison aborted: {}", e);
            Err(e)
        }
    }
}
