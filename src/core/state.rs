//! Workflow state models

use crate::core::step::StepKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a step runs out of order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencingError {
    /// The step's input has not been produced yet
    #[error("{step} requires the output of {missing}, which has not been produced")]
    MissingInput { step: StepKind, missing: StepKind },

    /// The step already recorded its output for this run
    #[error("{0} output is already recorded for this run")]
    AlreadyRecorded(StepKind),
}

/// Where a workflow run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    /// No step has produced output
    NotStarted,
    /// Research findings are recorded
    Researched,
    /// Draft content is recorded
    Drafted,
    /// Final content is recorded
    Finalized,
    /// A step failed; no further steps are attempted
    Failed { step: StepKind },
}

/// Intermediate and final results of one workflow run
///
/// Each transition leaves the record untouched and returns a new one with
/// exactly one more field set. Fields are filled in step order and never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    research_findings: Option<String>,
    draft_content: Option<String>,
    final_content: Option<String>,
}

impl PipelineState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn research_findings(&self) -> Option<&str> {
        self.research_findings.as_deref()
    }

    pub fn draft_content(&self) -> Option<&str> {
        self.draft_content.as_deref()
    }

    pub fn final_content(&self) -> Option<&str> {
        self.final_content.as_deref()
    }

    /// Output recorded for a step, if any
    pub fn output_of(&self, step: StepKind) -> Option<&str> {
        match step {
            StepKind::Research => self.research_findings(),
            StepKind::Writing => self.draft_content(),
            StepKind::Editing => self.final_content(),
        }
    }

    /// Current stage derived from which fields are present
    pub fn stage(&self) -> WorkflowStage {
        if self.final_content.is_some() {
            WorkflowStage::Finalized
        } else if self.draft_content.is_some() {
            WorkflowStage::Drafted
        } else if self.research_findings.is_some() {
            WorkflowStage::Researched
        } else {
            WorkflowStage::NotStarted
        }
    }

    /// Input a step consumes: the recorded output of its predecessor
    pub fn input_for(&self, step: StepKind) -> Result<Option<&str>, SequencingError> {
        match step.predecessor() {
            None => Ok(None),
            Some(previous) => self
                .output_of(previous)
                .map(Some)
                .ok_or(SequencingError::MissingInput {
                    step,
                    missing: previous,
                }),
        }
    }

    /// Check that `step` may record its output now
    pub fn check(&self, step: StepKind) -> Result<(), SequencingError> {
        if self.output_of(step).is_some() {
            return Err(SequencingError::AlreadyRecorded(step));
        }
        self.input_for(step).map(|_| ())
    }

    /// New state with the output of `step` recorded
    pub fn with_output(&self, step: StepKind, output: String) -> Result<Self, SequencingError> {
        self.check(step)?;

        let mut next = self.clone();
        match step {
            StepKind::Research => next.research_findings = Some(output),
            StepKind::Writing => next.draft_content = Some(output),
            StepKind::Editing => next.final_content = Some(output),
        }
        Ok(next)
    }
}
