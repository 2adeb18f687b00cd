//! Workflow steps and their prompt templates

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const RESEARCH_TEMPLATE: &str = "You are an expert researcher. Find the 5 most important facts about {{ topic }}, \
with credible sources (APA format). Output only the findings.";

pub const WRITING_TEMPLATE: &str = "You are a professional {{ content_type }} writer. Using this research:\n\n\
{{ research }}\n\n\
Write a {{ content_type }} (600-800 words) with a catchy title, engaging intro, \
clear subheadings, and strong conclusion. Do NOT explain the process.";

pub const EDITING_TEMPLATE: &str = "You are a senior editor. Polish this:\n\n{{ draft }}\n\n\
Ensure clarity, flow, grammar, and engagement. Return ONLY the polished text.";

/// The three workflow steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Research,
    Writing,
    Editing,
}

impl StepKind {
    /// All steps in execution order
    pub const ALL: [StepKind; 3] = [StepKind::Research, StepKind::Writing, StepKind::Editing];

    /// The step whose output this step consumes
    pub fn predecessor(self) -> Option<StepKind> {
        match self {
            StepKind::Research => None,
            StepKind::Writing => Some(StepKind::Research),
            StepKind::Editing => Some(StepKind::Writing),
        }
    }

    /// 1-based position in the workflow
    pub fn position(self) -> usize {
        match self {
            StepKind::Research => 1,
            StepKind::Writing => 2,
            StepKind::Editing => 3,
        }
    }

    /// Configuration key of the agent that runs this step
    pub fn agent_key(self) -> &'static str {
        match self {
            StepKind::Research => "research",
            StepKind::Writing => "writing",
            StepKind::Editing => "editing",
        }
    }

    /// Prompt template the step's instruction is rendered from
    pub fn template(self) -> &'static str {
        match self {
            StepKind::Research => RESEARCH_TEMPLATE,
            StepKind::Writing => WRITING_TEMPLATE,
            StepKind::Editing => EDITING_TEMPLATE,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Research => "research",
            StepKind::Writing => "writing",
            StepKind::Editing => "editing",
        };
        f.write_str(name)
    }
}

/// Instruction for one step plus the predecessor output it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRequest {
    step: StepKind,
    instruction: String,
    prior_output: Option<String>,
}

impl StepRequest {
    fn rendered(step: StepKind, vars: HashMap<&str, &str>, prior_output: Option<&str>) -> Self {
        Self {
            step,
            instruction: render_prompt(step.template(), &vars),
            prior_output: prior_output.map(str::to_string),
        }
    }

    pub fn research(topic: &str) -> Self {
        Self::rendered(StepKind::Research, HashMap::from([("topic", topic)]), None)
    }

    pub fn writing(research: &str, content_type: &str) -> Self {
        Self::rendered(
            StepKind::Writing,
            HashMap::from([("research", research), ("content_type", content_type)]),
            Some(research),
        )
    }

    pub fn editing(draft: &str) -> Self {
        Self::rendered(StepKind::Editing, HashMap::from([("draft", draft)]), Some(draft))
    }

    pub fn step(&self) -> StepKind {
        self.step
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn prior_output(&self) -> Option<&str> {
        self.prior_output.as_deref()
    }
}

/// Render a template with variable substitution
///
/// Placeholders take the form `{{ name }}`; values are inserted verbatim and
/// are not themselves scanned for placeholders.
pub fn render_prompt(template: &str, variables: &HashMap<&str, &str>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{ ") {
        let after = &rest[start + 3..];
        match after.find(" }}") {
            Some(end) => {
                let key = &after[..end];
                rendered.push_str(&rest[..start]);
                match variables.get(key) {
                    Some(value) => rendered.push_str(value),
                    None => rendered.push_str(&rest[start..start + 3 + end + 3]),
                }
                rest = &after[end + 3..];
            }
            None => break,
        }
    }

    rendered.push_str(rest);
    rendered
}
