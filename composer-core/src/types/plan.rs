use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation invocation inside a plan.
///
/// Input values are either literals (any JSON type, used verbatim) or
/// strings of the form `${ctx.key}` that are resolved against the run
/// context right before dispatch.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanStep {
    pub id: String,
    pub name: String,
    pub operation_id: String,
    pub service: String,

    #[serde(default)]
    pub inputs: BTreeMap<String, JsonValue>,

    /// Advisory only; the executor never pauses on it.
    #[serde(default)]
    pub requires_confirmation: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowPlan {
    pub plan_id: String,
    pub goal: String,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    pub steps: Vec<PlanStep>,
}

impl WorkflowPlan {
    /// Comma-joined operation ids in declaration order.
    pub fn apis_used(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.operation_id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn describe(&self) -> String {
        format!("{} steps, mode={}", self.steps.len(), self.execution_mode)
    }
}
