use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::PlanParseError;
use crate::types::{ExecutionMode, PlanStep, WorkflowPlan};

const FENCE: &str = "```";

/// The plan object as produced by a planner or written in a plan file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PlanDraft {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    pub steps: Vec<PlanStep>,
}

impl PlanDraft {
    pub fn parse(input: &str) -> Result<Self, PlanParseError> {
        let body = strip_code_fences(input);
        let value: JsonValue = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(PlanParseError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Validate and freeze the draft. `goal` overrides any goal in the draft;
    /// a missing or blank `plan_id` is replaced with a fresh UUID.
    pub fn into_plan(self, goal: Option<String>) -> Result<WorkflowPlan, PlanParseError> {
        validate_steps(&self.steps)?;
        let plan_id = self
            .plan_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        Ok(WorkflowPlan {
            plan_id,
            goal: goal.or(self.goal).unwrap_or_default(),
            execution_mode: self.execution_mode,
            steps: self.steps,
        })
    }
}

/// Parse planner output into a plan for `goal`.
pub fn parse_plan_str(input: &str, goal: &str) -> Result<WorkflowPlan, PlanParseError> {
    PlanDraft::parse(input)?.into_plan(Some(goal.to_string()))
}

/// Remove a surrounding Markdown code fence (with or without a language tag).
pub fn strip_code_fences(input: &str) -> &str {
    let trimmed = input.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let rest = rest.trim_end();
    rest.strip_suffix(FENCE).unwrap_or(rest).trim()
}

fn validate_steps(steps: &[PlanStep]) -> Result<(), PlanParseError> {
    let mut seen = HashSet::new();
    for (index, step) in steps.iter().enumerate() {
        for (field, value) in [
            ("id", &step.id),
            ("operation_id", &step.operation_id),
            ("service", &step.service),
        ] {
            if value.trim().is_empty() {
                return Err(PlanParseError::EmptyField { index, field });
            }
        }
        if !seen.insert(step.id.as_str()) {
            return Err(PlanParseError::DuplicateStepId(step.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_with_language_tag() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("```{}```"), "{}");
        assert_eq!(strip_code_fences("{\"steps\":[]}"), "{\"steps\":[]}");
    }

    #[test]
    fn generates_plan_id_when_blank() {
        let plan = parse_plan_str(r#"{"plan_id":"  ","steps":[]}"#, "g").unwrap();
        assert!(uuid::Uuid::parse_str(&plan.plan_id).is_ok());
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            parse_plan_str("[1,2]", "g"),
            Err(PlanParseError::NotAnObject)
        ));
    }

    #[test]
    fn rejects_empty_service() {
        let raw = r#"{"steps":[{"id":"s1","name":"a","operation_id":"op","service":""}]}"#;
        assert!(matches!(
            parse_plan_str(raw, "g"),
            Err(PlanParseError::EmptyField { index: 0, field: "service" })
        ));
    }
}
