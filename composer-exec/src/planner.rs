use std::sync::Arc;

use composer_core::{parse_plan_str, OperationCatalogEntry, OperationParam, PlanParseError, WorkflowPlan};
use serde::Serialize;

use crate::llm::{LlmError, TextGenerator};

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("planner returned an invalid plan: {0}")]
    Parse(#[from] PlanParseError),
}

/// Turns a goal and an operation catalog into a `WorkflowPlan`.
pub struct Planner {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl Planner {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub async fn generate_plan(
        &self,
        goal: &str,
        catalog: &[OperationCatalogEntry],
    ) -> Result<WorkflowPlan, PlannerError> {
        let prompt = build_prompt(goal, catalog);
        let raw = self.generator.generate(&self.model, &prompt).await?;
        Ok(parse_plan_str(&raw, goal)?)
    }
}

#[derive(Serialize)]
struct PromptOperation<'a> {
    service: &'a str,
    operation_id: &'a str,
    method: &'a str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "no_params")]
    parameters: &'a [OperationParam],
}

fn no_params(params: &&[OperationParam]) -> bool {
    params.is_empty()
}

pub fn build_prompt(goal: &str, catalog: &[OperationCatalogEntry]) -> String {
    let operations: Vec<PromptOperation<'_>> = catalog
        .iter()
        .map(|e| PromptOperation {
            service: &e.service,
            operation_id: &e.operation_id,
            method: &e.method,
            path: &e.path,
            description: e.description.as_deref(),
            parameters: &e.parameters,
        })
        .collect();
    let operations = serde_json::to_string_pretty(&operations).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are an API workflow planner. Given a high-level integration goal and a list of \
available API operations, design a workflow plan.\n\n\
Goal:\n{goal}\n\n\
Available operations (JSON array):\n{operations}\n\n\
Return ONLY valid JSON with the following structure:\n\
{{\n  \"plan_id\": \"string\",\n  \"execution_mode\": \"sequential\" | \"parallel\",\n  \"steps\": [\n    {{\n      \"id\": \"string\",\n      \"name\": \"string\",\n      \"operation_id\": \"string\",\n      \"service\": \"string\",\n      \"inputs\": {{ \"param\": \"value-or-${{ctx.<name>_id}}\" }},\n      \"requires_confirmation\": false\n    }}\n  ]\n}}\n\n\
A step whose response contains an \"id\" makes it available to later steps as ${{ctx.<step name>_id}}.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_goal_and_operations() {
        let catalog = vec![OperationCatalogEntry {
            service: "user-service".to_string(),
            operation_id: "createUser".to_string(),
            method: "POST".to_string(),
            path: "/users".to_string(),
            base_url: "https://api.test".to_string(),
            description: Some("Create a new user".to_string()),
            parameters: Vec::new(),
        }];
        let prompt = build_prompt("Onboard Ada", &catalog);
        assert!(prompt.contains("Goal:\nOnboard Ada"));
        assert!(prompt.contains("\"operation_id\": \"createUser\""));
        assert!(prompt.contains("Create a new user"));
        assert!(!prompt.contains("https://api.test"));
        assert!(prompt.contains("${ctx.<name>_id}"));
    }
}
