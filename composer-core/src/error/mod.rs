use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("failed to parse plan as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plan must be a single JSON object")]
    NotAnObject,
    #[error("duplicate step id: {0}")]
    DuplicateStepId(String),
    #[error("step {index}: field `{field}` must not be empty")]
    EmptyField { index: usize, field: &'static str },
}
