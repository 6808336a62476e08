use std::sync::Arc;

use composer_core::ExecutionSummary;

use crate::llm::{LlmError, TextGenerator};

/// Turns an execution summary into a Markdown report.
pub struct Reporter {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl Reporter {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub async fn build_report(&self, summary: &ExecutionSummary) -> Result<String, LlmError> {
        let prompt = build_prompt(summary);
        self.generator.generate(&self.model, &prompt).await
    }
}

pub fn build_prompt(summary: &ExecutionSummary) -> String {
    let summary_json = serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    format!(
        "You are a reporting assistant. Given this workflow execution summary, write a concise \
Markdown report for engineers and product managers.\n\n\
Highlight:\n\
- Goal\n\
- Each step and whether it succeeded or failed\n\
- Important IDs or values\n\
- Any errors\n\
- Recommended next actions\n\n\
SUMMARY_JSON:\n{summary_json}"
    )
}
