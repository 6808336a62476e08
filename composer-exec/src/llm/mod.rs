//! Text-generation seam used by the planner and reporter.

mod gemini;

use async_trait::async_trait;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("text generation request failed: {0}")]
    Http(String),
    #[error("text generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text generation service returned no text")]
    EmptyResponse,
    #[error("failed to decode text generation response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}
