use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::llm::{LlmError, TextGenerator};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: SecretString) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(api_key: SecretString, base_url: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("composer-exec/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| LlmError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }
        first_text(&body)
    }
}

fn first_text(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Decode(e.to_string()))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"},{"text":"ignored"}]}}]}"#;
        assert_eq!(first_text(body).unwrap(), "hello");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        assert!(matches!(first_text(r#"{"candidates":[]}"#), Err(LlmError::EmptyResponse)));
        assert!(matches!(first_text("{}"), Err(LlmError::EmptyResponse)));
        assert!(matches!(first_text("not json"), Err(LlmError::Decode(_))));
    }

    #[test]
    fn endpoint_uses_model_action() {
        let client = GeminiClient::with_base_url(SecretString::from("k".to_string()), "http://localhost:9/v1beta/")
            .unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash-lite"),
            "http://localhost:9/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let client = GeminiClient::new(SecretString::from("super-secret".to_string())).unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
