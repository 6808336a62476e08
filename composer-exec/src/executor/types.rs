use std::time::Duration;

/// Per-request timeout applied to every operation call.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub http_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}
