use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use composer_exec::catalog::SpecCatalog;
use composer_exec::executor::{
    CompositeEventSink, EventSink, ExecutorConfig, NoOpEventSink, StderrEventSink,
    StdoutEventSink,
};
use composer_exec::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL};
use secrecy::SecretString;
use serde::Deserialize;

use crate::cmd::progress::ProgressEventSink;
use crate::output::OutputFormat;
use crate::{EventsMode, OutputArgs, StoreArgs};

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DATABASE_URL_ENV: &str = "COMPOSER_DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://composer.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub llm_base_url: Option<String>,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Relative paths are resolved against the config file's directory.
    pub spec: PathBuf,
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_model")]
    pub planner: String,
    #[serde(default = "default_model")]
    pub reporter: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            planner: default_model(),
            reporter: default_model(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

impl ComposerConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
        let mut config: ComposerConfig = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(_) => serde_yaml::from_str(&content)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?,
        };
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for service in &mut config.services {
            if service.spec.is_relative() {
                service.spec = base.join(&service.spec);
            }
        }
        Ok(config)
    }

    /// Like `load`, but a missing file yields an empty configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::empty())
        }
    }

    fn empty() -> Self {
        Self {
            services: Vec::new(),
            models: ModelsConfig::default(),
            llm_base_url: None,
            database_url: None,
            http_timeout_ms: default_http_timeout_ms(),
        }
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm_base_url.as_deref().unwrap_or(DEFAULT_GEMINI_BASE_URL)
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            http_timeout: Duration::from_millis(self.http_timeout_ms),
        }
    }

    /// Load every configured OpenAPI document.
    pub fn build_catalog(&self) -> Result<SpecCatalog, String> {
        let mut catalog = SpecCatalog::new();
        for service in &self.services {
            catalog
                .load_service(&service.name, &service.spec, &service.base_url)
                .map_err(|e| format!("service '{}': {e}", service.name))?;
        }
        Ok(catalog)
    }
}

pub fn load_api_key() -> Option<SecretString> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

/// `--store`, then the environment, then the config file, then the default.
pub fn database_url(store: &StoreArgs, config: &ComposerConfig) -> String {
    store
        .store
        .clone()
        .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// JSON-lines events as requested, plus a progress line in interactive text mode.
pub fn build_event_sink(events: EventsMode, output: &OutputArgs) -> Arc<dyn EventSink> {
    let mut sink = CompositeEventSink::new();
    match events {
        EventsMode::None => {}
        EventsMode::Stdout => sink.add(Box::new(StdoutEventSink)),
        EventsMode::Stderr => sink.add(Box::new(StderrEventSink)),
    }
    if output.format == OutputFormat::Text && !output.quiet && events == EventsMode::None {
        sink.add(Box::new(ProgressEventSink::new()));
    }
    if sink.is_empty() {
        return Arc::new(NoOpEventSink);
    }
    Arc::new(sink)
}
