use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Service and model configuration (JSON or YAML).
    #[arg(long = "config", default_value = "composer.yaml")]
    pub path: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct StoreArgs {
    /// Run log database URL; overrides COMPOSER_DATABASE_URL and the config file.
    #[arg(long)]
    pub store: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    None,
    Stdout,
    Stderr,
}

#[derive(Debug, Args, Clone)]
pub struct EventsArgs {
    /// Where to write JSON-lines run events.
    #[arg(long, value_enum, default_value_t = EventsMode::None)]
    pub events: EventsMode,
}
