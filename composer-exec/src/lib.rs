#![forbid(unsafe_code)]

//! Runtime for composed API workflows: OpenAPI catalog, plan execution,
//! and the planner/reporter adapters around a text-generation service.

pub mod catalog;
pub mod executor;
pub mod export;
pub mod llm;
pub mod pipeline;
pub mod planner;
pub mod reporter;

pub use crate::catalog::{CatalogError, OpenApiSpec, ResolvedOperation, SpecCatalog};
pub use crate::executor::{ExecutorConfig, PlanExecutor, StepExecutor};
pub use crate::export::{export_csv, export_json, ExportError};
pub use crate::llm::{GeminiClient, LlmError, TextGenerator};
pub use crate::pipeline::{Pipeline, PipelineDeps, PipelineError, PipelineOutcome};
pub use crate::planner::{Planner, PlannerError};
pub use crate::reporter::Reporter;
