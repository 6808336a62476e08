#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod expressions;
pub mod parser;
pub mod types;

pub use crate::context::{DerivedEntry, RunContext};
pub use crate::error::PlanParseError;
pub use crate::expressions::{Reference, ReferenceError};
pub use crate::parser::{parse_plan_str, strip_code_fences, PlanDraft};
pub use crate::types::{
    ExecutionMode, ExecutionSummary, OperationCatalogEntry, OperationParam, ParamLocation,
    PlanStep, StepResult, WorkflowPlan,
};
