mod catalog;
mod plan;
mod result;

pub use catalog::{OperationCatalogEntry, OperationParam, ParamLocation};
pub use plan::{ExecutionMode, PlanStep, WorkflowPlan};
pub use result::{ExecutionSummary, StepResult};
