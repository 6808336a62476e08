use async_trait::async_trait;
use composer_core::{ExecutionSummary, WorkflowPlan};

use crate::store::types::{NewRunRecord, RunRecord};

/// Plans and execution summaries addressable by plan id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save_plan(&self, plan: WorkflowPlan) -> Result<(), StoreError>;

    async fn get_plan(&self, plan_id: &str) -> Result<Option<WorkflowPlan>, StoreError>;

    /// Replaces any earlier summary for the same plan id.
    async fn save_summary(&self, summary: ExecutionSummary) -> Result<(), StoreError>;

    async fn get_summary(&self, plan_id: &str) -> Result<Option<ExecutionSummary>, StoreError>;
}

/// Append-only history of composer runs.
#[async_trait]
pub trait RunLog: Send + Sync {
    /// Returns the id of the inserted record.
    async fn append(&self, record: NewRunRecord) -> Result<i64, StoreError>;

    /// Newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<RunRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Other(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Other(e.to_string())
    }
}
