use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use composer_core::{ExecutionSummary, WorkflowPlan};
use tokio::sync::RwLock;

use crate::store::{NewRunRecord, RunLog, RunRecord, SessionStore, StoreError};

#[derive(Default)]
pub struct InMemorySessionStore {
    plans: RwLock<HashMap<String, WorkflowPlan>>,
    summaries: RwLock<HashMap<String, ExecutionSummary>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_plan(&self, plan: WorkflowPlan) -> Result<(), StoreError> {
        self.plans.write().await.insert(plan.plan_id.clone(), plan);
        Ok(())
    }

    async fn get_plan(&self, plan_id: &str) -> Result<Option<WorkflowPlan>, StoreError> {
        Ok(self.plans.read().await.get(plan_id).cloned())
    }

    async fn save_summary(&self, summary: ExecutionSummary) -> Result<(), StoreError> {
        self.summaries
            .write()
            .await
            .insert(summary.plan_id.clone(), summary);
        Ok(())
    }

    async fn get_summary(&self, plan_id: &str) -> Result<Option<ExecutionSummary>, StoreError> {
        Ok(self.summaries.read().await.get(plan_id).cloned())
    }
}

/// Run log kept in process memory; used when no database is configured.
#[derive(Default)]
pub struct InMemoryRunLog {
    records: RwLock<Vec<RunRecord>>,
}

impl InMemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunLog for InMemoryRunLog {
    async fn append(&self, record: NewRunRecord) -> Result<i64, StoreError> {
        let mut records = self.records.write().await;
        let id = records.len() as i64 + 1;
        records.push(RunRecord {
            id,
            goal: record.goal,
            plan_summary: record.plan_summary,
            apis_used: record.apis_used,
            status: record.status.as_str().to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<RunRecord>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
