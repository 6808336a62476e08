use std::sync::Arc;

use composer_core::{ExecutionSummary, WorkflowPlan};
use composer_store::{NewRunRecord, RecordStatus, RunLog, SessionStore, StoreError};

use crate::catalog::SpecCatalog;
use crate::executor::{Event, EventSink, PlanExecutor};
use crate::llm::LlmError;
use crate::planner::{Planner, PlannerError};
use crate::reporter::Reporter;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("report generation failed: {0}")]
    Reporter(#[source] LlmError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub plan: WorkflowPlan,
    pub summary: ExecutionSummary,
    pub report: String,
}

pub struct PipelineDeps {
    pub catalog: Arc<SpecCatalog>,
    pub planner: Planner,
    pub executor: PlanExecutor,
    pub reporter: Reporter,
    pub sessions: Arc<dyn SessionStore>,
    pub run_log: Arc<dyn RunLog>,
    pub event_sink: Arc<dyn EventSink>,
}

/// Plan, execute and report one goal.
pub struct Pipeline {
    deps: PipelineDeps,
}

impl Pipeline {
    pub fn new(deps: PipelineDeps) -> Self {
        Self { deps }
    }

    pub async fn run(&self, goal: &str) -> Result<PipelineOutcome, PipelineError> {
        let d = &self.deps;
        let entries = d.catalog.entries();
        let plan = d.planner.generate_plan(goal, &entries).await?;

        d.run_log
            .append(NewRunRecord {
                goal: plan.goal.clone(),
                plan_summary: plan.describe(),
                apis_used: plan.apis_used(),
                status: RecordStatus::Planned,
            })
            .await?;
        d.event_sink
            .emit(Event::PlanGenerated {
                plan_id: plan.plan_id.clone(),
                steps: plan.steps.len(),
                mode: plan.execution_mode,
            })
            .await;
        d.sessions.save_plan(plan.clone()).await?;

        let summary = d.executor.run(&plan).await;

        let report = d
            .reporter
            .build_report(&summary)
            .await
            .map_err(PipelineError::Reporter)?;
        d.run_log
            .append(NewRunRecord {
                goal: summary.goal.clone(),
                plan_summary: format!("{} executed steps", summary.results.len()),
                apis_used: "N/A".to_string(),
                status: RecordStatus::from_success(summary.success),
            })
            .await?;
        d.event_sink
            .emit(Event::ReportGenerated {
                plan_id: plan.plan_id.clone(),
            })
            .await;

        Ok(PipelineOutcome {
            plan,
            summary,
            report,
        })
    }
}
