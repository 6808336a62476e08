use std::sync::Arc;
use std::time::Instant;

use composer_core::{ExecutionMode, ExecutionSummary, RunContext, StepResult, WorkflowPlan};
use composer_store::SessionStore;
use futures_util::future::join_all;

use crate::executor::events::{Event, EventSink};
use crate::executor::step::StepExecutor;

pub struct PlanExecutor {
    steps: StepExecutor,
    sessions: Arc<dyn SessionStore>,
    event_sink: Arc<dyn EventSink>,
}

impl PlanExecutor {
    pub fn new(
        steps: StepExecutor,
        sessions: Arc<dyn SessionStore>,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            steps,
            sessions,
            event_sink,
        }
    }

    pub async fn run(&self, plan: &WorkflowPlan) -> ExecutionSummary {
        let mut context = RunContext::new();
        self.run_with_context(plan, &mut context).await
    }

    /// Execute `plan` against a caller-owned context.
    ///
    /// Sequential plans stop at the first failed step, so `results` may be
    /// shorter than `steps`. Parallel plans launch every step against the
    /// context as it was at launch and merge derived entries afterwards in
    /// declaration order.
    pub async fn run_with_context(
        &self,
        plan: &WorkflowPlan,
        context: &mut RunContext,
    ) -> ExecutionSummary {
        let started = Instant::now();
        self.event_sink
            .emit(Event::RunStarted {
                plan_id: plan.plan_id.clone(),
                steps: plan.steps.len(),
                mode: plan.execution_mode,
            })
            .await;

        let results = match plan.execution_mode {
            ExecutionMode::Sequential => self.run_sequential(plan, context).await,
            ExecutionMode::Parallel => self.run_parallel(plan, context).await,
        };
        let summary = ExecutionSummary::from_results(plan.plan_id.clone(), plan.goal.clone(), results);

        self.event_sink
            .emit(Event::RunFinished {
                plan_id: plan.plan_id.clone(),
                success: summary.success,
                duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            })
            .await;

        let _ = self.sessions.save_summary(summary.clone()).await;
        summary
    }

    async fn run_sequential(&self, plan: &WorkflowPlan, context: &mut RunContext) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            let result = self.steps.execute(&plan.plan_id, step, context).await;
            let failed = !result.success;
            results.push(result);
            if failed {
                break;
            }
        }
        results
    }

    async fn run_parallel(&self, plan: &WorkflowPlan, context: &mut RunContext) -> Vec<StepResult> {
        let snapshot: &RunContext = context;
        let outcomes = join_all(
            plan.steps
                .iter()
                .map(|step| self.steps.dispatch(&plan.plan_id, step, snapshot)),
        )
        .await;

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if let Some(entry) = outcome.derived {
                context.apply(entry);
            }
            results.push(outcome.result);
        }
        results
    }
}
