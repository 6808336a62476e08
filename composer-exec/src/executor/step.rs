use std::sync::Arc;
use std::time::{Duration, Instant};

use composer_core::{DerivedEntry, PlanStep, RunContext, StepResult};

use crate::catalog::SpecCatalog;
use crate::executor::events::{Event, EventSink};
use crate::executor::http::{HttpClient, HttpResponseParts};
use crate::executor::request::build_request;
use crate::executor::response::{decode_body, error_text, is_success};

/// Result of one dispatch plus the context entry it contributes, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub result: StepResult,
    pub derived: Option<DerivedEntry>,
}

impl StepOutcome {
    fn failed(step_id: &str, error: String, started: Instant) -> Self {
        Self {
            result: StepResult::failed(step_id, error, elapsed_ms(started)),
            derived: None,
        }
    }
}

pub struct StepExecutor {
    catalog: Arc<SpecCatalog>,
    http: Arc<dyn HttpClient>,
    event_sink: Arc<dyn EventSink>,
    timeout: Duration,
}

impl StepExecutor {
    pub fn new(
        catalog: Arc<SpecCatalog>,
        http: Arc<dyn HttpClient>,
        event_sink: Arc<dyn EventSink>,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            http,
            event_sink,
            timeout,
        }
    }

    /// Dispatch `step` and fold its derived entry into `context`.
    pub async fn execute(
        &self,
        plan_id: &str,
        step: &PlanStep,
        context: &mut RunContext,
    ) -> StepResult {
        let outcome = self.dispatch(plan_id, step, context).await;
        if let Some(entry) = outcome.derived {
            context.apply(entry);
        }
        outcome.result
    }

    /// Resolve inputs against `context` and perform the call.
    ///
    /// Never fails: resolution problems, transport errors and non-success
    /// statuses all come back as a failed `StepResult`.
    pub async fn dispatch(&self, plan_id: &str, step: &PlanStep, context: &RunContext) -> StepOutcome {
        self.event_sink
            .emit(Event::StepStarted {
                plan_id: plan_id.to_string(),
                step_id: step.id.clone(),
            })
            .await;

        let outcome = self.call(step, context).await;

        let event = if outcome.result.success {
            Event::StepSucceeded {
                plan_id: plan_id.to_string(),
                step_id: step.id.clone(),
                status_code: outcome.result.status_code.unwrap_or_default(),
                duration_ms: outcome.result.duration_ms,
            }
        } else {
            Event::StepFailed {
                plan_id: plan_id.to_string(),
                step_id: step.id.clone(),
                status_code: outcome.result.status_code,
                error: outcome.result.error.clone().unwrap_or_default(),
                duration_ms: outcome.result.duration_ms,
            }
        };
        self.event_sink.emit(event).await;
        outcome
    }

    async fn call(&self, step: &PlanStep, context: &RunContext) -> StepOutcome {
        let started = Instant::now();
        let params = context.resolve_inputs(&step.inputs);

        let op = match self.catalog.resolve(&step.service, &step.operation_id) {
            Ok(op) => op,
            Err(e) => return StepOutcome::failed(&step.id, e.to_string(), started),
        };
        let req = match build_request(&op, &params) {
            Ok(req) => req,
            Err(e) => return StepOutcome::failed(&step.id, e, started),
        };
        match self.http.send(req, self.timeout).await {
            Ok(resp) => classify(step, resp, started),
            Err(e) => StepOutcome::failed(&step.id, e.to_string(), started),
        }
    }
}

fn classify(step: &PlanStep, resp: HttpResponseParts, started: Instant) -> StepOutcome {
    let data = decode_body(&resp.body);
    let success = is_success(resp.status);
    let derived = if success {
        DerivedEntry::from_response(&step.name, &data)
    } else {
        None
    };
    let error = (!success).then(|| error_text(resp.status, &data));
    StepOutcome {
        result: StepResult {
            step_id: step.id.clone(),
            success,
            status_code: Some(resp.status),
            data,
            error,
            duration_ms: elapsed_ms(started),
        },
        derived,
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
