use async_trait::async_trait;
use composer_core::ExecutionMode;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PlanGenerated {
        plan_id: String,
        steps: usize,
        mode: ExecutionMode,
    },
    RunStarted {
        plan_id: String,
        steps: usize,
        mode: ExecutionMode,
    },
    StepStarted {
        plan_id: String,
        step_id: String,
    },
    StepSucceeded {
        plan_id: String,
        step_id: String,
        status_code: u16,
        duration_ms: u64,
    },
    StepFailed {
        plan_id: String,
        step_id: String,
        status_code: Option<u16>,
        error: String,
        duration_ms: u64,
    },
    RunFinished {
        plan_id: String,
        success: bool,
        duration_ms: u64,
    },
    ReportGenerated {
        plan_id: String,
    },
}

impl Event {
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::PlanGenerated { .. } => "plan.generated",
            Event::RunStarted { .. } => "run.started",
            Event::StepStarted { .. } => "step.started",
            Event::StepSucceeded { .. } => "step.succeeded",
            Event::StepFailed { .. } => "step.failed",
            Event::RunFinished { .. } => "run.finished",
            Event::ReportGenerated { .. } => "report.generated",
        }
    }

    /// One JSON line per event, tagged with `type`.
    pub fn to_json(&self) -> serde_json::Value {
        let kind = self.type_name();
        match self {
            Event::PlanGenerated { plan_id, steps, mode }
            | Event::RunStarted { plan_id, steps, mode } => {
                json!({ "type": kind, "plan_id": plan_id, "steps": steps, "mode": mode.as_str() })
            }
            Event::StepStarted { plan_id, step_id } => {
                json!({ "type": kind, "plan_id": plan_id, "step_id": step_id })
            }
            Event::StepSucceeded { plan_id, step_id, status_code, duration_ms } => {
                json!({ "type": kind, "plan_id": plan_id, "step_id": step_id, "status_code": status_code, "duration_ms": duration_ms })
            }
            Event::StepFailed { plan_id, step_id, status_code, error, duration_ms } => {
                json!({ "type": kind, "plan_id": plan_id, "step_id": step_id, "status_code": status_code, "error": error, "duration_ms": duration_ms })
            }
            Event::RunFinished { plan_id, success, duration_ms } => {
                json!({ "type": kind, "plan_id": plan_id, "success": success, "duration_ms": duration_ms })
            }
            Event::ReportGenerated { plan_id } => {
                json!({ "type": kind, "plan_id": plan_id })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

/// Keeps stdout free for the report.
pub struct StderrEventSink;

#[async_trait]
impl EventSink for StderrEventSink {
    async fn emit(&self, event: Event) {
        eprintln!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
