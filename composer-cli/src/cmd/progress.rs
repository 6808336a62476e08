use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use composer_exec::executor::{Event, EventSink};

/// Single-line step counter on stderr. The total is learned from `RunStarted`.
#[derive(Default)]
pub struct ProgressEventSink {
    total_steps: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    running: AtomicUsize,
}

impl ProgressEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_progress(&self) {
        let completed = self.completed.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let running = self.running.load(Ordering::Relaxed);
        let total = self.total_steps.load(Ordering::Relaxed);
        let done = completed + failed;
        let percent = if total > 0 { (done * 100) / total } else { 0 };
        eprint!(
            "\rProgress: [{}/{}] {}% (✓{} ✗{} →{})",
            done, total, percent, completed, failed, running
        );
    }

    fn step_done(&self) {
        self.running
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| Some(v.saturating_sub(1)))
            .ok();
        self.update_progress();
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        match event {
            Event::RunStarted { steps, .. } => {
                self.total_steps.store(steps, Ordering::Relaxed);
                self.completed.store(0, Ordering::Relaxed);
                self.failed.store(0, Ordering::Relaxed);
                self.running.store(0, Ordering::Relaxed);
            }
            Event::StepStarted { .. } => {
                self.running.fetch_add(1, Ordering::Relaxed);
                self.update_progress();
            }
            Event::StepSucceeded { .. } => {
                self.completed.fetch_add(1, Ordering::Relaxed);
                self.step_done();
            }
            Event::StepFailed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.step_done();
            }
            // A sequential run may stop early, so end the line here.
            Event::RunFinished { .. } => {
                if self.total_steps.load(Ordering::Relaxed) > 0 {
                    eprintln!();
                }
            }
            _ => {}
        }
    }
}
