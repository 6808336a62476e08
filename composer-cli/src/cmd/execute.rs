use std::path::Path;
use std::sync::Arc;

use composer_core::PlanDraft;
use composer_exec::executor::{PlanExecutor, ReqwestHttpClient, StepExecutor};
use composer_exec::export_json;
use composer_store::InMemorySessionStore;

use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{ConfigArgs, EventsArgs, OutputArgs};

use super::config::{build_event_sink, ComposerConfig};

pub async fn execute_cmd(
    plan_path: &Path,
    export: Option<&Path>,
    config: ConfigArgs,
    events: EventsArgs,
    output: OutputArgs,
) -> i32 {
    let content = match std::fs::read_to_string(plan_path) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", plan_path.display()),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let plan = match PlanDraft::parse(&content).and_then(|d| d.into_plan(None)) {
        Ok(p) => p,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("invalid plan: {e}"));
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let cfg = match ComposerConfig::load(&config.path) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let catalog = match cfg.build_catalog() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let http = match ReqwestHttpClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let event_sink = build_event_sink(events.events, &output);
    let steps = StepExecutor::new(catalog, http, event_sink.clone(), cfg.executor_config().http_timeout);
    let executor = PlanExecutor::new(steps, Arc::new(InMemorySessionStore::new()), event_sink);
    let summary = executor.run(&plan).await;

    if let Some(path) = export {
        if let Err(e) = export_json(path, &summary) {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    }
    print_result(output.format, output.quiet, &summary);

    if summary.success {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}
