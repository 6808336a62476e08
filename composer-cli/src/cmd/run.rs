use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use composer_core::ExecutionSummary;
use composer_exec::executor::{PlanExecutor, ReqwestHttpClient, StepExecutor};
use composer_exec::llm::{GeminiClient, TextGenerator};
use composer_exec::{export_json, Pipeline, PipelineDeps, Planner, Reporter};
use composer_store::{InMemorySessionStore, SessionStore, SqliteRunLog};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ConfigArgs, EventsArgs, OutputArgs, StoreArgs};

use super::config::{build_event_sink, database_url, load_api_key, ComposerConfig, API_KEY_ENV};

#[derive(Serialize)]
struct RunResult<'a> {
    plan_id: &'a str,
    success: bool,
    steps_succeeded: usize,
    steps_failed: usize,
    report: &'a str,
    summary: &'a ExecutionSummary,
}

pub async fn run_cmd(
    goal: Option<String>,
    export: Option<&Path>,
    config: ConfigArgs,
    store: StoreArgs,
    events: EventsArgs,
    output: OutputArgs,
) -> i32 {
    let Some(api_key) = load_api_key() else {
        print_error(
            output.format,
            output.quiet,
            &format!("{API_KEY_ENV} environment variable is not set"),
        );
        return exit_codes::VALIDATION_FAILED;
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

    let goal = match goal {
        Some(g) => g,
        None => match prompt_goal(output.format) {
            Ok(g) => g,
            Err(e) => {
                print_error(output.format, output.quiet, &format!("failed to read goal: {e}"));
                return exit_codes::RUNTIME_ERROR;
            }
        },
    };
    let goal = goal.trim();
    if goal.is_empty() {
        print_error(output.format, output.quiet, "goal must not be empty");
        return exit_codes::VALIDATION_FAILED;
    }

    let run_log = match SqliteRunLog::connect(&database_url(&store, &cfg), 1).await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to open run log: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let generator: Arc<dyn TextGenerator> =
        match GeminiClient::with_base_url(api_key, cfg.llm_base_url()) {
            Ok(g) => Arc::new(g),
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::RUNTIME_ERROR;
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
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let steps = StepExecutor::new(
        catalog.clone(),
        http,
        event_sink.clone(),
        cfg.executor_config().http_timeout,
    );
    let pipeline = Pipeline::new(PipelineDeps {
        catalog,
        planner: Planner::new(generator.clone(), cfg.models.planner.clone()),
        executor: PlanExecutor::new(steps, sessions.clone(), event_sink.clone()),
        reporter: Reporter::new(generator, cfg.models.reporter.clone()),
        sessions,
        run_log,
        event_sink,
    });

    let outcome = match pipeline.run(goal).await {
        Ok(o) => o,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if let Some(path) = export {
        if let Err(e) = export_json(path, &outcome.summary) {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    }

    match output.format {
        OutputFormat::Text => {
            if !output.quiet {
                println!("\n=== REPORT ===\n");
                println!("{}", outcome.report);
            }
        }
        OutputFormat::Json => {
            let summary = &outcome.summary;
            let result = RunResult {
                plan_id: &summary.plan_id,
                success: summary.success,
                steps_succeeded: summary.succeeded_steps(),
                steps_failed: summary.failed_steps(),
                report: &outcome.report,
                summary,
            };
            print_result(output.format, output.quiet, &result);
        }
    }

    if outcome.summary.success {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

/// JSON output keeps stdout machine-readable, so the prompt goes to stderr.
fn prompt_goal(format: OutputFormat) -> std::io::Result<String> {
    let stdin = std::io::stdin();
    match format {
        OutputFormat::Text => read_goal(&mut std::io::stdout(), &mut stdin.lock()),
        OutputFormat::Json => read_goal(&mut std::io::stderr(), &mut stdin.lock()),
    }
}

fn read_goal(prompt: &mut impl Write, input: &mut impl BufRead) -> std::io::Result<String> {
    write!(prompt, "Enter integration goal: ")?;
    prompt.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_goal_prompts_then_reads_one_line() {
        let mut prompt = Vec::new();
        let mut input = std::io::Cursor::new("Onboard Ada\nignored\n");
        let goal = read_goal(&mut prompt, &mut input).unwrap();
        assert_eq!(goal, "Onboard Ada\n");
        assert_eq!(prompt, b"Enter integration goal: ");
    }
}
