use std::path::Path;

use composer_exec::{export_csv, export_json, ExportError};
use composer_store::{RunLog, RunRecord, SqliteRunLog};

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ConfigArgs, OutputArgs, StoreArgs};

use super::config::{database_url, ComposerConfig};

pub async fn history_cmd(
    limit: i64,
    export: Option<&Path>,
    config: ConfigArgs,
    store: StoreArgs,
    output: OutputArgs,
) -> i32 {
    let cfg = match ComposerConfig::load_or_default(&config.path) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let run_log = match SqliteRunLog::connect(&database_url(&store, &cfg), 1).await {
        Ok(s) => s,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("failed to open run log: {e}"));
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let records = match run_log.recent(limit).await {
        Ok(r) => r,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if let Some(path) = export {
        if let Err(e) = export_records(path, &records) {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    }

    if output.format == OutputFormat::Text && !output.quiet {
        for r in &records {
            println!(
                "#{} {} [{}] {} | {} | {}",
                r.id,
                r.created_at.format("%Y-%m-%d %H:%M:%S"),
                r.status,
                r.goal,
                r.plan_summary,
                r.apis_used
            );
        }
    } else {
        print_result(output.format, output.quiet, &records);
    }
    exit_codes::SUCCESS
}

fn export_records(path: &Path, records: &[RunRecord]) -> Result<(), ExportError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        export_csv(path, records)
    } else {
        export_json(path, records)
    }
}
