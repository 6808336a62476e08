use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{ConfigArgs, OutputArgs};

use super::config::ComposerConfig;

pub async fn catalog_cmd(config: ConfigArgs, output: OutputArgs) -> i32 {
    let cfg = match ComposerConfig::load(&config.path) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let catalog = match cfg.build_catalog() {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let entries = catalog.entries();
    if output.format == OutputFormat::Text && !output.quiet {
        for e in &entries {
            let description = e.description.as_deref().unwrap_or("");
            println!(
                "{}\t{}\t{} {}{}\t{}",
                e.service, e.operation_id, e.method, e.base_url, e.path, description
            );
        }
    } else {
        print_result(output.format, output.quiet, &entries);
    }
    exit_codes::SUCCESS
}
