use std::process::ExitCode;

use anyhow::Context;
use benchviz::error::ErrorLabel;
use benchviz::settings::{self, CliOptions};
use benchviz::tracing::{get_subscriber, init_subscriber};
use benchviz::Pipeline;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let options = CliOptions::parse();

    let subscriber = get_subscriber("benchviz", &options.log_level);
    init_subscriber(subscriber);

    let main_span = tracing::info_span!("main");
    let _main_span_guard = main_span.enter();

    let settings = settings::get_settings(&options).context("failed to load benchviz settings")?;

    match Pipeline::new(settings).run() {
        Ok(report) => {
            tracing::info!(
                records_loaded=%report.records_loaded,
                rendered=%report.nr_rendered(),
                skipped=%report.nr_skipped(),
                failed=%report.nr_failed(),
                "benchmark visualization complete."
            );
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            tracing::error!(error=?err, error_label=%err.label(), "failed to load benchmark results.");
            eprintln!("Error: {}", err);
            eprintln!("{}", err.guidance());
            Ok(ExitCode::FAILURE)
        },
    }
}
