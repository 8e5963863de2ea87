use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use romsplit::application::dto::PARALLEL_ENV;
use romsplit::application::ProgressCallback;
use romsplit::presentation::cli::{print_summary, Cli, ProgressReporter};
use romsplit::{LocalSplitWriter, SignatureRegistry, StripHeadersUseCase};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let parallel_env = std::env::var(PARALLEL_ENV).ok();
    let options = cli.options(parallel_env.as_deref());

    let use_case =
        StripHeadersUseCase::new(SignatureRegistry::console_headers(), LocalSplitWriter::new());

    let reporter = if cli.path.is_dir() {
        ProgressReporter::for_batch()
    } else {
        ProgressReporter::hidden()
    };
    let on_outcome = reporter.outcome_callback();
    let callback: &ProgressCallback = &on_outcome;

    let report = match use_case.process(&cli.path, &options, Some(callback)) {
        Ok(report) => report,
        Err(e) if e.is_usage() => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to process {}", cli.path.display()));
        }
    };

    reporter.finish();
    print_summary(&report);

    if report.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
