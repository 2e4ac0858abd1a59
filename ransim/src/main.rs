#[cfg(unix)]
mod signals;

use clap::Parser;
use ransim_core::config::{
    DEFAULT_FILE_COUNT, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_REPORT_INTERVAL,
};
use ransim_core::{CancelToken, RunReport, SimOptions, simulate};
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about = "ransomware file-activity simulator", long_about = None)]
struct Cli {
    /// How many files to seed and then encrypt in place
    #[arg(long, default_value_t = DEFAULT_FILE_COUNT)]
    files: usize,

    /// Smallest seeded file, in bytes
    #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
    min_size: u64,

    /// Largest seeded file, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: u64,

    /// Progress line cadence, in files
    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    report_every: u64,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the report lines that
    // detector harnesses parse.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ransim_core=info,ransim=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = SimOptions {
        file_count: cli.files,
        min_size: cli.min_size,
        max_size: cli.max_size,
        report_interval: cli.report_every,
        ..Default::default()
    };

    match run(&opts) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            eprintln!("setup failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &SimOptions) -> ransim_core::Result<RunReport> {
    let token = CancelToken::new();

    #[cfg(unix)]
    signals::spawn_watcher(token.clone())?;

    let mut out = std::io::stdout().lock();
    simulate(opts, &token, &mut out)
}
