#![forbid(unsafe_code)]

use clap::Parser;
use cryptic_resolver::cli::Cli;
use std::process::ExitCode;

fn init_tracing(verbose: u8) {
    // Quiet unless asked: stdout belongs to definitions and progress lines
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::new("off"),
        1 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "cryptic_resolver=info".into()),
        _ => tracing_subscriber::EnvFilter::new("cryptic_resolver=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cryptic_resolver::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cr: error: {e}");
            ExitCode::FAILURE
        }
    }
}
