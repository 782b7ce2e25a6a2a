//! devshed CLI entry point.
//!
//! Parses arguments, initializes tracing, dispatches to the command
//! implementations, and maps typed errors to exit codes: 0 for success, 2
//! for configuration problems, 3 for resolution failures.

mod cli;
mod commands;

use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let parsed = cli::Cli::parse();
    let code = match commands::run(parsed).await {
        Ok(code) => code,
        Err(err) => {
            let code = cli::exit_code_for(&err);
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}
