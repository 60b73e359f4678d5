//! RecSPL front end CLI entry point

use clap::Parser;

fn main() {
    let cli = recspl::cli::Cli::parse();

    // Initialize structured logging with env-based filter, defaulting to info (debug with -v)
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();

    recspl::cli::run(cli);
}
