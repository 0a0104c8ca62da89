//! contactbook - personal contact book manager
//!
#![doc = "Main entry point for the contactbook CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contactbook::cli::Cli;
use contactbook::commands;
use contactbook::config::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    if !config.display.color {
        colored::control::set_override(false);
    }

    commands::prepare_storage_dirs(&config)?;

    tracing::info!(
        data_file = %config.storage.data_file.display(),
        "Running command"
    );
    commands::execute(&config, cli.command)
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "contactbook=debug"
    } else {
        "contactbook=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
