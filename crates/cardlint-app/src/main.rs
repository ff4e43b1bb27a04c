use std::path::PathBuf;
use std::process::ExitCode;

use cardlint_app::validate::validate_path;
use cardlint_core::config::load_config;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardlint", version)]
#[command(about = "Validate vCard 3.0 (RFC 2426) files")]
struct Cli {
    /// Print every valid vCard
    #[arg(short, long)]
    verbose: bool,

    /// Do not print warnings
    #[arg(short, long)]
    quiet: bool,

    /// Settings file (defaults to ./cardlint.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Files to validate; `-` reads standard input
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let config = load_config(cli.config.as_deref())?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    let show_warnings = config.report.show_warnings && !cli.quiet;
    let mut failed = false;

    for path in &cli.paths {
        let report = match validate_path(path) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Skipping file");
                eprintln!("{e}");
                failed = true;
                continue;
            }
        };

        if show_warnings {
            for warning in &report.warnings {
                eprintln!("{path}:{}: {}", warning.line, warning.warning);
            }
        }

        if cli.verbose {
            for card in &report.cards {
                print!("{card}");
            }
        }

        if !report.is_valid() {
            println!("{report}\n");
            failed = true;
        } else if config.report.warnings_as_errors && !report.warnings.is_empty() {
            failed = true;
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
