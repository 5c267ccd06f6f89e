//! Toolgun Entry Point
//!
//! This is the main entry point for the toolgun. It parses the command line,
//! loads configuration, initializes logging, and runs the control loop with
//! the configured input source.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use toolgun::core::{App, Clock, Config, InputService, RunOptions, SystemClock, run};
use toolgun::domains::tools::ToolRegistry;

mod cli;

use cli::{Cli, Commands};

/// Capacity of the input event queue.
const EVENT_QUEUE: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    if command == Commands::Schema {
        let schema = ToolRegistry::schema()?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    // Load configuration from file and environment
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting toolgun v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded configuration from {}", cli.config.display());
    info!("Content directory: {}", config.content.root.display());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut app = App::new(&config, clock).context("failed to start")?;

    if command == Commands::Check {
        println!(
            "Configuration OK: {} tools ({})",
            app.registry().len(),
            app.registry().names().join(", ")
        );
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(EVENT_QUEUE);
    let input = InputService::new(config.input.clone());
    tokio::spawn(async move {
        if let Err(e) = input.run(tx).await {
            error!("Input stopped: {}", e);
        }
    });

    app.startup();

    let options = RunOptions {
        tick_period: config.timing.tick_period(),
        log_drop: cli.log_drop,
    };
    run(app, rx, options).await;

    info!("Toolgun shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
