//! VaaS backend lifecycle hook.
//!
//! Keeps a VaaS (Varnish-as-a-Service) backend in sync with the lifecycle
//! of one scheduled task.
//!
//! # Architecture Overview
//!
//! ```text
//!   executor ──JSON lines──▶ lifecycle::runner ──▶ hook::handle_event
//!                                                      │
//!                          ┌───────────────────────────┼──────────────────────┐
//!                          ▼                           ▼                      ▼
//!                   AfterTaskHealthy            BeforeTerminate          other kinds
//!                   register.rs                 deregister.rs            (ignored)
//!                          │                           │
//!                          ▼                           ▼
//!                   vaas::ControlPlane ◀──────── delete_backend
//!                    add_backend (sync | async)
//!                          │ async
//!                          ▼
//!                   poller.rs: task_status every interval, deadline races loop
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vaas_hook::config::load_config;
use vaas_hook::lifecycle::{run_events, signals, startup, Shutdown};

#[derive(Parser)]
#[command(name = "vaas-hook")]
#[command(
    about = "Registers a task as a VaaS backend for as long as it is healthy",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "VAAS_HOOK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle lifecycle events read from stdin, one JSON object per line
    Run,
    /// Validate configuration and print the effective settings
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate => {
            // api_key is redacted by VaasConfig's Debug impl.
            println!("{:#?}", config);
        }
        Commands::Run => {
            let mut hook = startup::start(&config)?;

            let shutdown = Shutdown::new();
            let listener = signals::spawn_signal_listener(shutdown.clone());

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let summary = run_events(&mut hook, stdin, shutdown.subscribe()).await?;
            listener.abort();

            tracing::info!(
                handled = summary.handled,
                failed = summary.failed,
                malformed = summary.malformed,
                "VaaS hook exited"
            );
        }
    }

    Ok(())
}
