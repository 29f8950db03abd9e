use crate::config::AppConfig;
use crate::kv::{self, Store};
use crate::logging::{self, LogFormat};
use crate::server::{AppService, HttpServer};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for kittymux
#[derive(Parser)]
#[command(name = "kittymux")]
#[command(about = "Segment-matching HTTP router serving an in-memory key-value store", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the key-value HTTP server
    Serve(ServeArgs),
    /// Print the registered routes in match order
    Routes,
}

/// Flags for `serve`. Each one overrides the config file and environment.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub addr: Option<String>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    pub log_level: Option<String>,

    /// json or pretty
    #[arg(long)]
    pub log_format: Option<String>,
}

impl ServeArgs {
    /// Layer these flags over `config`.
    #[must_use]
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(addr) = &self.addr {
            config.server.addr.clone_from(addr);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = &self.log_format {
            config.logging.format = LogFormat::parse(format);
        }
        config
    }
}

/// Parse the process arguments and run the selected command.
///
/// # Errors
///
/// Propagates configuration, logging and server start-up failures.
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Run an already-parsed command line.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => serve(&args),
        Commands::Routes => {
            let dispatcher = kv::build_dispatcher(&Arc::new(Store::new()));
            for route in dispatcher.routes() {
                println!("{:<7} {}", route.method(), route.pattern());
            }
            Ok(())
        }
    }
}

fn serve(args: &ServeArgs) -> Result<()> {
    let config = args.apply(AppConfig::resolve(args.config.as_deref())?);
    logging::init_logging_with_config(&config.log_config())?;

    may::config().set_stack_size(config.server.stack_size);
    info!(
        stack_size = config.server.stack_size,
        log_level = %config.logging.level,
        "Runtime configured"
    );

    let store = Arc::new(Store::new());
    let dispatcher = kv::build_dispatcher(&store);
    info!(routes = dispatcher.routes().len(), "Routes registered");

    let handle = HttpServer(AppService::new(Arc::new(dispatcher)))
        .start(config.server.addr.as_str())
        .with_context(|| format!("Failed to bind {}", config.server.addr))?;
    handle.wait_ready().context("Server did not become ready")?;
    info!(address = %handle.addr(), "kittymux ready");

    handle
        .join()
        .map_err(|e| anyhow!("Server coroutine panicked: {e:?}"))
}
