mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::error::{exit_code_for, report_error};
use tether_config::{self as config, AppConfig};
use tether_server::AppState;
use tether_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "tether", version, about = "tether personal CRM API server")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Listen address, overrides `server.bind` from the config file
    #[arg(long, global = true)]
    bind: Option<String>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Create or migrate the database, then exit
    #[command(name = "init-db")]
    InitDb,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        bind,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    match command.unwrap_or(Command::Serve) {
        Command::InitDb => {
            let version = store
                .schema_version()
                .with_context(|| "read schema version")?;
            println!(
                "database ready: {} (schema version {version})",
                db_path.display()
            );
            Ok(())
        }
        Command::Serve => {
            let bind = match bind {
                Some(value) => config::parse_bind(&value).with_context(|| "parse --bind")?,
                None => app_config.server.bind,
            };
            serve(store, app_config, bind)
        }
    }
}

fn serve(store: Store, app_config: AppConfig, bind: SocketAddr) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "start async runtime")?;

    runtime.block_on(async move {
        let listener = TcpListener::bind(bind)
            .await
            .with_context(|| format!("bind {bind}"))?;
        let local_addr = listener
            .local_addr()
            .with_context(|| "resolve listen address")?;
        info!(address = %local_addr, title = %app_config.server.title, "listening");

        let state = AppState::new(store, app_config.server.title, app_config.pagination);
        tether_server::serve(listener, state, shutdown_signal())
            .await
            .with_context(|| "serve http")?;
        info!("server stopped");
        Ok(())
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
