use anyhow::{Context as _, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use taskd::config::TaskdConfig;
use taskd::rest;
use taskd::service::TaskService;
use taskd::storage::{tasks::TaskStore, Storage};
use taskd::AppContext;

#[derive(Parser)]
#[command(name = "taskd", about = "Single-user task management REST API", version)]
struct Args {
    /// HTTP listen port
    #[arg(long, env = "TASKD_PORT")]
    port: Option<u16>,

    /// SQLite database file path
    #[arg(long, env = "TASKD_DB_PATH")]
    db_path: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASKD_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,

    /// Path to the TOML config file (default: ./taskd.toml)
    #[arg(long, env = "TASKD_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Arc::new(TaskdConfig::new(
        args.port,
        args.db_path,
        args.log,
        args.bind,
        args.config,
    ));

    let _log_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "taskd starting");
    info!(db = %config.db_path.display(), "opening database");

    let storage = Storage::open(&config.db_path, config.slow_query_threshold_ms)
        .await
        .context("could not open database")?;

    let ctx = Arc::new(AppContext {
        config: config.clone(),
        tasks: TaskService::new(TaskStore::new(storage.pool())),
        started_at: std::time::Instant::now(),
    });

    rest::serve(ctx).await
}

/// Initialize the tracing subscriber.
///
/// Returns a `WorkerGuard` that must stay alive for the process lifetime
/// when file logging is enabled.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format)
/// or `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("taskd.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
