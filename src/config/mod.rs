use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "data/tasks.db";
const DEFAULT_CONFIG_PATH: &str = "taskd.toml";
const DEFAULT_SLOW_QUERY_MS: u64 = 100;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `taskd.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP listen port (default: 8080).
    port: Option<u16>,
    /// SQLite database file path (default: data/tasks.db).
    db_path: Option<PathBuf>,
    /// Log level filter string, e.g. "debug", "info,taskd=trace" (default: "info").
    log: Option<String>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
    /// Log SQLite statements slower than this many milliseconds (0 = disabled; default: 100).
    slow_query_threshold_ms: Option<u64>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file — using defaults");
            None
        }
    }
}

// ─── TaskdConfig ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TaskdConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub log: String,
    /// Bind address for the HTTP server (TASKD_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Slow-statement logging threshold in milliseconds (0 = disabled).
    pub slow_query_threshold_ms: u64,
}

impl TaskdConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file (default: ./taskd.toml)
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        db_path: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let toml = load_toml(&config_path).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let db_path = db_path
            .or(toml.db_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log_format = std::env::var("TASKD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let slow_query_threshold_ms = toml
            .slow_query_threshold_ms
            .unwrap_or(DEFAULT_SLOW_QUERY_MS);

        Self {
            port,
            db_path,
            log,
            bind_address,
            log_format,
            slow_query_threshold_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_no_toml() {
        let dir = TempDir::new().unwrap();
        let cfg = TaskdConfig::new(None, None, None, None, Some(dir.path().join("missing.toml")));
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(cfg.slow_query_threshold_ms, DEFAULT_SLOW_QUERY_MS);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskd.toml");
        std::fs::write(&path, "port = 9999\nlog = \"debug\"\n").unwrap();
        let cfg = TaskdConfig::new(None, None, None, None, Some(path));
        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.log, "debug");
        // Fields absent from the file keep their defaults.
        assert_eq!(cfg.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_cli_beats_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskd.toml");
        std::fs::write(&path, "port = 9999\n").unwrap();
        let cfg = TaskdConfig::new(Some(4000), None, None, None, Some(path));
        assert_eq!(cfg.port, 4000);
    }

    #[test]
    fn test_unparseable_toml_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskd.toml");
        std::fs::write(&path, "port = \"not a number").unwrap();
        let cfg = TaskdConfig::new(None, None, None, None, Some(path));
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
