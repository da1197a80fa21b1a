use std::io;

use anyhow::{anyhow, Context, Result};
use common::LogFormat;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `None` leaves the choice to tokio (one worker per core).
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }

/// Where the in-memory product table gets its initial contents.
/// Without a seed file the service starts empty.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` (default `config.toml`) if it exists,
    /// otherwise environment variables:
    /// - `SERVER_HOST` / `SERVER_PORT` for the bind address
    /// - `TOKIO_WORKER_THREADS` for the runtime size
    /// - `PRODUCTS_SEED_PATH` for the seed file
    /// - `LOG_FORMAT` (`compact` | `json`)
    ///
    /// A file that exists but cannot be read, parsed or validated is an error.
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::from_env()),
            Err(e) => return Err(e).with_context(|| format!("cannot read config {path}")),
        };
        let mut cfg = parse(&content).with_context(|| format!("invalid config {path}"))?;
        cfg.normalize_and_validate()
            .with_context(|| format!("invalid config {path}"))?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_PORT);
        let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0);
        let seed_path = std::env::var("PRODUCTS_SEED_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|f| LogFormat::from_name(&f))
            .unwrap_or_default();
        Self {
            server: ServerConfig { host, port, worker_threads },
            storage: StorageConfig { seed_path },
            logging: LoggingConfig { format },
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Some(p) = &self.seed_path {
            if p.trim().is_empty() {
                self.seed_path = None;
            }
        }
        if self.seed_path.is_none() {
            self.seed_path = std::env::var("PRODUCTS_SEED_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            seed_path = "docs/db/json/products.json"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.seed_path.as_deref(), Some("docs/db/json/products.json"));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.storage.seed_path.is_none());
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn normalize_fills_blank_host_and_clears_zero_threads() {
        let mut cfg = parse("[server]\nhost = \"  \"\nport = 81\nworker_threads = 0\n").unwrap();
        cfg.server.normalize().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, None);
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.server.normalize().is_err());
    }

    #[test]
    fn out_of_range_port_fails_to_parse() {
        assert!(parse("[server]\nport = 70000\n").is_err());
    }

    #[test]
    fn file_and_env_agree_on_default_threads() {
        assert_eq!(parse("").unwrap().server.worker_threads, None);
        assert_eq!(ServerConfig::default().worker_threads, None);
    }

    fn temp_config(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("products_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = std::env::temp_dir().join(format!("absent_{}.toml", uuid::Uuid::new_v4()));
        assert!(AppConfig::load_or_env_from(&path.display().to_string()).is_ok());
    }

    #[test]
    fn malformed_or_invalid_file_is_an_error() {
        for contents in ["[server]\nhost = \"0.0.0.0\"\nport = \"not-a-port\"\n", "[server\n", "[server]\nport = 0\n"] {
            let path = temp_config(contents);
            let res = AppConfig::load_or_env_from(&path.display().to_string());
            let _ = std::fs::remove_file(&path);
            assert!(res.is_err(), "{contents:?} should be rejected");
        }
    }

    #[test]
    fn config_path_env_selects_file() {
        let path = temp_config("[server]\nport = \"not-a-port\"\n");
        std::env::set_var("CONFIG_PATH", &path);
        let res = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err();
        assert!(err.to_string().contains("invalid config"), "{err:#}");
    }
}
