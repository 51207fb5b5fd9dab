//! Configuration for SEO Roaster.
//!
//! Read from `$SEO_ROASTER_CONFIG` when set, else
//! `~/.seo-roaster/config.toml`. A missing file means defaults.
//!
//! ```toml
//! [fetch]
//! timeout_seconds = 10
//! max_redirects = 5
//!
//! [fetch.security]
//! blocked_cidrs = ["203.0.113.0/24"]
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! timeout_seconds = 8
//!
//! [server.rate_limit]
//! max_requests = 10
//! window_seconds = 60
//! ```

use std::env;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use roaster_fetch::{FetchConfig, SecurityConfig};
use serde::Deserialize;
use thiserror::Error;

const ENV_CONFIG_PATH: &str = "SEO_ROASTER_CONFIG";
const ENV_PORT: &str = "PORT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoasterConfig {
    pub fetch: Option<FetchConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid server bind address '{0}'")]
    InvalidBind(String),
}

impl RoasterConfig {
    /// Load from the default location. Missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no home directory; using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, source);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn fetch(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
}

/// `$SEO_ROASTER_CONFIG`, else `~/.seo-roaster/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ENV_CONFIG_PATH).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".seo-roaster").join("config.toml"))
}

/// `[server]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Listen address. Default: `127.0.0.1:8080`; `PORT` overrides the port.
    pub bind: Option<String>,

    /// Per-request fetch timeout for analyses. Default: 8.
    pub timeout_seconds: Option<u32>,

    /// Longest URL accepted by `/analyze`. Default: 2048.
    pub max_url_length: Option<usize>,

    pub rate_limit: Option<RateLimitConfig>,

    /// Key rate limits on the first `X-Forwarded-For` entry. Default: true.
    pub trust_forwarded_for: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client per window. Default: 10.
    pub max_requests: Option<u32>,

    /// Window length in seconds. Default: 60.
    pub window_seconds: Option<u64>,
}

impl ServerConfig {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:8080";
    pub const DEFAULT_TIMEOUT_SECONDS: u32 = 8;
    pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;
    pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 10;
    pub const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

    /// Resolve to concrete settings, applying `PORT` from the environment.
    pub fn resolve(&self) -> Result<ServerSettings, ConfigError> {
        self.resolve_with_port(env::var(ENV_PORT).ok().as_deref())
    }

    fn resolve_with_port(&self, port: Option<&str>) -> Result<ServerSettings, ConfigError> {
        let raw_bind = self.bind.as_deref().unwrap_or(Self::DEFAULT_BIND);
        let mut bind: SocketAddr = raw_bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBind(raw_bind.to_string()))?;

        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            match port.parse::<u16>() {
                Ok(port) => bind.set_port(port),
                Err(_) => tracing::warn!(port, "ignoring unparsable PORT"),
            }
        }

        let rate_limit = self.rate_limit.clone().unwrap_or_default();

        Ok(ServerSettings {
            bind,
            timeout: Duration::from_secs(u64::from(
                self.timeout_seconds
                    .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
                    .max(1),
            )),
            max_url_length: self
                .max_url_length
                .unwrap_or(Self::DEFAULT_MAX_URL_LENGTH),
            rate_limit_max_requests: rate_limit
                .max_requests
                .unwrap_or(Self::DEFAULT_RATE_LIMIT_MAX_REQUESTS),
            rate_limit_window: Duration::from_secs(
                rate_limit
                    .window_seconds
                    .unwrap_or(Self::DEFAULT_RATE_LIMIT_WINDOW_SECONDS)
                    .max(1),
            ),
            trust_forwarded_for: self.trust_forwarded_for.unwrap_or(true),
        })
    }
}

/// Resolved `[server]` settings. No optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub timeout: Duration,
    pub max_url_length: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    pub trust_forwarded_for: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            timeout: Duration::from_secs(u64::from(ServerConfig::DEFAULT_TIMEOUT_SECONDS)),
            max_url_length: ServerConfig::DEFAULT_MAX_URL_LENGTH,
            rate_limit_max_requests: ServerConfig::DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window: Duration::from_secs(ServerConfig::DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
            trust_forwarded_for: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = RoasterConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.fetch.is_none());
        assert!(config.server.is_none());
        assert_eq!(config.fetch().max_redirects(), 5);
    }

    #[test]
    fn parses_all_sections() {
        let file = write_config(
            r#"
[fetch]
user_agent = "custom/1.0"
timeout_seconds = 3
max_redirects = 2

[fetch.security]
blocked_cidrs = ["203.0.113.0/24"]
allow_loopback = true

[server]
bind = "0.0.0.0:9000"
timeout_seconds = 4
max_url_length = 100
trust_forwarded_for = false

[server.rate_limit]
max_requests = 3
window_seconds = 10
"#,
        );
        let config = RoasterConfig::load_from(file.path()).unwrap();

        let fetch = config.fetch();
        assert_eq!(fetch.user_agent.as_deref(), Some("custom/1.0"));
        assert_eq!(fetch.timeout_seconds(), 3);
        assert_eq!(fetch.max_redirects(), 2);
        let security = fetch.security.expect("security");
        assert!(security.allow_loopback);
        assert_eq!(security.blocked_cidrs.unwrap(), vec!["203.0.113.0/24"]);

        let server = config.server().resolve_with_port(None).unwrap();
        assert_eq!(server.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(server.timeout, Duration::from_secs(4));
        assert_eq!(server.max_url_length, 100);
        assert_eq!(server.rate_limit_max_requests, 3);
        assert_eq!(server.rate_limit_window, Duration::from_secs(10));
        assert!(!server.trust_forwarded_for);
    }

    #[test]
    fn parse_error_reports_path() {
        let file = write_config("[server\nbind = ");
        let err = RoasterConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn server_defaults() {
        let settings = ServerConfig::default().resolve_with_port(None).unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn port_overrides_bind_port() {
        let settings = ServerConfig::default()
            .resolve_with_port(Some("3000"))
            .unwrap();
        assert_eq!(settings.bind, "127.0.0.1:3000".parse().unwrap());

        let settings = ServerConfig::default()
            .resolve_with_port(Some("not-a-port"))
            .unwrap();
        assert_eq!(settings.bind.port(), 8080);
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let config = ServerConfig {
            bind: Some("localhost".into()),
            ..Default::default()
        };
        let err = config.resolve_with_port(None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind(addr) if addr == "localhost"));
    }
}
