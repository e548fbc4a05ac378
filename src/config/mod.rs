use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Authentication policy knobs. The lockout threshold and duration are
/// deliberately configuration rather than hardcoded constants.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Failed logins tolerated before the account locks (default: 5)
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    /// How long a locked account stays locked, in seconds (default: 2 hours)
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,
    /// Session lifetime without "remember me", in seconds (default: 1 day)
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Session lifetime with "remember me", in seconds (default: 30 days)
    #[serde(default = "default_remember_me_ttl_secs")]
    pub remember_me_ttl_secs: u64,
    /// Minimum accepted password length (default: 6)
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: default_max_login_attempts(),
            lockout_secs: default_lockout_secs(),
            session_ttl_secs: default_session_ttl_secs(),
            remember_me_ttl_secs: default_remember_me_ttl_secs(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_max_login_attempts() -> u32 {
    5
}

fn default_lockout_secs() -> u64 {
    2 * 60 * 60
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_remember_me_ttl_secs() -> u64 {
    30 * 24 * 60 * 60
}

fn default_min_password_length() -> usize {
    6
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    /// General API requests allowed per window per client IP
    #[serde(default = "default_api_requests_per_window")]
    pub api_requests_per_window: u32,
    /// Auth requests allowed per window per client IP
    #[serde(default = "default_auth_requests_per_window")]
    pub auth_requests_per_window: u32,
    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            api_requests_per_window: default_api_requests_per_window(),
            auth_requests_per_window: default_auth_requests_per_window(),
            window_seconds: default_window_seconds(),
        }
    }
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_api_requests_per_window() -> u32 {
    120
}

fn default_auth_requests_per_window() -> u32 {
    20
}

fn default_window_seconds() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_policy() {
        let config = Config::default();
        assert_eq!(config.auth.max_login_attempts, 5);
        assert_eq!(config.auth.lockout_secs, 7200);
        assert_eq!(config.auth.session_ttl_secs, 86400);
        assert_eq!(config.auth.remember_me_ttl_secs, 2_592_000);
        assert_eq!(config.auth.min_password_length, 6);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [auth]
            max_login_attempts = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.max_login_attempts, 3);
        assert_eq!(config.auth.lockout_secs, 7200);
        assert!(config.rate_limit.enabled);
    }
}
