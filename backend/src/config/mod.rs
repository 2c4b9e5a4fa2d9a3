//! Configuration module for the Amplify site backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Work factor bounds accepted by bcrypt.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (content, users and sessions)
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Session inactivity expiry in hours
    pub session_ttl_hours: i64,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Administrator account created on first startup
    pub admin_username: String,
    pub admin_password: String,
}

/// A configuration variable that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("AMPLIFY_DB_PATH")
            .unwrap_or_else(|| "./data/amplify.sqlite".to_string())
            .into();

        let bind_addr = parse_var(&lookup, "AMPLIFY_BIND_ADDR", "127.0.0.1:3000")?;
        let log_level = lookup("AMPLIFY_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_format = parse_var(&lookup, "AMPLIFY_LOG_FORMAT", "pretty")?;
        let session_ttl_hours: i64 = parse_var(&lookup, "AMPLIFY_SESSION_TTL_HOURS", "24")?;
        if session_ttl_hours <= 0 {
            return Err(ConfigError {
                key: "AMPLIFY_SESSION_TTL_HOURS",
                value: session_ttl_hours.to_string(),
            });
        }

        let cookie_secure = parse_var(&lookup, "AMPLIFY_COOKIE_SECURE", "false")?;

        let bcrypt_cost: u32 = parse_var(&lookup, "AMPLIFY_BCRYPT_COST", "10")?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError {
                key: "AMPLIFY_BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let admin_username =
            lookup("AMPLIFY_ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string());
        let admin_password =
            lookup("AMPLIFY_ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_format,
            session_ttl_hours,
            cookie_secure,
            bcrypt_cost,
            admin_username,
            admin_password,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|_| ConfigError { key, value: raw })
}
