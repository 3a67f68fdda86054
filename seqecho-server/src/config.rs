//! Server configuration from the process environment
//!
//! - HOST (default 0.0.0.0)
//! - PORT (default 3000)
//! - SEQECHO_VERBOSE: debug-level logging when truthy
//! - SEQECHO_MAX_PREDICT: cap on predictCount (default 10)
//! - SEQECHO_MEMORIES_LIMIT: memories returned by GET /memories (default 50)
//! - SEQECHO_HISTORY_CAPACITY: keep at most this many memories (default unbounded)

use seqecho::EchoConfig;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid listen address '{0}'")]
    Address(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub verbose: bool,
    pub engine: EchoConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(v) => parse_var("PORT", &v, "a port number")?,
            None => DEFAULT_PORT,
        };
        let verbose = match lookup("SEQECHO_VERBOSE") {
            Some(v) => parse_flag("SEQECHO_VERBOSE", &v)?,
            None => false,
        };

        let mut engine = EchoConfig::default();
        if let Some(v) = lookup("SEQECHO_MAX_PREDICT") {
            engine = engine.with_max_predict_count(parse_var("SEQECHO_MAX_PREDICT", &v, "a positive integer")?);
        }
        if let Some(v) = lookup("SEQECHO_MEMORIES_LIMIT") {
            engine = engine.with_memories_limit(parse_var("SEQECHO_MEMORIES_LIMIT", &v, "a non-negative integer")?);
        }
        if let Some(v) = lookup("SEQECHO_HISTORY_CAPACITY") {
            let cap: usize = parse_var("SEQECHO_HISTORY_CAPACITY", &v, "a positive integer")?;
            engine = engine.with_history_capacity(Some(cap));
        }

        Ok(Self { host, port, verbose, engine })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let text = format!("{}:{}", self.host, self.port);
        text.parse().map_err(|_| ConfigError::Address(text))
    }

    /// Filter used when RUST_LOG is not set
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "seqecho=debug,seqecho_server=debug,tower_http=debug"
        } else {
            "seqecho=info,seqecho_server=info,tower_http=info"
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
        expected,
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            expected: "a boolean flag",
        }),
    }
}
