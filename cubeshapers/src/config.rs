//! Configuration system for Cubeshape.
//!
//! Supports TOML-based configuration. Dataset definitions are not configurable;
//! they are compiled in (see [`crate::catalog`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CubeshapeError, Result};

pub const DEFAULT_ROW_LIMIT: i64 = 1000;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CubeshapeConfig {
    pub query: QueryConfig,
    pub identity: IdentityConfig,
}

/// Query shaping configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Row cap applied when a dataset declares no security policy (default: 1000).
    pub default_row_limit: i64,
}

/// Claim names used to resolve the caller, in preference order.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct IdentityConfig {
    pub tenant_claims: Vec<String>,
    pub user_claims: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            tenant_claims: vec![
                "tenant_id".to_string(),
                "http://schemas.microsoft.com/identity/claims/tenantid".to_string(),
            ],
            user_claims: vec![
                "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier".to_string(),
                "sub".to_string(),
            ],
        }
    }
}

impl CubeshapeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CubeshapeError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(toml_str)
            .map_err(|e| CubeshapeError::Config(format!("failed to parse config: {e}")))?;
        if cfg.query.default_row_limit < 1 {
            return Err(CubeshapeError::Config(format!(
                "query.default_row_limit must be at least 1, got {}",
                cfg.query.default_row_limit
            )));
        }
        Ok(cfg)
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `CUBESHAPE_CONFIG` environment variable
    /// 2. `./cubeshape.toml` (current directory)
    /// 3. `~/.config/cubeshape/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("CUBESHAPE_CONFIG") {
            match Self::from_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded config from CUBESHAPE_CONFIG");
                    return cfg;
                }
                Err(e) => tracing::warn!(path = %path, error = %e, "ignoring CUBESHAPE_CONFIG"),
            }
        }

        if let Ok(cfg) = Self::from_file("cubeshape.toml") {
            tracing::info!("loaded config from ./cubeshape.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("cubeshape").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }
}
