// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SECURITY_ENABLED` | Install the authorization layers | `true` |
//! | `API_MATCHER` | Path prefix that requires authorization | `/api` |
//! | `CLAIMS_HEADER` | Header carrying the gateway-verified JWT payload | `x-jwt-payload` |
//! | `RESOURCE_ACCESS_CLAIM` | Claim holding per-client roles | `resource_access` |
//! | `ROLES_CLAIM` | Role list key inside each client entry | `roles` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use crate::auth::{ClaimExtractor, RESOURCE_ACCESS_CLAIM, ROLES_CLAIM};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SECURITY_ENABLED_ENV: &str = "SECURITY_ENABLED";
pub const API_MATCHER_ENV: &str = "API_MATCHER";
pub const CLAIMS_HEADER_ENV: &str = "CLAIMS_HEADER";
pub const RESOURCE_ACCESS_CLAIM_ENV: &str = "RESOURCE_ACCESS_CLAIM";
pub const ROLES_CLAIM_ENV: &str = "ROLES_CLAIM";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_MATCHER: &str = "/api";
const DEFAULT_CLAIMS_HEADER: &str = "x-jwt-payload";

/// Default `RUST_LOG` filter when the variable is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a port number, got '{value}'")]
    InvalidPort { var: &'static str, value: String },
    #[error("{var} must be true or false, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Which requests need an authorization context and where their claims come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub enabled: bool,
    pub api_matcher: String,
    pub claims_header: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_matcher: DEFAULT_API_MATCHER.to_string(),
            claims_header: DEFAULT_CLAIMS_HEADER.to_string(),
        }
    }
}

impl SecurityConfig {
    /// Whether `path` falls under the protected API prefix.
    ///
    /// Matching is per path segment: `/api` covers `/api` and `/api/v1/...`
    /// but not `/api-doc`.
    pub fn protects(&self, path: &str) -> bool {
        let prefix = self.api_matcher.trim_end_matches('/');
        if prefix.is_empty() {
            return true;
        }

        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub security: SecurityConfig,
    pub extractor: ClaimExtractor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            security: SecurityConfig::default(),
            extractor: ClaimExtractor::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable or `None` when unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(value) => {
                let parsed = value.trim().parse::<u16>();
                parsed.map_err(|_| ConfigError::InvalidPort { var: PORT_ENV, value })?
            }
            None => DEFAULT_PORT,
        };

        let enabled = match lookup(SECURITY_ENABLED_ENV) {
            Some(value) => parse_bool(SECURITY_ENABLED_ENV, value)?,
            None => true,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let security = SecurityConfig {
            enabled,
            api_matcher: non_empty(&lookup, API_MATCHER_ENV, DEFAULT_API_MATCHER)?,
            claims_header: non_empty(&lookup, CLAIMS_HEADER_ENV, DEFAULT_CLAIMS_HEADER)?
                .to_ascii_lowercase(),
        };

        let extractor = ClaimExtractor::new()
            .with_resource_access_key(non_empty(
                &lookup,
                RESOURCE_ACCESS_CLAIM_ENV,
                RESOURCE_ACCESS_CLAIM,
            )?)
            .with_roles_key(non_empty(&lookup, ROLES_CLAIM_ENV, ROLES_CLAIM)?);

        Ok(Self {
            host,
            port,
            log_format,
            security,
            extractor,
        })
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default.to_string()),
    }
}
