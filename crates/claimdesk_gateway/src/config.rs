//! Gateway configuration.
//!
//! # Responsibility
//! - Resolve the upstream base URL and listen address from the environment.
//! - Fail startup loudly on deployment misconfiguration.
//!
//! # Invariants
//! - A missing upstream base URL is a startup error, never a per-request
//!   condition.
//! - The stored base URL carries no trailing slash.

use std::env;

/// Environment variable naming the analysis backend base URL.
pub const UPSTREAM_BASE_URL_VAR: &str = "FASTAPI_BASE_URL";
/// Optional override for the gateway listen address.
pub const BIND_ADDR_VAR: &str = "CLAIMDESK_BIND_ADDR";
/// Optional directory for file-based logs; logging is skipped when unset.
pub const LOG_DIR_VAR: &str = "CLAIMDESK_LOG_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Resolved gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Analysis backend base URL, e.g. `http://127.0.0.1:8000`.
    pub upstream_base_url: String,
    /// Socket address the gateway listens on.
    pub bind_addr: String,
}

impl GatewayConfig {
    /// Builds a config from an explicit upstream base URL.
    pub fn new(upstream_base_url: impl Into<String>) -> Result<Self, String> {
        let upstream_base_url = normalize_base_url(&upstream_base_url.into())?;
        Ok(Self {
            upstream_base_url,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        })
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// - `FASTAPI_BASE_URL` unset, empty, or not an http(s) URL.
    pub fn from_env() -> Result<Self, String> {
        let base = env::var(UPSTREAM_BASE_URL_VAR).map_err(|_| {
            format!("{UPSTREAM_BASE_URL_VAR} must be set to the analysis backend base URL")
        })?;
        let mut config = Self::new(base)?;
        if let Ok(addr) = env::var(BIND_ADDR_VAR) {
            let trimmed = addr.trim();
            if !trimmed.is_empty() {
                config.bind_addr = trimmed.to_string();
            }
        }
        Ok(config)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(format!("{UPSTREAM_BASE_URL_VAR} cannot be empty"));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(format!(
            "{UPSTREAM_BASE_URL_VAR} must be an http(s) URL, got `{trimmed}`"
        ));
    }
    Ok(trimmed.to_string())
}
