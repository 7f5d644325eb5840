//! Configuration resolved from the environment
//!
//! All settings are read once at process startup through
//! [`PaperlessConfig::from_env`] and passed explicitly into the tool
//! handlers; nothing reads the environment at call time.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ToolError};

/// Default request timeout when `PAPERLESS_TIMEOUT_SECONDS` is unset.
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 30.0;
/// Default page size for document searches.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
/// Upper bound on page sizes sent to Paperless.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Default lookup-cache TTL when `MCP_LOOKUP_CACHE_TTL_SECONDS` is unset.
pub const DEFAULT_LOOKUP_CACHE_TTL_SECONDS: f64 = 300.0;

/// How the HTTP client verifies the Paperless TLS certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerify {
    /// Accept any certificate. The default, matching self-hosted setups.
    Disabled,
    /// Verify against the system trust store.
    Enabled,
    /// Verify against a caller-supplied CA bundle.
    CaBundle(PathBuf),
}

/// Resolved settings for talking to a Paperless-ngx instance.
#[derive(Debug, Clone)]
pub struct PaperlessConfig {
    /// Base URL with any trailing slash stripped.
    pub base_url: String,
    /// API token, sent as `Authorization: Token <value>`.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TLS verification mode.
    pub tls_verify: TlsVerify,
    /// Lookup-cache TTL; zero disables caching entirely.
    pub lookup_cache_ttl: Duration,
    /// Page size used when a request asks for fewer than one item.
    pub default_page_size: u32,
    /// Ceiling applied to requested page sizes and used for lookup fetches.
    pub max_page_size: u32,
}

impl PaperlessConfig {
    /// Resolve configuration from the environment, failing fast on
    /// missing or invalid values.
    pub fn from_env() -> Result<Self> {
        let base_url = read_env("PAPERLESS_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let token = read_env("PAPERLESS_TOKEN").ok_or_else(|| {
            ToolError::Config("Missing required environment variable: PAPERLESS_TOKEN".to_string())
        })?;

        let timeout_seconds = read_env_f64("PAPERLESS_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?;
        if !timeout_seconds.is_finite() || timeout_seconds <= 0.0 {
            return Err(ToolError::Config(
                "PAPERLESS_TIMEOUT_SECONDS must be greater than zero.".to_string(),
            ));
        }

        let ttl_seconds =
            read_env_f64("MCP_LOOKUP_CACHE_TTL_SECONDS", DEFAULT_LOOKUP_CACHE_TTL_SECONDS)?;
        if !ttl_seconds.is_finite() || ttl_seconds < 0.0 {
            return Err(ToolError::Config(
                "MCP_LOOKUP_CACHE_TTL_SECONDS must be zero or greater.".to_string(),
            ));
        }

        let default_page_size = read_env_u32("PAPERLESS_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_page_size = read_env_u32("PAPERLESS_MAX_PAGE_SIZE", MAX_PAGE_SIZE)?;
        if default_page_size < 1 || max_page_size < 1 {
            return Err(ToolError::Config(
                "Page size bounds must be at least 1.".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            token,
            timeout: Duration::from_secs_f64(timeout_seconds),
            tls_verify: resolve_tls_verify(),
            lookup_cache_ttl: Duration::from_secs_f64(ttl_seconds),
            default_page_size,
            max_page_size,
        })
    }

    /// The value of the `Authorization` header sent on every request.
    pub fn auth_header_value(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Whether the lookup cache is enabled at all.
    pub fn cache_enabled(&self) -> bool {
        !self.lookup_cache_ttl.is_zero()
    }
}

/// Read an environment variable, treating blank values as absent.
fn read_env(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_env_f64(name: &str, default: f64) -> Result<f64> {
    match read_env(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| ToolError::Config(format!("{name} must be a number."))),
    }
}

fn read_env_u32(name: &str, default: u32) -> Result<u32> {
    match read_env(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ToolError::Config(format!("{name} must be an integer."))),
    }
}

/// Parse the usual boolean spellings, falling back to `default` for
/// anything unrecognized.
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
    }
}

/// The CA bundle path only takes effect when verification is enabled.
fn resolve_tls_verify() -> TlsVerify {
    let raw = env::var("PAPERLESS_VERIFY_SSL").ok();
    let verify = parse_bool(raw.as_deref(), false);
    if !verify {
        return TlsVerify::Disabled;
    }
    match read_env("PAPERLESS_CA_BUNDLE") {
        Some(bundle) => TlsVerify::CaBundle(PathBuf::from(bundle)),
        None => TlsVerify::Enabled,
    }
}
