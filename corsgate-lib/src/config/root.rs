use serde::Deserialize;
use std::net::SocketAddr;

use super::policy::{CorsConfig, OriginPolicy};
use super::telemetry::LoggingConfig;
use super::timeout::TimeoutConfig;
use super::upstream::{PoolConfig, UpstreamConfig};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Address and port to listen on
    /// Example: "127.0.0.1:8080" or "0.0.0.0:8080"
    /// Default: "127.0.0.1:8080"
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Upstream backend the gateway forwards every request to
    pub upstream: UpstreamConfig,
    /// Origin allow policy
    /// Options: "permissive" (Allow-Origin: *), "localhost-only" (echo
    /// localhost origins and allow credentials)
    /// Default: "localhost-only"
    #[serde(default)]
    pub origin_policy: OriginPolicy,
    /// Rewrite upstream Set-Cookie headers so session cookies issued by an
    /// HTTPS upstream survive on an insecure local origin:
    /// strip Secure, strip Domain, SameSite=Lax becomes SameSite=None.
    /// Default: true
    #[serde(default = "default_true")]
    pub cookie_rewrite: bool,
    /// CORS response header lists
    #[serde(default)]
    pub cors: CorsConfig,
    /// Timeout configuration
    #[serde(default)]
    pub timeout: TimeoutConfig,
    /// Upstream connection pool configuration
    #[serde(default)]
    pub pool: PoolConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_true() -> bool {
    true
}
