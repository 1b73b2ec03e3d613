use http::uri::{Authority, Scheme, Uri};
use serde::Deserialize;
use std::fmt;

use crate::error::{ProxyError, Result};

/// Upstream backend configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the backend every request is forwarded to.
    /// Must include the scheme; must not carry a path.
    /// Example: "https://staging.example.odoo.com" or "http://10.0.0.5:8069"
    pub url: String,
}

/// Parsed, validated upstream target
///
/// Built once at startup from [`UpstreamConfig::url`] so the per-request
/// path never re-parses the URL.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
}

impl UpstreamTarget {
    pub fn from_url(url: &str) -> Result<Self> {
        let uri: Uri = url.parse()?;
        let scheme = uri.scheme().cloned().ok_or_else(|| {
            ProxyError::Config(format!("upstream URL must include a scheme: {url}"))
        })?;
        if scheme != Scheme::HTTP && scheme != Scheme::HTTPS {
            return Err(ProxyError::Config(format!(
                "upstream URL scheme must be http or https, got: {scheme}"
            )));
        }
        let authority = uri.authority().cloned().ok_or_else(|| {
            ProxyError::Config(format!("upstream URL must include a host: {url}"))
        })?;
        match uri.path() {
            "" | "/" => {}
            path => {
                return Err(ProxyError::Config(format!(
                    "upstream URL must not carry a path, got: {path}"
                )))
            }
        }
        Ok(Self { scheme, authority })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::HTTPS
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// Configuration for the upstream connection pool
///
/// The gateway reuses TCP (and TLS) connections to the upstream across
/// requests; idle connections are dropped after a timeout so sockets
/// never leak.
#[derive(Debug, Deserialize, Clone)]
pub struct PoolConfig {
    /// Idle timeout in seconds for pooled connections
    /// Default: 90 seconds
    #[serde(default = "default_pool_idle_timeout")]
    pub idle_timeout: u64,
    /// Maximum number of idle connections to keep for the upstream host
    /// 0 = unlimited (hyper default)
    /// Default: 0
    #[serde(default)]
    pub pool_max_idle_per_host: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { idle_timeout: default_pool_idle_timeout(), pool_max_idle_per_host: 0 }
    }
}

fn default_pool_idle_timeout() -> u64 {
    90
}
