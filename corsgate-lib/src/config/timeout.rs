use serde::Deserialize;

/// Timeout configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TimeoutConfig {
    /// Maximum time to wait for the upstream response, in seconds.
    /// Requests past this bound fail with an UpstreamTimeout error.
    /// Default: 30
    #[serde(default = "default_upstream_timeout")]
    pub upstream_secs: u64,
    /// Graceful shutdown timeout in seconds
    /// Default: 30
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_secs: u64,
    /// HTTP/1.1 keep-alive configuration for upstream connections
    #[serde(default)]
    pub keep_alive: KeepAliveConfig,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_secs: default_upstream_timeout(),
            shutdown_secs: default_shutdown_timeout(),
            keep_alive: KeepAliveConfig::default(),
        }
    }
}

/// TCP keep-alive configuration for upstream connections
///
/// Keep-alive allows reusing the same TCP connection for multiple HTTP
/// requests, avoiding a fresh handshake (and TLS handshake for HTTPS
/// upstreams) on every forwarded request.
#[derive(Debug, Deserialize, Clone)]
pub struct KeepAliveConfig {
    /// Enable keep-alive on upstream connections
    /// Default: true
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Keep-alive timeout in seconds
    /// How long to keep idle upstream connections open before closing them
    /// Default: 60 seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub timeout_secs: u64,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self { enabled: true, timeout_secs: default_keep_alive_timeout() }
    }
}

fn default_upstream_timeout() -> u64 {
    30
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_keep_alive_timeout() -> u64 {
    60
}
