use std::fs;
use std::path::Path;

use crate::config::{Config, UpstreamTarget};
use crate::error::{ProxyError, Result};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| ProxyError::Config(format!("Failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| ProxyError::Config(format!("Failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<()> {
    // Rejects missing scheme, non-http(s) schemes and URLs carrying a path
    UpstreamTarget::from_url(&cfg.upstream.url)?;

    if cfg.cors.allowed_methods.is_empty() {
        return Err(ProxyError::Config(
            "cors.allowed_methods must not be empty".to_string(),
        ));
    }
    if cfg.cors.allowed_headers.is_empty() {
        return Err(ProxyError::Config(
            "cors.allowed_headers must not be empty".to_string(),
        ));
    }
    if cfg.timeout.upstream_secs == 0 {
        return Err(ProxyError::Config(
            "timeout.upstream_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
