#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod proxy;
pub mod rewrite;
pub mod telemetry;

pub use config::{load_from_path, Config, CorsConfig, OriginPolicy, UpstreamTarget};
pub use error::{ProxyError, Result};
pub use proxy::{run, GatewayError};
pub use rewrite::{apply_cors_headers, rewrite_set_cookie};
