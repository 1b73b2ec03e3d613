mod loader;
mod policy;
mod root;
mod telemetry;
mod timeout;
mod upstream;

pub use loader::load_from_path;
pub use policy::{CorsConfig, OriginPolicy};
pub use root::Config;
pub use telemetry::LoggingConfig;
pub use timeout::{KeepAliveConfig, TimeoutConfig};
pub use upstream::{PoolConfig, UpstreamConfig, UpstreamTarget};
