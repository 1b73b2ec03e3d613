use std::sync::Arc;

use crate::config::{Config, UpstreamTarget};
use crate::error::Result;
use crate::proxy::ClientPool;

/// Immutable per-process gateway state
///
/// Built once at startup and passed into the request handler, so the
/// handler never reaches for ambient globals and stays testable without
/// a real listener.
pub struct GatewayContext {
    pub config: Arc<Config>,
    pub upstream: UpstreamTarget,
    pub clients: ClientPool,
}

impl GatewayContext {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let upstream = UpstreamTarget::from_url(&config.upstream.url)?;
        let clients = ClientPool::new(&upstream, &config.timeout.keep_alive, &config.pool)?;
        Ok(Self { config, upstream, clients })
    }
}
