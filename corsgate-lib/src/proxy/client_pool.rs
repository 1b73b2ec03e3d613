use hyper::body::Incoming;
use hyper::{Request, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::{Client, Error as ClientError};
use hyper_util::rt::TokioExecutor;
use std::time::Duration;

use crate::config::{KeepAliveConfig, PoolConfig, UpstreamTarget};
use crate::error::{ProxyError, Result};

type PlainClient = Client<HttpConnector, Incoming>;
type TlsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, Incoming>;

/// Shared HTTP client for upstream connections
///
/// One client lives for the whole process and pools keep-alive
/// connections to the single upstream, so forwarded requests skip the
/// TCP (and TLS) handshake whenever a pooled connection is available.
/// Idle connections are dropped after `pool.idle_timeout`, never leaked.
pub struct ClientPool {
    inner: ClientKind,
}

enum ClientKind {
    /// Plain-TCP client for `http` upstreams
    Plain(PlainClient),
    /// TLS client (native roots, ALPN h1/h2) for `https` upstreams
    Tls(Box<TlsClient>),
}

impl ClientPool {
    /// Create the client matching the upstream scheme
    pub fn new(
        upstream: &UpstreamTarget,
        keep_alive: &KeepAliveConfig,
        pool: &PoolConfig,
    ) -> Result<Self> {
        let mut connector = HttpConnector::new();
        if keep_alive.enabled {
            connector.set_keepalive(Some(Duration::from_secs(keep_alive.timeout_secs)));
        } else {
            connector.set_keepalive(None);
        }

        let inner = if upstream.is_https() {
            connector.enforce_http(false);
            let connector = hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| ProxyError::Tls(format!("failed to load native root certs: {e}")))?
                .https_only()
                .enable_http1()
                .enable_http2()
                .wrap_connector(connector);
            ClientKind::Tls(Box::new(Self::builder(pool).build(connector)))
        } else {
            ClientKind::Plain(Self::builder(pool).build(connector))
        };
        Ok(Self { inner })
    }

    fn builder(pool: &PoolConfig) -> hyper_util::client::legacy::Builder {
        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_idle_timeout(Duration::from_secs(pool.idle_timeout));
        if pool.pool_max_idle_per_host > 0 {
            builder.pool_max_idle_per_host(pool.pool_max_idle_per_host);
        }
        builder
    }

    /// Issue one upstream request through the pooled client
    pub async fn request(
        &self,
        req: Request<Incoming>,
    ) -> std::result::Result<Response<Incoming>, ClientError> {
        match &self.inner {
            ClientKind::Plain(client) => client.request(req).await,
            ClientKind::Tls(client) => client.request(req).await,
        }
    }
}
