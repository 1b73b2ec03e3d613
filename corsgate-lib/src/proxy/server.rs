use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::proxy::context::GatewayContext;
use crate::proxy::handler::handle_gateway_request;
use crate::proxy::synthetic_response::error_response;

/// Guard to decrement active connections counter when dropped
struct ConnectionGuard(Arc<AtomicUsize>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

pub async fn run(config: Arc<Config>) -> Result<()> {
    let addr = config.listen;
    let ctx = Arc::new(GatewayContext::new(Arc::clone(&config))?);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(crate::error::ProxyError::Io)?;

    let builder = ConnBuilder::new(TokioExecutor::new());

    // Track active connections for graceful shutdown
    let active_connections = Arc::new(AtomicUsize::new(0));

    // Setup signal handlers
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
        crate::error::ProxyError::Io(std::io::Error::other(format!(
            "Failed to setup SIGTERM handler: {e}"
        )))
    })?;
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).map_err(|e| {
        crate::error::ProxyError::Io(std::io::Error::other(format!(
            "Failed to setup SIGINT handler: {e}"
        )))
    })?;

    info!(
        ?addr,
        upstream = %ctx.upstream,
        policy = ?config.origin_policy,
        cookie_rewrite = config.cookie_rewrite,
        "gateway listening"
    );

    loop {
        tokio::select! {
            // Handle shutdown signals
            _ = sigterm.recv() => {
                info!("Received SIGTERM, initiating graceful shutdown");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, initiating graceful shutdown");
                break;
            }
            // Accept new connections
            result = listener.accept() => {
                let (stream, peer) = match result {
                    Ok((stream, peer)) => (stream, peer),
                    Err(e) => {
                        warn!(error = %e, "accept error");
                        continue;
                    }
                };

                // Increment active connections counter
                active_connections.fetch_add(1, Ordering::Relaxed);

                let builder = builder.clone();
                let ctx = Arc::clone(&ctx);
                let active_connections = Arc::clone(&active_connections);

                tokio::spawn(async move {
                    // Ensure counter is decremented when connection finishes
                    let _guard = ConnectionGuard(active_connections);

                    let svc = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let ctx = Arc::clone(&ctx);

                        async move {
                            let method = req.method().clone();
                            let path = req.uri().path().to_string();

                            match handle_gateway_request(req, Arc::clone(&ctx), peer).await {
                                Ok(res) => Ok::<_, hyper::Error>(res),
                                Err(err) => {
                                    error!(
                                        %method,
                                        path,
                                        upstream = %ctx.upstream,
                                        error = %err,
                                        "request failed"
                                    );
                                    Ok(error_response(&err))
                                }
                            }
                        }
                    });

                    // A dropped client connection cancels this future and
                    // with it any in-flight upstream call
                    if let Err(e) = builder.serve_connection(TokioIo::new(stream), svc).await {
                        warn!(?peer, error = %e, "serve_connection error");
                    }
                });
            }
        }
    }

    info!(
        "Waiting for active connections to finish (timeout: {}s)",
        config.timeout.shutdown_secs
    );
    let shutdown_timeout = Duration::from_secs(config.timeout.shutdown_secs);
    let start = std::time::Instant::now();

    loop {
        let active = active_connections.load(Ordering::Relaxed);
        if active == 0 {
            info!("All connections closed, shutdown complete");
            break;
        }

        if start.elapsed() >= shutdown_timeout {
            warn!(
                active_connections = active,
                "Shutdown timeout reached, {} connections still active", active
            );
            break;
        }

        sleep(Duration::from_millis(100)).await;
    }

    info!("Gateway stopped");
    Ok(())
}
