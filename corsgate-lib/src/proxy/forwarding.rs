use http::{Request, Response, Uri, Version};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use std::net::SocketAddr;
use tokio::time::{timeout, Duration, Instant};
use tracing::info;

use crate::proxy::context::GatewayContext;
use crate::proxy::http_result::{GatewayError, HttpResult};
use crate::proxy::RespBody;
use crate::rewrite::prepare_upstream_headers;

/// Forward one request to the configured upstream.
///
/// The inbound method, path, query and body travel unchanged; only the
/// URI target and the headers are transformed. Exactly one upstream call
/// is made per invocation, bounded by the configured timeout.
pub async fn forward(
    req: Request<Incoming>,
    ctx: &GatewayContext,
    peer: SocketAddr,
) -> HttpResult<Response<RespBody>> {
    let start = Instant::now();

    let (mut parts, body) = req.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let uri = format!("{}{}", ctx.upstream, path_and_query)
        .parse::<Uri>()
        .map_err(|e| GatewayError::BadUpstreamRequest(e.to_string()))?;
    parts.uri = uri;

    // The pooled client renegotiates the actual wire version (ALPN for
    // HTTPS upstreams); normalizing here keeps an h2c inbound request
    // from being rejected on an HTTP/1.1 upstream connection.
    parts.version = Version::HTTP_11;

    prepare_upstream_headers(&mut parts.headers, &ctx.upstream, peer);

    let out_req = Request::from_parts(parts, body);

    let upstream_secs = ctx.config.timeout.upstream_secs;
    let result = timeout(
        Duration::from_secs(upstream_secs),
        ctx.clients.request(out_req),
    )
    .await;

    match result {
        Err(_elapsed) => Err(GatewayError::UpstreamTimeout(upstream_secs)),
        Ok(Err(e)) => Err(classify_upstream_error(&e)),
        Ok(Ok(resp)) => {
            info!(
                status = resp.status().as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "upstream response"
            );
            Ok(resp.map(|b| b.boxed()))
        }
    }
}

/// Map a client error onto the gateway error taxonomy
fn classify_upstream_error(err: &hyper_util::client::legacy::Error) -> GatewayError {
    let details = error_chain(err);
    if err.is_connect() && is_tls_failure(&details) {
        GatewayError::UpstreamTlsFailure(details)
    } else {
        GatewayError::UpstreamUnreachable(details)
    }
}

/// Flatten an error and its sources into one diagnosable string
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// The connect error chain does not expose a typed TLS failure, so the
/// classification sniffs the rendered chain
fn is_tls_failure(details: &str) -> bool {
    let lower = details.to_ascii_lowercase();
    lower.contains("tls") || lower.contains("certificate") || lower.contains("handshake")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_failures_are_recognized_in_error_chains() {
        assert!(is_tls_failure(
            "client error (Connect): invalid peer certificate: Expired"
        ));
        assert!(is_tls_failure("error: received fatal alert: HandshakeFailure"));
        assert!(!is_tls_failure(
            "client error (Connect): tcp connect error: Connection refused (os error 111)"
        ));
    }

    #[test]
    fn error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = std::io::Error::other(inner);
        let chain = error_chain(&outer);
        assert!(chain.contains("refused"));
    }
}
