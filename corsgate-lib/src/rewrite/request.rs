use http::header::{self, HeaderMap, HeaderValue};
use std::net::SocketAddr;

use crate::config::UpstreamTarget;

/// Connection-scoped headers that must not travel to the upstream
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Transform inbound request headers into upstream request headers.
///
/// - Host is retargeted at the upstream authority (the upstream sees
///   itself, not the local listener).
/// - Hop-by-hop headers are stripped; everything else, including the
///   Cookie header, is preserved verbatim.
/// - X-Forwarded-For/-Host/-Proto record the original caller.
pub fn prepare_upstream_headers(
    headers: &mut HeaderMap,
    upstream: &UpstreamTarget,
    peer: SocketAddr,
) {
    let original_host = headers.get(header::HOST).cloned();

    for name in HOP_BY_HOP {
        headers.remove(*name);
    }

    if let Ok(host) = HeaderValue::from_str(upstream.authority().as_str()) {
        headers.insert(header::HOST, host);
    }

    // X-Forwarded-For: append the client IP to an existing chain, or start one
    let client_ip = peer.ip().to_string();
    let forwarded_for = match headers.get(X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        Some(existing) => format!("{existing}, {client_ip}"),
        None => client_ip,
    };
    if let Ok(hv) = HeaderValue::from_str(&forwarded_for) {
        headers.insert(X_FORWARDED_FOR, hv);
    }

    if let Some(host) = original_host {
        headers.insert(X_FORWARDED_HOST, host);
    }

    // The listener only speaks plain HTTP
    headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("http"));
}
