use http::Method;
use hyper::body::Incoming;
use hyper::{Request, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::proxy::context::GatewayContext;
use crate::proxy::forwarding::forward;
use crate::proxy::handler::preflight::preflight_response;
use crate::proxy::http_result::{GatewayError, HttpResult};
use crate::proxy::RespBody;
use crate::rewrite::cors::names;
use crate::rewrite::{apply_cors_headers, rewrite_response_cookies};

/// Handle one gateway request cycle: preflight short-circuit, origin
/// check, forward, response rewrite.
pub async fn handle_gateway_request(
    req: Request<Incoming>,
    ctx: Arc<GatewayContext>,
    peer: SocketAddr,
) -> HttpResult<Response<RespBody>> {
    let origin = req
        .headers()
        .get(names::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // Preflights are answered locally, the upstream never sees them
    if req.method() == Method::OPTIONS {
        debug!(origin = origin.as_deref(), "answering preflight");
        return Ok(preflight_response(
            origin.as_deref(),
            ctx.config.origin_policy,
            &ctx.config.cors,
        ));
    }

    if !ctx.config.origin_policy.is_allowed(origin.as_deref()) {
        warn!(origin = origin.as_deref(), "origin rejected by allow policy");
        return Err(GatewayError::OriginRejected(origin.unwrap_or_default()));
    }

    info!(method = %req.method(), path = req.uri().path(), "forwarding request");
    if ctx.config.cookie_rewrite {
        if let Some(cookie) = req.headers().get(http::header::COOKIE) {
            if let Ok(cookie) = cookie.to_str() {
                info!(cookie, "request cookies");
            }
        }
    }

    let mut res = forward(req, &ctx, peer).await?;

    apply_cors_headers(
        res.headers_mut(),
        origin.as_deref(),
        ctx.config.origin_policy,
        &ctx.config.cors,
    );
    if ctx.config.cookie_rewrite {
        rewrite_response_cookies(res.headers_mut());
    }

    Ok(res)
}
