use http::{HeaderValue, Response, StatusCode};

use crate::config::{CorsConfig, OriginPolicy};
use crate::proxy::synthetic_response::empty_body;
use crate::proxy::RespBody;
use crate::rewrite::cors::names;
use crate::rewrite::apply_cors_headers;

/// Answer a browser preflight without touching the upstream.
///
/// A disallowed Origin gets a bare 204: with no CORS headers echoed the
/// browser refuses to proceed with the actual request, which is exactly
/// how CORS denial works on the wire.
pub fn preflight_response(
    origin: Option<&str>,
    policy: OriginPolicy,
    cors: &CorsConfig,
) -> Response<RespBody> {
    let mut res = Response::new(empty_body());
    *res.status_mut() = StatusCode::NO_CONTENT;

    if !policy.is_allowed(origin) {
        return res;
    }

    apply_cors_headers(res.headers_mut(), origin, policy, cors);
    if let Ok(hv) = HeaderValue::from_str(&cors.max_age_secs.to_string()) {
        res.headers_mut().insert(names::MAX_AGE, hv);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_carries_cors_headers_and_max_age() {
        let res = preflight_response(
            Some("http://localhost:3000"),
            OriginPolicy::LocalhostOnly,
            &CorsConfig::default(),
        );

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            res.headers().get(names::ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(res.headers().get(names::ALLOW_CREDENTIALS).unwrap(), "true");
        assert_eq!(res.headers().get(names::MAX_AGE).unwrap(), "86400");
    }

    #[test]
    fn preflight_for_foreign_origin_is_bare() {
        let res = preflight_response(
            Some("http://evil.example.com"),
            OriginPolicy::LocalhostOnly,
            &CorsConfig::default(),
        );

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(res.headers().get(names::ALLOW_ORIGIN).is_none());
        assert!(res.headers().get(names::ALLOW_METHODS).is_none());
    }
}
