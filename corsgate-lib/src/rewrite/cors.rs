use http::{HeaderMap, HeaderValue};

use crate::config::{CorsConfig, OriginPolicy};

/// CORS header names
pub mod names {
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
    pub const ALLOW_CREDENTIALS: &str = "access-control-allow-credentials";
    pub const EXPOSE_HEADERS: &str = "access-control-expose-headers";
    pub const MAX_AGE: &str = "access-control-max-age";
    pub const ORIGIN: &str = "origin";
    pub const VARY: &str = "vary";
}

/// Overwrite the CORS surface of a response.
///
/// Whatever the upstream answered, the gateway owns these headers:
/// - `Access-Control-Allow-Origin`: `*` under the permissive policy; the
///   echoed request Origin (or the configured fallback) under
///   localhost-only; removed entirely for a disallowed Origin so the
///   browser blocks the page from reading the response.
/// - `Access-Control-Allow-Methods` / `Access-Control-Allow-Headers`:
///   the configured lists. Localhost-only appends Cookie and Set-Cookie
///   to the allowed headers.
/// - Localhost-only additionally sets `Access-Control-Allow-Credentials:
///   true` and `Access-Control-Expose-Headers: Set-Cookie`; permissive
///   removes any credentials header, since a literal `*` origin must
///   never be combined with credentials.
pub fn apply_cors_headers(
    headers: &mut HeaderMap,
    origin: Option<&str>,
    policy: OriginPolicy,
    cors: &CorsConfig,
) {
    match policy {
        OriginPolicy::Permissive => {
            headers.insert(names::ALLOW_ORIGIN, HeaderValue::from_static("*"));
            headers.remove(names::ALLOW_CREDENTIALS);
        }
        OriginPolicy::LocalhostOnly => {
            let echo = match origin {
                Some(o) if policy.is_allowed(Some(o)) => Some(o.to_string()),
                Some(_) => None,
                None => cors.fallback_origin.clone(),
            };
            match echo.as_deref().and_then(|o| HeaderValue::from_str(o).ok()) {
                Some(hv) => {
                    headers.insert(names::ALLOW_ORIGIN, hv);
                }
                None => {
                    headers.remove(names::ALLOW_ORIGIN);
                }
            }
            headers.insert(names::ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
            headers.insert(names::EXPOSE_HEADERS, HeaderValue::from_static("Set-Cookie"));
            // The echoed origin varies per request, keep shared caches honest
            headers.insert(names::VARY, HeaderValue::from_static("Origin"));
        }
    }

    if let Ok(hv) = HeaderValue::from_str(&cors.allowed_methods.join(", ")) {
        headers.insert(names::ALLOW_METHODS, hv);
    }
    if let Ok(hv) = HeaderValue::from_str(&allowed_headers_value(policy, cors)) {
        headers.insert(names::ALLOW_HEADERS, hv);
    }
}

/// The Allow-Headers list for the active policy. Localhost-only mode
/// lets the browser send and read cookie headers on top of the
/// configured list.
fn allowed_headers_value(policy: OriginPolicy, cors: &CorsConfig) -> String {
    let mut allowed = cors.allowed_headers.clone();
    if policy.allows_credentials() {
        for extra in ["Cookie", "Set-Cookie"] {
            if !allowed.iter().any(|h| h.eq_ignore_ascii_case(extra)) {
                allowed.push(extra.to_string());
            }
        }
    }
    allowed.join(", ")
}
