use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use tracing::info;

/// Rewrite a single Set-Cookie value for an insecure local origin:
/// drop `Secure`, drop `Domain=...`, turn `SameSite=Lax` into
/// `SameSite=None`. Every other attribute (Path, Expires, HttpOnly, ...)
/// passes through untouched.
///
/// This is a deliberate, dev-environment-only relaxation: the HTTPS
/// upstream marks its session cookie Secure and pins it to its own
/// domain, which would make the browser drop it on http://localhost.
///
/// Attributes are handled structurally (split on `;`), so the transform
/// is idempotent and insensitive to attribute order.
pub fn rewrite_set_cookie(value: &str) -> String {
    let mut parts = value.split(';');
    // First segment is always the name=value pair, never an attribute
    let mut out = String::with_capacity(value.len());
    if let Some(pair) = parts.next() {
        out.push_str(pair.trim());
    }

    for attr in parts {
        let attr = attr.trim();
        if attr.is_empty() {
            continue;
        }
        let name = attr.split('=').next().unwrap_or(attr).trim();
        if name.eq_ignore_ascii_case("secure") || name.eq_ignore_ascii_case("domain") {
            continue;
        }
        if name.eq_ignore_ascii_case("samesite") {
            let site = attr.split('=').nth(1).map(str::trim).unwrap_or("");
            if site.eq_ignore_ascii_case("lax") {
                out.push_str("; SameSite=None");
                continue;
            }
        }
        out.push_str("; ");
        out.push_str(attr);
    }
    out
}

/// Rewrite every Set-Cookie header on an upstream response, preserving
/// order. Values that are not valid UTF-8 are forwarded as-is.
///
/// Original and rewritten values are logged so cookie problems in the
/// dev setup can be diagnosed from the gateway output alone.
pub fn rewrite_response_cookies(headers: &mut HeaderMap) {
    let cookies: Vec<HeaderValue> = headers.get_all(SET_COOKIE).iter().cloned().collect();
    if cookies.is_empty() {
        return;
    }

    headers.remove(SET_COOKIE);
    for cookie in cookies {
        let rewritten = match cookie.to_str() {
            Ok(original) => {
                let rewritten = rewrite_set_cookie(original);
                info!(original, rewritten = %rewritten, "set-cookie rewritten");
                HeaderValue::from_str(&rewritten).unwrap_or_else(|_| cookie.clone())
            }
            Err(_) => cookie.clone(),
        };
        headers.append(SET_COOKIE, rewritten);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_secure_domain_and_relaxes_samesite() {
        let rewritten =
            rewrite_set_cookie("sid=abc; Secure; Domain=example.com; SameSite=Lax; HttpOnly");
        assert_eq!(rewritten, "sid=abc; SameSite=None; HttpOnly");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = rewrite_set_cookie("sid=abc; Path=/; SameSite=None; HttpOnly");
        assert_eq!(once, "sid=abc; Path=/; SameSite=None; HttpOnly");
        assert_eq!(rewrite_set_cookie(&once), once);
    }

    #[test]
    fn preserves_other_attributes() {
        let rewritten = rewrite_set_cookie(
            "session_id=xyz; Path=/web; Expires=Wed, 21 Oct 2026 07:28:00 GMT; Max-Age=3600",
        );
        assert_eq!(
            rewritten,
            "session_id=xyz; Path=/web; Expires=Wed, 21 Oct 2026 07:28:00 GMT; Max-Age=3600"
        );
    }

    #[test]
    fn samesite_strict_is_left_alone() {
        assert_eq!(
            rewrite_set_cookie("sid=abc; SameSite=Strict"),
            "sid=abc; SameSite=Strict"
        );
    }

    #[test]
    fn attribute_matching_is_case_insensitive() {
        assert_eq!(
            rewrite_set_cookie("sid=abc; secure; domain=.example.com; samesite=lax"),
            "sid=abc; SameSite=None"
        );
    }

    #[test]
    fn cookie_value_containing_domain_like_text_is_untouched() {
        // Only attributes are inspected, never the name=value pair
        assert_eq!(
            rewrite_set_cookie("redirect=https://example.com; HttpOnly"),
            "redirect=https://example.com; HttpOnly"
        );
    }
}
