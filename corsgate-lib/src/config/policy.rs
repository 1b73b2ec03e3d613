use serde::Deserialize;

/// Origin allow policy applied to inbound requests
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OriginPolicy {
    /// Every origin is allowed; responses carry `Access-Control-Allow-Origin: *`
    /// and never allow credentials (a literal `*` must not be combined with
    /// `Access-Control-Allow-Credentials: true`)
    Permissive,
    /// Allowed when the Origin header is absent or starts with
    /// `http://localhost:` or `http://127.0.0.1:` (any port).
    /// The allowed origin is echoed back and credentials are permitted.
    #[default]
    LocalhostOnly,
}

impl OriginPolicy {
    /// Whether a request with this Origin header passes the policy.
    /// An absent Origin (same-origin navigation, curl, mobile app) always passes.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match self {
            OriginPolicy::Permissive => true,
            OriginPolicy::LocalhostOnly => match origin {
                None => true,
                Some(o) => {
                    o.starts_with("http://localhost:") || o.starts_with("http://127.0.0.1:")
                }
            },
        }
    }

    /// Whether responses under this policy may carry
    /// `Access-Control-Allow-Credentials: true`
    pub fn allows_credentials(&self) -> bool {
        matches!(self, OriginPolicy::LocalhostOnly)
    }
}

/// CORS response header lists
///
/// These values overwrite whatever the upstream responded with; the
/// gateway, not the upstream, owns the CORS surface seen by the browser.
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Value list for Access-Control-Allow-Methods
    /// Default: GET, POST, PUT, DELETE, OPTIONS
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    /// Value list for Access-Control-Allow-Headers
    /// Under the localhost-only policy, Cookie and Set-Cookie are appended
    /// Default: Content-Type, Authorization, X-Requested-With
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
    /// Origin echoed when the request has no Origin header under the
    /// localhost-only policy (e.g. the dev client's well-known port).
    /// If unset, no Access-Control-Allow-Origin is emitted for such requests.
    #[serde(default)]
    pub fallback_origin: Option<String>,
    /// Access-Control-Max-Age on preflight responses, in seconds
    /// Default: 86400 (24 hours)
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            fallback_origin: None,
            max_age_secs: default_max_age_secs(),
        }
    }
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_allowed_headers() -> Vec<String> {
    ["Content-Type", "Authorization", "X-Requested-With"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn default_max_age_secs() -> u64 {
    86400
}
