use http::StatusCode;
use thiserror::Error;

/// HTTP result type, T is typically a hyper::Response
/// GatewayError is used to generate a synthetic error response
pub type HttpResult<T> = std::result::Result<T, GatewayError>;

/// Describes things that can go wrong in one forwarding cycle
#[derive(Debug, Error, Clone)]
pub enum GatewayError {
    #[error("origin rejected by allow policy: {0}")]
    OriginRejected(String),

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("upstream did not respond within {0}s")]
    UpstreamTimeout(u64),

    #[error("upstream TLS failure: {0}")]
    UpstreamTlsFailure(String),

    #[error("failed to build upstream request: {0}")]
    BadUpstreamRequest(String),
}

impl GatewayError {
    /// Stable kind name carried in the `error` field of the JSON error body
    pub fn error_kind(&self) -> &'static str {
        match self {
            GatewayError::OriginRejected(_) => "OriginRejected",
            GatewayError::UpstreamUnreachable(_) => "UpstreamUnreachable",
            GatewayError::UpstreamTimeout(_) => "UpstreamTimeout",
            GatewayError::UpstreamTlsFailure(_) => "UpstreamTlsFailure",
            GatewayError::BadUpstreamRequest(_) => "BadUpstreamRequest",
        }
    }
}

impl From<GatewayError> for StatusCode {
    fn from(e: GatewayError) -> StatusCode {
        match e {
            // Proxy failures surface uniformly as 500 with a JSON body
            GatewayError::OriginRejected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamTlsFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::BadUpstreamRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}
