use http::{header, HeaderValue, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::Response;

use crate::proxy::http_result::GatewayError;
use crate::proxy::RespBody;

/// Build the JSON error response for a failed forwarding cycle:
/// `{"error": <kind>, "details": <message>}`
pub fn error_response(err: &GatewayError) -> Response<RespBody> {
    let body = serde_json::json!({
        "error": err.error_kind(),
        "details": err.to_string(),
    })
    .to_string();

    let mut res = Response::new(full_body(Bytes::from(body)));
    *res.status_mut() = StatusCode::from(err.clone());
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    res
}

pub(crate) fn empty_body() -> RespBody {
    full_body(Bytes::new())
}

fn full_body(bytes: Bytes) -> RespBody {
    Full::new(bytes).map_err(|never| match never {}).boxed()
}
