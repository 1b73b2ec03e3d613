use corsgate_lib::proxy::http_result::GatewayError;
use corsgate_lib::proxy::synthetic_response::error_response;
use http::{header, StatusCode};
use http_body_util::BodyExt;

#[tokio::test]
async fn error_response_carries_kind_and_details(
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let err = GatewayError::UpstreamUnreachable("tcp connect error: refused".to_string());
    let res = error_response(&err);

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).ok_or("content type missing")?,
        "application/json"
    );

    let body = res.into_body().collect().await?.to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["error"], "UpstreamUnreachable");
    assert_eq!(json["details"], "upstream unreachable: tcp connect error: refused");
    Ok(())
}
