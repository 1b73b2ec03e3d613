use corsgate_lib::proxy::http_result::GatewayError;
use http::StatusCode;

#[test]
fn test_error_kind_mapping() {
    assert_eq!(
        GatewayError::OriginRejected("http://evil.example.com".to_string()).error_kind(),
        "OriginRejected"
    );
    assert_eq!(
        GatewayError::UpstreamUnreachable("connection refused".to_string()).error_kind(),
        "UpstreamUnreachable"
    );
    assert_eq!(GatewayError::UpstreamTimeout(30).error_kind(), "UpstreamTimeout");
    assert_eq!(
        GatewayError::UpstreamTlsFailure("bad certificate".to_string()).error_kind(),
        "UpstreamTlsFailure"
    );
    assert_eq!(
        GatewayError::BadUpstreamRequest("broken path".to_string()).error_kind(),
        "BadUpstreamRequest"
    );
}

#[test]
fn test_status_code_conversion() {
    assert_eq!(
        StatusCode::from(GatewayError::UpstreamUnreachable("refused".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        StatusCode::from(GatewayError::UpstreamTimeout(30)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        StatusCode::from(GatewayError::UpstreamTlsFailure("handshake".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        StatusCode::from(GatewayError::OriginRejected("x".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        StatusCode::from(GatewayError::BadUpstreamRequest("x".to_string())),
        StatusCode::BAD_REQUEST
    );
}
