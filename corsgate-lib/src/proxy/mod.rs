pub mod client_pool;
pub mod context;
pub mod forwarding;
pub mod handler;
pub mod http_result;
pub mod server;
pub mod synthetic_response;

use http_body_util::combinators::BoxBody;

/// Response body type used throughout the gateway: either a streamed
/// upstream body or a synthetic buffered one.
pub type RespBody = BoxBody<bytes::Bytes, hyper::Error>;

pub use client_pool::ClientPool;
pub use context::GatewayContext;
pub use http_result::GatewayError;
pub use server::run;
