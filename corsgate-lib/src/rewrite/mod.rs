//! Pure header transforms, decoupled from transport plumbing.
//!
//! The request transform retargets an inbound request at the upstream;
//! the response transforms overwrite the CORS surface and relax cookie
//! attributes so a browser on an insecure local origin keeps its session.

pub mod cookie;
pub mod cors;
pub mod request;

pub use cookie::{rewrite_response_cookies, rewrite_set_cookie};
pub use cors::apply_cors_headers;
pub use request::prepare_upstream_headers;
