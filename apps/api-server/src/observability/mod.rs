//! Observability module - request IDs and client IP resolution.

mod request_id;

pub use request_id::{ClientIp, RequestId, RequestIdMiddleware};
