//! Middleware modules.

pub mod error;
pub mod recover;
pub mod timeout;

pub use recover::Recover;
pub use timeout::RequestTimeout;
