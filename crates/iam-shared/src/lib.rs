//! # IAM Shared
//!
//! Wire types shared by the gateway and its clients: request/response DTOs
//! and the uniform response envelope.

pub mod dto;
pub mod response;

pub use response::{ApiError, ApiResponse};
