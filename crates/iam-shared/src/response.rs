//! Uniform API response envelope.
//!
//! Every response body produced by the gateway has the same shape:
//!
//! ```json
//! { "success": true, "statusCode": 200, "message": "Success", "data": { ... } }
//! { "success": false, "statusCode": 404, "message": "Failed to retrieve user",
//!   "error": { "message": "Failed to retrieve user" } }
//! ```
//!
//! `data` and `error` are mutually exclusive. Build envelopes through
//! [`ApiResponse::success`] and [`ApiResponse::failure`] so that holds.

use serde::{Deserialize, Serialize};

/// Standard API response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn success(status_code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            status_code,
            message: message.into(),
            data,
            error: None,
        }
    }

    pub fn failure(status_code: u16, error: ApiError) -> Self {
        Self {
            success: false,
            status_code,
            message: error.message.clone(),
            data: None,
            error: Some(error),
        }
    }
}

/// Error object carried by a failed [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    /// Structured, field-level details (e.g. validation failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: serde_json::Value) -> Self {
        self.fields = Some(fields);
        self
    }
}
