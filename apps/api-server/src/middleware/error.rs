//! Error handling - every failure leaves as a JSON envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use iam_core::error::{UserOperation, UserServiceError};
use iam_shared::ApiError;

use crate::response;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
    Unavailable(String),
    Timeout,
    Service(UserServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            AppError::Timeout => write!(f, "Request timed out"),
            AppError::Service(err) => write!(f, "{}", err),
        }
    }
}

impl AppError {
    /// Message safe to show to API clients.
    fn client_message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::Unavailable(msg) => msg,
            AppError::Internal(_) => "Internal server error",
            AppError::Timeout => "Request timed out",
            AppError::Service(err) => err.client_message(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            // Lookup failures are reported as 404 whatever the provider said.
            AppError::Service(err) if err.operation() == UserOperation::Get => StatusCode::NOT_FOUND,
            AppError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        response::failure(self.status_code(), ApiError::new(self.client_message()))
    }
}

// Conversion from adapter errors; the adapter has already logged the cause.
impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        AppError::Service(err)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use iam_core::error::ProviderError;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn service_error(operation: UserOperation) -> AppError {
        AppError::Service(UserServiceError::new(
            operation,
            "failed to do thing",
            ProviderError::Transport("connection reset by peer".to_string()),
        ))
    }

    #[actix_web::test]
    async fn test_get_failure_maps_to_404() {
        let (status, body) = body_json(service_error(UserOperation::Get)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Failed to retrieve user");
    }

    #[actix_web::test]
    async fn test_service_failure_hides_cause() {
        let (status, body) = body_json(service_error(UserOperation::Create)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to create user");
        assert!(!body.to_string().contains("connection reset"));
    }

    #[actix_web::test]
    async fn test_internal_detail_is_not_exposed() {
        let (status, body) = body_json(AppError::Internal("db password wrong".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(body.get("data").is_none());
    }
}
