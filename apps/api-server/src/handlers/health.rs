//! Health check endpoint.

use std::time::Duration;

use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Serialize;

use iam_core::service::Deadline;

use crate::middleware::error::{AppError, AppResult};
use crate::response;
use crate::state::AppState;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - reports whether the identity provider is reachable.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Deadline::after(HEALTH_TIMEOUT)
        .run(state.provider.validate_connection())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Identity provider connectivity check failed");
            AppError::Unavailable("Identity provider unavailable".to_string())
        })?;

    let health = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Ok(response::success(StatusCode::OK, Some(health)))
}
