//! Rendering of [`ApiResponse`] envelopes into HTTP responses.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use serde::Serialize;

use iam_shared::{ApiError, ApiResponse};

pub const SUCCESS_MESSAGE: &str = "Success";

/// Successful envelope with an optional payload.
pub fn success<T: Serialize>(status: StatusCode, data: Option<T>) -> HttpResponse {
    respond(
        status,
        &ApiResponse::success(status.as_u16(), SUCCESS_MESSAGE, data),
    )
}

/// Failed envelope.
pub fn failure(status: StatusCode, error: ApiError) -> HttpResponse {
    respond(status, &ApiResponse::<()>::failure(status.as_u16(), error))
}

/// Serialize the envelope as the body. `204` carries no body; a serialization
/// failure turns into a bare plain-text 500.
pub fn respond<T: Serialize>(status: StatusCode, envelope: &ApiResponse<T>) -> HttpResponse {
    if status == StatusCode::NO_CONTENT {
        return HttpResponse::new(status);
    }

    match serde_json::to_vec(envelope) {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response envelope");
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Internal Server Error")
        }
    }
}
