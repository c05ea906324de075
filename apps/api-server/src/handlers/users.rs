//! User management handlers.

use std::time::Duration;

use actix_web::{HttpResponse, http::StatusCode, web};

use iam_core::service::Deadline;
use iam_shared::dto::CreateUserRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::observability::{ClientIp, RequestId};
use crate::response;
use crate::state::AppState;

/// Budget for single provider calls.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Budget for deletion, which makes two sequential provider calls.
const DELETE_TIMEOUT: Duration = Duration::from_secs(15);

/// POST /api/v1/users
pub async fn create_user(
    state: web::Data<AppState>,
    request_id: RequestId,
    client_ip: ClientIp,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .create_user(Deadline::after(PROVIDER_TIMEOUT), &req)
        .await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        client_ip = %client_ip.as_str(),
        user_id = %user.id,
        "User created"
    );

    Ok(response::success(StatusCode::CREATED, Some(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = required_id(path.into_inner())?;

    let user = state
        .users
        .get_user(Deadline::after(PROVIDER_TIMEOUT), &id)
        .await?;

    Ok(response::success(StatusCode::OK, Some(user)))
}

/// GET /api/v1/users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state
        .users
        .list_users(Deadline::after(PROVIDER_TIMEOUT))
        .await?;

    Ok(response::success(StatusCode::OK, Some(users)))
}

/// DELETE /api/v1/users/{id}
///
/// The provider only deletes deprovisioned users, so the user is deactivated
/// first. A failed deactivation ends the request; deletion is not attempted.
pub async fn delete_user(
    state: web::Data<AppState>,
    request_id: RequestId,
    client_ip: ClientIp,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = required_id(path.into_inner())?;
    let deadline = Deadline::after(DELETE_TIMEOUT);

    state.users.deactivate_user(deadline, &id).await?;
    state.users.delete_user(deadline, &id).await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        client_ip = %client_ip.as_str(),
        user_id = %id,
        "User deactivated and deleted"
    );

    Ok(response::success::<()>(StatusCode::OK, None))
}

fn required_id(id: String) -> AppResult<String> {
    if id.is_empty() {
        return Err(AppError::BadRequest("User ID is required".to_string()));
    }
    Ok(id)
}
