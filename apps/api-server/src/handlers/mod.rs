//! HTTP handlers and route configuration.

mod health;
mod users;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // User management, proxied to the identity provider
            .service(
                web::scope("/v1/users")
                    .route("", web::get().to(users::list_users))
                    .route("/", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user))
                    .route("/", web::post().to(users::create_user))
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::delete().to(users::delete_user)),
            ),
    );
}

/// Bodies are decoded as JSON whatever their `Content-Type`; any body that
/// fails to decode is answered with the same 400 envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected request payload");
            AppError::BadRequest("Invalid request payload".to_string()).into()
        })
}
