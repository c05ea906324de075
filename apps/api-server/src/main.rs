//! # IAM Gateway API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::time::Duration;

use actix_web::{
    App, Error, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod response;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::{Recover, RequestTimeout};
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();
    let server = config.server.clone();

    // Build application state
    let state = AppState::new(config.provider, config.okta.as_ref()).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize identity provider client");
        std::io::Error::other(e.to_string())
    })?;

    tracing::info!(
        "Starting IAM Gateway API Server on {}:{}",
        server.host,
        server.port
    );

    let request_timeout = server.request_timeout;

    HttpServer::new(move || build_app(state.clone(), request_timeout))
        .client_request_timeout(server.read_timeout)
        .client_disconnect_timeout(server.write_timeout)
        .keep_alive(server.idle_timeout)
        .shutdown_timeout(server.shutdown_timeout.as_secs())
        .bind((server.host.as_str(), server.port))?
        .run()
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// The application with its full middleware stack.
///
/// Middleware runs outermost-last: request ID and span first, then access
/// logging, panic recovery and finally the global timeout.
fn build_app(
    state: AppState,
    request_timeout: Duration,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestTimeout::new(request_timeout))
        .wrap(Recover)
        .wrap(TracingLogger::default())
        .wrap(RequestIdMiddleware)
        .app_data(web::Data::new(state))
        .configure(handlers::configure_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use iam_infra::InMemoryIdentityProvider;
    use serde_json::json;

    #[actix_web::test]
    async fn test_full_stack_serves_user_routes() {
        let state = AppState::with_provider(Arc::new(InMemoryIdentityProvider::new()));
        let app = test::init_service(build_app(state, Duration::from_secs(60))).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "a@b.com", "password": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(resp.headers().contains_key("x-request-id"));
        let created: serde_json::Value = test::read_body_json(resp).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/users").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["id"], id.as_str());

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_full_stack_renders_handler_errors() {
        let state = AppState::with_provider(Arc::new(InMemoryIdentityProvider::new()));
        let app = test::init_service(build_app(state, Duration::from_secs(60))).await;

        let req = test::TestRequest::get().uri("/api/v1/users/00u404").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Failed to retrieve user");
    }
}
