//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use iam_infra::okta::{AuthorizationMode, HttpPoolConfig, OktaConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderKind,
    /// `None` when `OKTA_DOMAIN` is unset.
    pub okta: Option<OktaConfig>,
}

/// Which identity provider backs the gateway (`IAM_PROVIDER`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Okta,
    /// Volatile in-memory provider for local development. Never selected
    /// implicitly.
    Memory,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "okta" => Ok(ProviderKind::Okta),
            "memory" => Ok(ProviderKind::Memory),
            other => Err(format!("unknown IAM_PROVIDER '{}'", other)),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub idle_timeout: Duration,
    /// Backstop applied to every request, independent of per-operation deadlines.
    pub request_timeout: Duration,
    /// Drain period for in-flight requests on SIGINT/SIGTERM.
    pub shutdown_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let server = ServerConfig {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: parse_or(env::var("SERVER_PORT").ok(), 8080),
            read_timeout: env_duration("SERVER_READ_TIMEOUT", Duration::from_secs(15)),
            write_timeout: env_duration("SERVER_WRITE_TIMEOUT", Duration::from_secs(15)),
            idle_timeout: env_duration("SERVER_IDLE_TIMEOUT", Duration::from_secs(60)),
            request_timeout: env_duration("SERVER_REQUEST_TIMEOUT", Duration::from_secs(60)),
            shutdown_timeout: env_duration("SERVER_SHUTDOWN_TIMEOUT", Duration::from_secs(20)),
        };

        let provider = match env::var("IAM_PROVIDER") {
            Ok(value) if !value.trim().is_empty() => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using okta", e);
                ProviderKind::Okta
            }),
            _ => ProviderKind::default(),
        };

        let okta = env::var("OKTA_DOMAIN")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(Self::okta_from_env);

        Self {
            server,
            provider,
            okta,
        }
    }

    fn okta_from_env(domain: String) -> OktaConfig {
        let defaults = HttpPoolConfig::default();

        let authorization_mode = match env::var("OKTA_AUTHORIZATION_MODE") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; falling back to SSWS", e);
                AuthorizationMode::Ssws
            }),
            Err(_) => AuthorizationMode::default(),
        };

        OktaConfig {
            domain,
            api_token: env::var("OKTA_API_TOKEN").unwrap_or_default(),
            issuer: env::var("OKTA_ISSUER").ok().filter(|v| !v.is_empty()),
            audience: env::var("OKTA_AUDIENCE").ok().filter(|v| !v.is_empty()),
            authorization_mode,
            http: HttpPoolConfig {
                max_idle_conns: parse_or(
                    env::var("OKTA_HTTP_MAX_IDLE_CONNS").ok(),
                    defaults.max_idle_conns,
                ),
                max_idle_conns_per_host: parse_or(
                    env::var("OKTA_HTTP_MAX_IDLE_CONNS_PER_HOST").ok(),
                    defaults.max_idle_conns_per_host,
                ),
                idle_conn_timeout: env_duration(
                    "OKTA_HTTP_IDLE_CONN_TIMEOUT",
                    defaults.idle_conn_timeout,
                ),
                tls_handshake_timeout: env_duration(
                    "OKTA_HTTP_TLS_HANDSHAKE_TIMEOUT",
                    defaults.tls_handshake_timeout,
                ),
                response_header_timeout: env_duration(
                    "OKTA_HTTP_RESPONSE_HEADER_TIMEOUT",
                    defaults.response_header_timeout,
                ),
                request_timeout: env_duration("OKTA_HTTP_REQUEST_TIMEOUT", defaults.request_timeout),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_duration(key: &str, default: Duration) -> Duration {
    duration_or(env::var(key).ok(), default)
}

/// Parse a humantime duration (`15s`, `1m30s`), falling back on absent or bad input.
fn duration_or(value: Option<String>, default: Duration) -> Duration {
    value
        .and_then(|v| humantime::parse_duration(v.trim()).ok())
        .unwrap_or(default)
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
