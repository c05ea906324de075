use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Connection settings for the Okta org.
#[derive(Clone)]
pub struct OktaConfig {
    /// Org domain, e.g. `dev-123456.okta.com`. A value that already carries an
    /// `http://` or `https://` scheme is used as-is.
    pub domain: String,
    pub api_token: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub authorization_mode: AuthorizationMode,
    pub http: HttpPoolConfig,
}

impl OktaConfig {
    pub fn new(domain: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_token: api_token.into(),
            issuer: None,
            audience: None,
            authorization_mode: AuthorizationMode::default(),
            http: HttpPoolConfig::default(),
        }
    }

    /// Base URL of the org.
    pub fn org_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.starts_with("https://") || domain.starts_with("http://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }
}

impl fmt::Debug for OktaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OktaConfig")
            .field("domain", &self.domain)
            .field("api_token", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("authorization_mode", &self.authorization_mode)
            .field("http", &self.http)
            .finish()
    }
}

/// Scheme used in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorizationMode {
    /// Okta API token (`SSWS <token>`).
    #[default]
    Ssws,
    /// OAuth 2.0 access token (`Bearer <token>`).
    Bearer,
}

impl AuthorizationMode {
    pub fn scheme(self) -> &'static str {
        match self {
            AuthorizationMode::Ssws => "SSWS",
            AuthorizationMode::Bearer => "Bearer",
        }
    }
}

impl FromStr for AuthorizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssws" => Ok(AuthorizationMode::Ssws),
            "bearer" => Ok(AuthorizationMode::Bearer),
            other => Err(format!("unknown authorization mode: {}", other)),
        }
    }
}

/// Connection pool and timeout settings for the outbound HTTP client.
#[derive(Debug, Clone)]
pub struct HttpPoolConfig {
    pub max_idle_conns: usize,
    pub max_idle_conns_per_host: usize,
    /// How long an idle pooled connection is kept.
    pub idle_conn_timeout: Duration,
    /// Bounds TCP connect plus TLS handshake.
    pub tls_handshake_timeout: Duration,
    /// Bounds each read while waiting on the response.
    pub response_header_timeout: Duration,
    /// Hard cap on a whole request.
    pub request_timeout: Duration,
}

impl Default for HttpPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_conns: 100,
            max_idle_conns_per_host: 10,
            idle_conn_timeout: Duration::from_secs(90),
            tls_handshake_timeout: Duration::from_secs(10),
            response_header_timeout: Duration::from_secs(20),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpPoolConfig {
    /// Idle connections kept for the org host. The client only ever talks to
    /// one host, so the global cap bounds the per-host cap.
    pub fn effective_idle_per_host(&self) -> usize {
        self.max_idle_conns_per_host.min(self.max_idle_conns)
    }
}
