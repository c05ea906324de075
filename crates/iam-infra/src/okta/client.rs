//! Okta HTTP client wrapper (reqwest-based).

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use iam_core::error::ProviderError;

use super::config::OktaConfig;

/// Configured handle to an Okta org.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct OktaClient {
    org_url: Url,
    http: Client,
    config: OktaConfig,
}

/// Error body returned by the Okta API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OktaErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_summary: Option<String>,
    #[serde(default)]
    error_causes: Vec<OktaErrorCause>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OktaErrorCause {
    #[serde(default)]
    error_summary: String,
}

impl OktaClient {
    /// Build a client for the configured org. Does not contact the provider.
    pub fn new(config: OktaConfig) -> Result<Self, ProviderError> {
        let org_url = Url::parse(&config.org_url()).map_err(|e| {
            ProviderError::InvalidConfig(format!("invalid org url '{}': {}", config.org_url(), e))
        })?;
        if org_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidConfig(format!(
                "org url '{}' cannot be a base",
                org_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!(
            "{} {}",
            config.authorization_mode.scheme(),
            config.api_token
        ))
        .map_err(|_| ProviderError::InvalidConfig("api token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let pool = &config.http;
        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("iam-gateway/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(pool.effective_idle_per_host())
            .pool_idle_timeout(pool.idle_conn_timeout)
            .connect_timeout(pool.tls_handshake_timeout)
            .read_timeout(pool.response_header_timeout)
            .timeout(pool.request_timeout)
            .build()
            .map_err(|e| ProviderError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(org_url = %org_url, "Okta client configured");

        Ok(Self {
            org_url,
            http,
            config,
        })
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn config(&self) -> &OktaConfig {
        &self.config
    }

    pub fn org_url(&self) -> &Url {
        &self.org_url
    }

    /// Check the org is reachable: `GET /api/v1/org` must answer 2xx.
    pub async fn validate_connection(&self) -> Result<(), ProviderError> {
        let url = self.endpoint(&["api", "v1", "org"])?;
        let response = self.http.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Okta connectivity check failed");
            return Err(ProviderError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }

    /// Absolute URL for the given path segments; segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.org_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidConfig(format!("org url '{}' cannot be a base", self.org_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await.map_err(transport_error)?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ProviderError> {
        let response = request.send().await.map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Transport(format!("request timed out: {}", err))
    } else {
        ProviderError::Transport(err.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed: OktaErrorBody = serde_json::from_str(&body).unwrap_or_default();

    let mut summary = parsed
        .error_summary
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    let causes: Vec<&str> = parsed
        .error_causes
        .iter()
        .map(|c| c.error_summary.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if !causes.is_empty() {
        summary = format!("{} ({})", summary, causes.join("; "));
    }

    Err(ProviderError::Api {
        status: status.as_u16(),
        code: parsed.error_code,
        summary,
    })
}
