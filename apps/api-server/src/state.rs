//! Application state - shared across all handlers.

use std::sync::Arc;

use iam_core::error::ProviderError;
use iam_core::ports::IdentityProvider;
use iam_core::service::UserService;
use iam_infra::InMemoryIdentityProvider;
use iam_infra::okta::{OktaClient, OktaConfig};

use crate::config::ProviderKind;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn IdentityProvider>,
    pub users: UserService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Okta is the default and requires `OKTA_DOMAIN`; a missing or malformed
    /// Okta configuration is an error. The in-memory provider is only used
    /// when explicitly selected.
    pub fn new(kind: ProviderKind, okta: Option<&OktaConfig>) -> Result<Self, ProviderError> {
        let provider: Arc<dyn IdentityProvider> = match kind {
            ProviderKind::Okta => {
                let config = okta.ok_or_else(|| {
                    ProviderError::InvalidConfig("OKTA_DOMAIN is not set".to_string())
                })?;
                Arc::new(OktaClient::new(config.clone())?)
            }
            ProviderKind::Memory => {
                tracing::warn!("IAM_PROVIDER=memory. Users live in process memory and are lost on restart.");
                Arc::new(InMemoryIdentityProvider::new())
            }
        };

        tracing::info!(provider = ?kind, "Application state initialized");

        Ok(Self::with_provider(provider))
    }

    pub fn with_provider(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            users: UserService::new(provider.clone()),
            provider,
        }
    }
}
