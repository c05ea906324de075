use async_trait::async_trait;

use crate::domain::{NewProviderUser, OrgSettings, ProviderUser};
use crate::error::ProviderError;

/// User-management surface of the remote identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a user from a profile and password credential.
    async fn create_user(&self, user: &NewProviderUser) -> Result<ProviderUser, ProviderError>;

    /// Fetch a single user by provider id.
    async fn get_user(&self, id: &str) -> Result<ProviderUser, ProviderError>;

    /// List users in the provider's native order.
    async fn list_users(&self) -> Result<Vec<ProviderUser>, ProviderError>;

    /// Move a user to the deprovisioned state.
    async fn deactivate_user(&self, id: &str) -> Result<(), ProviderError>;

    /// Permanently delete a deprovisioned user.
    async fn delete_user(&self, id: &str) -> Result<(), ProviderError>;

    /// Read the organization settings.
    async fn org_settings(&self) -> Result<OrgSettings, ProviderError>;

    /// Lightweight connectivity probe.
    async fn validate_connection(&self) -> Result<(), ProviderError> {
        self.org_settings().await.map(|_| ())
    }
}
