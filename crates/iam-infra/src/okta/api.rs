//! Okta Users and Org API calls.

use async_trait::async_trait;
use tracing::debug;

use iam_core::domain::{NewProviderUser, OrgSettings, ProviderUser};
use iam_core::error::ProviderError;
use iam_core::ports::IdentityProvider;

use super::client::OktaClient;

#[async_trait]
impl IdentityProvider for OktaClient {
    async fn create_user(&self, user: &NewProviderUser) -> Result<ProviderUser, ProviderError> {
        let url = self.endpoint(&["api", "v1", "users"])?;
        debug!("Okta POST {}", url);
        self.send_json(self.http().post(url).json(user)).await
    }

    async fn get_user(&self, id: &str) -> Result<ProviderUser, ProviderError> {
        let url = self.endpoint(&["api", "v1", "users", id])?;
        debug!("Okta GET {}", url);
        self.send_json(self.http().get(url)).await
    }

    async fn list_users(&self) -> Result<Vec<ProviderUser>, ProviderError> {
        let url = self.endpoint(&["api", "v1", "users"])?;
        debug!("Okta GET {}", url);
        self.send_json(self.http().get(url)).await
    }

    async fn deactivate_user(&self, id: &str) -> Result<(), ProviderError> {
        let url = self.endpoint(&["api", "v1", "users", id, "lifecycle", "deactivate"])?;
        debug!("Okta POST {}", url);
        self.send_empty(self.http().post(url)).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), ProviderError> {
        let url = self.endpoint(&["api", "v1", "users", id])?;
        debug!("Okta DELETE {}", url);
        self.send_empty(self.http().delete(url)).await
    }

    async fn org_settings(&self) -> Result<OrgSettings, ProviderError> {
        let url = self.endpoint(&["api", "v1", "org"])?;
        debug!("Okta GET {}", url);
        self.send_json(self.http().get(url)).await
    }

    async fn validate_connection(&self) -> Result<(), ProviderError> {
        OktaClient::validate_connection(self).await
    }
}
