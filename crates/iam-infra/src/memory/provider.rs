//! In-memory identity provider.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use iam_core::domain::{NewProviderUser, OrgSettings, ProviderUser};
use iam_core::error::{ProviderError, UserOperation};
use iam_core::ports::IdentityProvider;

const STATUS_ACTIVE: &str = "ACTIVE";
const STATUS_PROVISIONED: &str = "PROVISIONED";
const STATUS_DEPROVISIONED: &str = "DEPROVISIONED";

/// A provider call as seen by [`InMemoryIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: UserOperation,
    pub user_id: Option<String>,
}

/// Identity provider backed by a `Vec` behind an async `RwLock`.
///
/// Follows the provider's lifecycle rules closely enough for local runs:
/// users must be deprovisioned before deletion and logins are unique.
/// Note: Data is lost on process restart.
pub struct InMemoryIdentityProvider {
    users: RwLock<Vec<ProviderUser>>,
    failing: RwLock<HashSet<UserOperation>>,
    calls: RwLock<Vec<RecordedCall>>,
    unreachable: AtomicBool,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            failing: RwLock::new(HashSet::new()),
            calls: RwLock::new(Vec::new()),
            unreachable: AtomicBool::new(false),
        }
    }

    /// Insert a user as-is.
    pub async fn seed(&self, user: ProviderUser) {
        self.users.write().await.push(user);
    }

    /// Make every subsequent call of `operation` fail with a 500.
    pub async fn fail_on(&self, operation: UserOperation) {
        self.failing.write().await.insert(operation);
    }

    /// Make the connectivity check fail.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Calls received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, operation: UserOperation, user_id: Option<&str>) -> Result<(), ProviderError> {
        self.calls.write().await.push(RecordedCall {
            operation,
            user_id: user_id.map(str::to_string),
        });

        if self.failing.read().await.contains(&operation) {
            return Err(ProviderError::Api {
                status: 500,
                code: Some("E0000009".to_string()),
                summary: format!("Internal Server Error ({:?} disabled)", operation),
            });
        }
        Ok(())
    }

    fn generate_id() -> String {
        let simple = Uuid::new_v4().simple().to_string();
        format!("00u{}", &simple[..17])
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &str) -> ProviderError {
    ProviderError::Api {
        status: 404,
        code: Some("E0000007".to_string()),
        summary: format!("Not found: Resource not found: {} (User)", id),
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, user: &NewProviderUser) -> Result<ProviderUser, ProviderError> {
        self.record(UserOperation::Create, None).await?;

        let mut users = self.users.write().await;
        if let Some(login) = user.profile.login.as_deref() {
            let taken = users
                .iter()
                .filter_map(|u| u.profile.as_ref()?.login.as_deref())
                .any(|existing| existing.eq_ignore_ascii_case(login));
            if taken {
                return Err(ProviderError::Api {
                    status: 400,
                    code: Some("E0000001".to_string()),
                    summary: "Api validation failed: login (An object with this field already exists in the current organization)".to_string(),
                });
            }
        }

        let now = Utc::now();
        let status = if user.credentials.password.value.is_empty() {
            STATUS_PROVISIONED
        } else {
            STATUS_ACTIVE
        };
        let created = ProviderUser {
            id: Self::generate_id(),
            status: status.to_string(),
            created: Some(now),
            activated: (status == STATUS_ACTIVE).then_some(now),
            status_changed: Some(now),
            last_updated: Some(now),
            password_changed: (!user.credentials.password.value.is_empty()).then_some(now),
            profile: Some(user.profile.clone()),
            ..Default::default()
        };

        users.push(created.clone());
        tracing::debug!(user_id = %created.id, "In-memory user created");
        Ok(created)
    }

    async fn get_user(&self, id: &str) -> Result<ProviderUser, ProviderError> {
        self.record(UserOperation::Get, Some(id)).await?;

        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_users(&self) -> Result<Vec<ProviderUser>, ProviderError> {
        self.record(UserOperation::List, None).await?;
        Ok(self.users.read().await.clone())
    }

    async fn deactivate_user(&self, id: &str) -> Result<(), ProviderError> {
        self.record(UserOperation::Deactivate, Some(id)).await?;

        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == id).ok_or_else(|| not_found(id))?;
        let now = Utc::now();
        user.status = STATUS_DEPROVISIONED.to_string();
        user.status_changed = Some(now);
        user.last_updated = Some(now);
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), ProviderError> {
        self.record(UserOperation::Delete, Some(id)).await?;

        let mut users = self.users.write().await;
        let pos = users.iter().position(|u| u.id == id).ok_or_else(|| not_found(id))?;
        if users[pos].status != STATUS_DEPROVISIONED {
            return Err(ProviderError::Api {
                status: 403,
                code: Some("E0000006".to_string()),
                summary: format!("User {} must be deactivated before deletion", id),
            });
        }
        users.remove(pos);
        Ok(())
    }

    async fn org_settings(&self) -> Result<OrgSettings, ProviderError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(ProviderError::UnexpectedStatus(503));
        }
        Ok(OrgSettings {
            id: "00o-in-memory".to_string(),
            company_name: Some("In-memory org".to_string()),
            subdomain: None,
            status: Some(STATUS_ACTIVE.to_string()),
        })
    }
}
