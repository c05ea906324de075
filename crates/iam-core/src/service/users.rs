use std::sync::Arc;

use iam_shared::dto::{CreateUserRequest, UserResponse};

use super::deadline::Deadline;
use super::mapper::{to_new_provider_user, to_user_response};
use crate::domain::ProviderUser;
use crate::error::{ProviderError, UserOperation, UserServiceError};
use crate::ports::IdentityProvider;

/// Translates gateway requests into identity provider calls.
#[derive(Clone)]
pub struct UserService {
    provider: Arc<dyn IdentityProvider>,
}

impl UserService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn create_user(
        &self,
        deadline: Deadline,
        req: &CreateUserRequest,
    ) -> Result<UserResponse, UserServiceError> {
        let payload = to_new_provider_user(req);

        let user = deadline
            .run(self.provider.create_user(&payload))
            .await
            .map_err(|e| fail(UserOperation::Create, "failed to create user".to_string(), e))?;

        Ok(into_response(&user))
    }

    pub async fn get_user(
        &self,
        deadline: Deadline,
        id: &str,
    ) -> Result<UserResponse, UserServiceError> {
        let user = deadline
            .run(self.provider.get_user(id))
            .await
            .map_err(|e| fail(UserOperation::Get, format!("failed to get user {id}"), e))?;

        Ok(into_response(&user))
    }

    pub async fn list_users(&self, deadline: Deadline) -> Result<Vec<UserResponse>, UserServiceError> {
        let users = deadline
            .run(self.provider.list_users())
            .await
            .map_err(|e| fail(UserOperation::List, "failed to list users".to_string(), e))?;

        Ok(users.iter().map(into_response).collect())
    }

    pub async fn deactivate_user(&self, deadline: Deadline, id: &str) -> Result<(), UserServiceError> {
        deadline
            .run(self.provider.deactivate_user(id))
            .await
            .map_err(|e| fail(UserOperation::Deactivate, format!("failed to deactivate user {id}"), e))
    }

    pub async fn delete_user(&self, deadline: Deadline, id: &str) -> Result<(), UserServiceError> {
        deadline
            .run(self.provider.delete_user(id))
            .await
            .map_err(|e| fail(UserOperation::Delete, format!("failed to delete user {id}"), e))
    }
}

fn into_response(user: &ProviderUser) -> UserResponse {
    to_user_response(Some(user)).unwrap_or_default()
}

fn fail(operation: UserOperation, context: String, cause: ProviderError) -> UserServiceError {
    let err = UserServiceError::new(operation, context, cause);
    tracing::error!(
        operation = ?operation,
        provider_status = ?err.cause().status(),
        timed_out = err.is_timeout(),
        error = %err,
        "identity provider call failed"
    );
    err
}
