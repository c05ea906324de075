//! Error types for provider calls and the user adapter service.

use std::time::Duration;

use thiserror::Error;

/// Failures talking to the identity provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider returned HTTP {status}: {summary}")]
    Api {
        status: u16,
        code: Option<String>,
        summary: String,
    },

    #[error("provider returned unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl ProviderError {
    /// HTTP status reported by the provider, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Operations the adapter performs against the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOperation {
    Create,
    Get,
    List,
    Deactivate,
    Delete,
}

impl UserOperation {
    /// Fixed message exposed to API clients when this operation fails.
    pub fn client_message(self) -> &'static str {
        match self {
            UserOperation::Create => "Failed to create user",
            UserOperation::Get => "Failed to retrieve user",
            UserOperation::List => "Failed to list users",
            UserOperation::Deactivate => "Failed to deactivate user",
            // Deletion only ever runs after a successful deactivation.
            UserOperation::Delete => "Failed to delete user after deactivation",
        }
    }
}

/// Adapter failure: which operation failed, a log-friendly context, and the
/// provider cause. Only [`UserServiceError::client_message`] may reach clients.
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct UserServiceError {
    operation: UserOperation,
    context: String,
    #[source]
    source: ProviderError,
}

impl UserServiceError {
    pub fn new(operation: UserOperation, context: impl Into<String>, source: ProviderError) -> Self {
        Self {
            operation,
            context: context.into(),
            source,
        }
    }

    pub fn operation(&self) -> UserOperation {
        self.operation
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn cause(&self) -> &ProviderError {
        &self.source
    }

    pub fn client_message(&self) -> &'static str {
        self.operation.client_message()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.source, ProviderError::DeadlineExceeded(_))
    }
}
