//! # IAM Core
//!
//! The adapter layer of the gateway.
//! Provider-native user types, the [`ports::IdentityProvider`] port, and the
//! [`service::UserService`] that maps between gateway DTOs and provider users.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{ProviderError, UserOperation, UserServiceError};
