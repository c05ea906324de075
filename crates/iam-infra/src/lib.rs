//! # IAM Infrastructure
//!
//! Concrete implementations of the [`iam_core::ports::IdentityProvider`] port.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All providers enabled
//! - `minimal` - In-memory provider only, no HTTP client
//! - `okta` - Okta Users API client via reqwest

pub mod memory;

#[cfg(feature = "okta")]
pub mod okta;

pub use memory::{InMemoryIdentityProvider, RecordedCall};

#[cfg(feature = "okta")]
pub use okta::{AuthorizationMode, HttpPoolConfig, OktaClient, OktaConfig};
