//! In-memory provider - used when no identity provider is configured, and in tests.

mod provider;

pub use provider::{InMemoryIdentityProvider, RecordedCall};
