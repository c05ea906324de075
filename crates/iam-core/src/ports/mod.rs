//! Ports - trait definitions for external dependencies.
//! Infrastructure crates implement these against real or in-memory backends.

mod identity_provider;

pub use identity_provider::IdentityProvider;
