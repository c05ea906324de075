//! Provider-native types - the identity provider's view of users and the org.

mod org;
mod user;

pub use org::OrgSettings;
pub use user::{
    NewProviderUser, PasswordCredential, ProviderCredentials, ProviderUser, ProviderUserProfile,
};
