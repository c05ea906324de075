//! User adapter service - the only caller of the identity provider port.

mod deadline;
mod mapper;
mod users;

pub use deadline::Deadline;
pub use mapper::{format_timestamp, to_new_provider_user, to_user_response};
pub use users::UserService;
