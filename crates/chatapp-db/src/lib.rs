pub mod messages;
pub mod seed;
pub mod users;

pub use messages::MessageStore;
pub use users::{DirectoryError, UserDirectory};
