/// ChatApp session core.
///
/// A [`Session`] owns the user directory and the message store and walks
/// Unregistered -> Registered -> Active, or Registered -> Locked after too
/// many failed logins. Message operations require the Active state.

pub mod auth;
pub mod error;
pub mod limits;
pub mod messages;
pub mod session;

pub use error::ChatError;
pub use limits::{MaxMessagesError, parse_max_messages};
pub use session::{DEFAULT_MAX_LOGIN_ATTEMPTS, Login, Session, SessionState};
