/// Shared ChatApp types.
///
/// Model types used by the user directory, the message store and the session,
/// plus the input-format rules every layer validates against.

pub mod api;
pub mod models;
pub mod validation;
