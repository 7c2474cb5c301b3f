use thiserror::Error;

use chatapp_db::DirectoryError;
use chatapp_types::validation::Field;

/// Every failure a session operation can report. All are user-facing and
/// recoverable except `AttemptsExceeded`, which ends the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Invalid input: {}", describe(.0))]
    ValidationFailed(Vec<Field>),

    #[error("Username already exists!")]
    UsernameTaken(String),

    #[error("Invalid username or password.\nAttempts remaining: {remaining}")]
    AuthenticationFailed { remaining: u32 },

    #[error("Maximum login attempts exceeded.\nPlease restart the application to try again.")]
    AttemptsExceeded,

    #[error("You must be logged in to do that.")]
    NotAuthorized,

    #[error("{0} not found.")]
    NotFound(&'static str),
}

fn describe(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<DirectoryError> for ChatError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Invalid(fields) => Self::ValidationFailed(fields),
            DirectoryError::UsernameTaken(name) => Self::UsernameTaken(name),
        }
    }
}
