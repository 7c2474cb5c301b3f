use thiserror::Error;
use tracing::{debug, info};

use chatapp_types::models::User;
use chatapp_types::validation::{self, Field};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("invalid registration fields: {}", list_fields(.0))]
    Invalid(Vec<Field>),

    #[error("username '{0}' already exists")]
    UsernameTaken(String),
}

fn list_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append-only, insertion-ordered registry of users.
///
/// Usernames are unique under case-sensitive equality.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-validates all three fields before checking for a duplicate username.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        phone: &str,
    ) -> Result<&User, DirectoryError> {
        let invalid = validation::invalid_registration_fields(username, password, phone);
        if !invalid.is_empty() {
            debug!("Registration rejected for '{}': {}", username, list_fields(&invalid));
            return Err(DirectoryError::Invalid(invalid));
        }

        if self.find_by_username(username).is_some() {
            debug!("Registration rejected: username '{}' taken", username);
            return Err(DirectoryError::UsernameTaken(username.to_string()));
        }

        self.users.push(User {
            username: username.to_string(),
            password: password.to_string(),
            phone: phone.to_string(),
        });
        info!("Registered user '{}' ({} total)", username, self.users.len());

        Ok(&self.users[self.users.len() - 1])
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// True only if both inputs pass their format rules and an exact
    /// username/password pair is registered. Never mutates.
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        if !validation::is_valid_username(username) || !validation::is_valid_password(password) {
            return false;
        }
        self.users
            .iter()
            .any(|u| u.username == username && u.password == password)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
