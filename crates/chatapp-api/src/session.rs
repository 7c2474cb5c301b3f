use chrono::{DateTime, Local};
use rand::Rng;
use rand::rngs::StdRng;

use chatapp_db::{MessageStore, UserDirectory};
use chatapp_types::models::User;

use crate::error::ChatError;

pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unregistered,
    Registered,
    /// Logged in; message operations are allowed.
    Active,
    /// Too many failed logins. Terminal until the process restarts.
    Locked,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct Login {
    pub username: String,
    pub display_name: String,
    pub at: DateTime<Local>,
}

impl Login {
    pub fn timestamp(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Owns all process state: the directory, the store and the login state.
pub struct Session<R = StdRng> {
    pub(crate) users: UserDirectory,
    pub(crate) messages: MessageStore<R>,
    pub(crate) state: SessionState,
    pub(crate) registered: Option<User>,
    pub(crate) display_name: String,
    pub(crate) login: Option<Login>,
    pub(crate) failed_attempts: u32,
    pub(crate) max_attempts: u32,
}

impl<R: Rng> Session<R> {
    pub fn new(users: UserDirectory, messages: MessageStore<R>) -> Self {
        Self {
            users,
            messages,
            state: SessionState::Unregistered,
            registered: None,
            display_name: String::new(),
            login: None,
            failed_attempts: 0,
            max_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
        }
    }

    /// Values below 1 are raised to 1.
    pub fn with_max_login_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max.max(1);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn registered_user(&self) -> Option<&User> {
        self.registered.as_ref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn current_login(&self) -> Option<&Login> {
        self.login.as_ref()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn max_login_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failed_attempts)
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn messages(&self) -> &MessageStore<R> {
        &self.messages
    }

    /// Gate for every message operation.
    pub(crate) fn require_login(&self) -> Result<&Login, ChatError> {
        match (&self.state, &self.login) {
            (SessionState::Active, Some(login)) => Ok(login),
            _ => Err(ChatError::NotAuthorized),
        }
    }
}
