use chrono::Local;
use rand::Rng;
use tracing::{info, warn};

use chatapp_types::api::{LoginRequest, RegisterRequest};
use chatapp_types::models::User;

use crate::error::ChatError;
use crate::session::{Login, Session, SessionState};

impl<R: Rng> Session<R> {
    /// Registers a user. Nothing is committed unless every field is valid and
    /// the username is free. The first successful registration becomes the
    /// session's account and moves Unregistered to Registered.
    pub fn register(&mut self, req: &RegisterRequest) -> Result<&User, ChatError> {
        let user = match self.users.register(&req.username, &req.password, &req.phone) {
            Ok(user) => user.clone(),
            Err(e) => {
                warn!("Registration failed: {}", e);
                return Err(e.into());
            }
        };

        if self.registered.is_none() {
            self.display_name = req.display_name();
            self.registered = Some(user);
        }
        if self.state == SessionState::Unregistered {
            self.state = SessionState::Registered;
        }

        self.users
            .find_by_username(&req.username)
            .ok_or(ChatError::NotFound("User"))
    }

    /// One login attempt.
    ///
    /// A failure counts against the attempt limit; reaching it locks the
    /// session for good. Success resets the counter. Logging in again while
    /// active returns the existing login.
    pub fn login(&mut self, req: &LoginRequest) -> Result<&Login, ChatError> {
        match self.state {
            SessionState::Locked => return Err(ChatError::AttemptsExceeded),
            SessionState::Unregistered => return Err(ChatError::NotAuthorized),
            SessionState::Active => return self.require_login(),
            SessionState::Registered => {}
        }

        if self.users.check_credentials(&req.username, &req.password) {
            self.failed_attempts = 0;
            self.state = SessionState::Active;
            info!("User '{}' logged in", req.username);
            return Ok(&*self.login.insert(Login {
                username: req.username.clone(),
                display_name: self.display_name.clone(),
                at: Local::now(),
            }));
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= self.max_attempts {
            self.state = SessionState::Locked;
            warn!(
                "Login locked after {} failed attempts (last username '{}')",
                self.failed_attempts, req.username
            );
            return Err(ChatError::AttemptsExceeded);
        }

        warn!(
            "Failed login for '{}' ({} of {})",
            req.username, self.failed_attempts, self.max_attempts
        );
        Err(ChatError::AuthenticationFailed {
            remaining: self.remaining_attempts(),
        })
    }
}
