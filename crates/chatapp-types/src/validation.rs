//! Input-format rules for registration, login and messaging.
//!
//! All checks are total: malformed input yields `false`, never a panic.
//! Lengths count Unicode scalar values.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_USERNAME_CHARS: usize = 5;
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const PHONE_CHARS: usize = 12;
pub const PHONE_PREFIX: &str = "+27";
pub const MAX_RECIPIENT_CHARS: usize = 15;
pub const MAX_BODY_CHARS: usize = 250;

/// Characters that satisfy the password "special character" rule.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A user-supplied field that has a format rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Username,
    Password,
    Phone,
    Recipient,
    MessageBody,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
            Self::Phone => "Phone Number",
            Self::Recipient => "Recipient",
            Self::MessageBody => "Message",
        }
    }

    /// Human-readable statement of the rule the field must satisfy.
    pub fn requirement(&self) -> &'static str {
        match self {
            Self::Username => "must contain '_' and be ≤ 5 characters",
            Self::Password => {
                "must be ≥ 8 chars with uppercase, lowercase, digit, and special character"
            }
            Self::Phone => "must be +27 followed by 9 digits, starting with 6, 7, or 8",
            Self::Recipient => "must start with '+' followed by digits, max 15 characters",
            Self::MessageBody => "must be 250 characters or less",
        }
    }

    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Username => is_valid_username(value),
            Self::Password => is_valid_password(value),
            Self::Phone => is_valid_phone(value),
            Self::Recipient => is_valid_recipient(value),
            Self::MessageBody => is_valid_message_body(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.requirement())
    }
}

pub fn is_valid_username(username: &str) -> bool {
    username.contains('_') && username.chars().count() <= MAX_USERNAME_CHARS
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// South African mobile number: `+27` then a 6, 7 or 8, twelve characters in all.
/// Characters after the fourth are not inspected.
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.chars().count() != PHONE_CHARS || !phone.starts_with(PHONE_PREFIX) {
        return false;
    }
    matches!(phone.chars().nth(3), Some('6'..='8'))
}

pub fn is_valid_recipient(recipient: &str) -> bool {
    let Some(number) = recipient.strip_prefix('+') else {
        return false;
    };
    let len = recipient.chars().count();
    len > 1 && len <= MAX_RECIPIENT_CHARS && number.chars().all(|c| c.is_ascii_digit())
}

/// Empty bodies are allowed.
pub fn is_valid_message_body(body: &str) -> bool {
    body.chars().count() <= MAX_BODY_CHARS
}

/// Returns the registration fields that fail their rule, in form order.
pub fn invalid_registration_fields(username: &str, password: &str, phone: &str) -> Vec<Field> {
    [
        (Field::Username, username),
        (Field::Password, password),
        (Field::Phone, phone),
    ]
    .into_iter()
    .filter(|(field, value)| !field.check(value))
    .map(|(field, _)| field)
    .collect()
}
