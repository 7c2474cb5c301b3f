use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered account. Created once by the directory and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Plaintext; compared by equality at login.
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
}

/// Which list a message lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageStatus {
    Sent,
    Stored,
    Disregarded,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Stored => "Stored",
            Self::Disregarded => "Disregarded",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message held by the store.
///
/// `id` is ten random decimal digits and is not guaranteed unique.
/// `number` comes from the store's counter and is never reused.
/// `hash` is the lowercase hex SHA-256 of `id`, `number`, `recipient` and `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub number: u32,
    pub recipient: String,
    pub body: String,
    pub hash: String,
    pub status: MessageStatus,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Num: {} | Recipient: {} | Message: {} | Hash: {} | Flag: {}",
            self.id, self.number, self.recipient, self.body, self.hash, self.status
        )
    }
}

/// One row of the sent-messages report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub hash: String,
    pub recipient: String,
    pub body: String,
}

impl From<&Message> for ReportEntry {
    fn from(msg: &Message) -> Self {
        Self {
            hash: msg.hash.clone(),
            recipient: msg.recipient.clone(),
            body: msg.body.clone(),
        }
    }
}
