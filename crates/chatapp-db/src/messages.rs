use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use chatapp_crypto::{IdentityHasher, compute_hash};
use chatapp_types::models::{Message, MessageStatus, ReportEntry};

/// In-memory message store.
///
/// Sent, stored and disregarded messages live in separate lists, each in
/// insertion order. Every query below looks at sent messages only.
/// `counter` is shared by all three lists and never goes backwards, so a
/// message number is never reused even after deletion.
pub struct MessageStore<R = StdRng> {
    hasher: IdentityHasher<R>,
    sent: Vec<Message>,
    stored: Vec<Message>,
    disregarded: Vec<Message>,
    counter: u32,
}

impl<R: Rng> MessageStore<R> {
    pub fn new(hasher: IdentityHasher<R>) -> Self {
        Self {
            hasher,
            sent: Vec::new(),
            stored: Vec::new(),
            disregarded: Vec::new(),
            counter: 0,
        }
    }

    /// Builds the next message and files it under `status`.
    /// Callers validate recipient and body first.
    pub fn append(&mut self, recipient: &str, body: &str, status: MessageStatus) -> Message {
        let id = self.hasher.generate_message_id();
        self.counter += 1;
        let hash = compute_hash(&id, self.counter, recipient, body);

        let msg = Message {
            id,
            number: self.counter,
            recipient: recipient.to_string(),
            body: body.to_string(),
            hash,
            status,
        };
        debug!("Appended message #{} ({}) to {}", msg.number, status, msg.recipient);

        match status {
            MessageStatus::Sent => self.sent.push(msg.clone()),
            MessageStatus::Stored => self.stored.push(msg.clone()),
            MessageStatus::Disregarded => self.disregarded.push(msg.clone()),
        }
        msg
    }

    /// Sent messages, most recent first.
    pub fn list_recent(&self) -> Vec<Message> {
        self.sent.iter().rev().cloned().collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Message> {
        self.sent.iter().find(|m| m.id == id)
    }

    pub fn find_by_recipient(&self, recipient: &str) -> Vec<&Message> {
        self.sent.iter().filter(|m| m.recipient == recipient).collect()
    }

    /// Longest body by character count; the earliest wins a tie.
    pub fn longest(&self) -> Option<&Message> {
        let mut iter = self.sent.iter();
        let mut longest = iter.next()?;
        let mut longest_len = longest.body.chars().count();
        for msg in iter {
            let len = msg.body.chars().count();
            if len > longest_len {
                longest = msg;
                longest_len = len;
            }
        }
        Some(longest)
    }

    /// Removes the first sent message with this hash.
    pub fn delete_by_hash(&mut self, hash: &str) -> bool {
        match self.sent.iter().position(|m| m.hash == hash) {
            Some(idx) => {
                let removed = self.sent.remove(idx);
                info!("Deleted message #{} by hash", removed.number);
                true
            }
            None => false,
        }
    }

    pub fn report(&self) -> Vec<ReportEntry> {
        self.sent.iter().map(ReportEntry::from).collect()
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    pub fn stored(&self) -> &[Message] {
        &self.stored
    }

    pub fn disregarded(&self) -> &[Message] {
        &self.disregarded
    }

    /// Number of messages ever appended, across all lists.
    pub fn counter(&self) -> u32 {
        self.counter
    }
}
