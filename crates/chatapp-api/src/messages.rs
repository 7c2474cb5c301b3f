use rand::Rng;
use tracing::info;

use chatapp_db::seed;
use chatapp_types::api::SendMessageRequest;
use chatapp_types::models::{Message, MessageStatus, ReportEntry};
use chatapp_types::validation::Field;

use crate::error::ChatError;
use crate::session::Session;

impl<R: Rng> Session<R> {
    /// Validates and appends one Sent message.
    pub fn send_message(&mut self, req: &SendMessageRequest) -> Result<Message, ChatError> {
        self.require_login()?;

        let invalid: Vec<Field> = [
            (Field::Recipient, req.recipient.as_str()),
            (Field::MessageBody, req.body.as_str()),
        ]
        .into_iter()
        .filter(|(field, value)| !field.check(value))
        .map(|(field, _)| field)
        .collect();
        if !invalid.is_empty() {
            return Err(ChatError::ValidationFailed(invalid));
        }

        let msg = self
            .messages
            .append(&req.recipient, &req.body, MessageStatus::Sent);
        info!("Message #{} sent to {}", msg.number, msg.recipient);
        Ok(msg)
    }

    /// Loads the sample conversation.
    pub fn seed_sample_data(&mut self) -> Result<(), ChatError> {
        self.require_login()?;
        seed::run(&mut self.messages);
        Ok(())
    }

    /// Sent messages, most recent first. May be empty.
    pub fn recent_messages(&self) -> Result<Vec<Message>, ChatError> {
        self.require_login()?;
        Ok(self.messages.list_recent())
    }

    /// (sender, recipient) for every sent message, oldest first. The sender
    /// is always the logged-in user.
    pub fn sender_recipients(&self) -> Result<Vec<(String, String)>, ChatError> {
        let login = self.require_login()?;
        Ok(self
            .messages
            .sent()
            .iter()
            .map(|m| (login.username.clone(), m.recipient.clone()))
            .collect())
    }

    pub fn longest_message(&self) -> Result<Option<&Message>, ChatError> {
        self.require_login()?;
        Ok(self.messages.longest())
    }

    pub fn find_message(&self, id: &str) -> Result<&Message, ChatError> {
        self.require_login()?;
        self.messages
            .find_by_id(id)
            .ok_or(ChatError::NotFound("Message ID"))
    }

    /// All sent messages to `recipient`; an empty result is not an error.
    pub fn messages_to(&self, recipient: &str) -> Result<Vec<&Message>, ChatError> {
        self.require_login()?;
        Ok(self.messages.find_by_recipient(recipient))
    }

    pub fn delete_message(&mut self, hash: &str) -> Result<(), ChatError> {
        self.require_login()?;
        if self.messages.delete_by_hash(hash) {
            Ok(())
        } else {
            Err(ChatError::NotFound("Message hash"))
        }
    }

    pub fn report(&self) -> Result<Vec<ReportEntry>, ChatError> {
        self.require_login()?;
        Ok(self.messages.report())
    }
}
