//! Dialog text rendered from session results.

use chatapp_api::Login;
use chatapp_types::models::{Message, ReportEntry};
use chatapp_types::validation::Field;

pub const WELCOME: &str = "Welcome to the ChatApp!

This application will guide you through:
1. User Registration
2. User Login
3. Chat Interface

Please follow the prompts to continue.";

pub const REGISTRATION_INTRO: &str = "=== USER REGISTRATION ===

Please provide the following information:
• First and Last Name
• Username (must contain '_' and be ≤ 5 characters)
• Password (≥ 8 chars, uppercase, lowercase, digit, special char)
• South African phone number (+27xxxxxxxxx)";

pub const LOGIN_INTRO: &str = "=== USER LOGIN ===

Please enter your credentials to login.";

pub const MENU: &str = "Please choose an option:
1) Send Messages
2) Show recently sent messages
3) Display sender and recipient of all sent messages
4) Display the longest sent message
5) Search for a message ID
6) Search for all messages sent to a recipient
7) Delete a message using message hash
8) Display a report of all sent messages
9) Quit";

/// Characters of the hash shown in the recent-messages listing.
const HASH_PREVIEW: usize = 16;

pub fn validation_results(invalid: &[Field]) -> String {
    let mut out = String::from("Validation Results:\n\n");
    for field in [Field::Username, Field::Password, Field::Phone] {
        if invalid.contains(&field) {
            out.push_str(&format!("✗ {}: Invalid ({})\n", field.label(), field.requirement()));
        } else {
            out.push_str(&format!("✓ {}: Valid\n", field.label()));
        }
    }
    out
}

pub fn registration_success(display_name: &str, username: &str, phone: &str) -> String {
    format!(
        "Registration Successful!\n\nUser: {}\nUsername: {}\nPhone: {}\n\nYou can now proceed to login.",
        display_name, username, phone
    )
}

pub fn login_success(login: &Login) -> String {
    format!(
        "Login Successful!\n\nWelcome back, {}!\nIt's great to see you again.\n\nLogin Time: {}",
        login.display_name,
        login.timestamp()
    )
}

pub fn recent_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages sent yet.".to_string();
    }
    let mut out = format!("Recent Messages ({} total):\n\n", messages.len());
    for msg in messages {
        let preview: String = msg.hash.chars().take(HASH_PREVIEW).collect();
        out.push_str(&format!(
            "Message #{}:\n  To: {}\n  Text: {}\n  ID: {}\n  Hash: {}...\n\n",
            msg.number, msg.recipient, msg.body, msg.id, preview
        ));
    }
    out
}

pub fn sender_recipients(pairs: &[(String, String)]) -> String {
    let mut out = String::from("Sender and Recipient of Sent Messages:\n\n");
    for (sender, recipient) in pairs {
        out.push_str(&format!("Sender: {} | Recipient: {}\n", sender, recipient));
    }
    out
}

pub fn longest_message(msg: &Message) -> String {
    format!(
        "Longest Message:\n\nRecipient: {}\nMessage: {}",
        msg.recipient, msg.body
    )
}

pub fn found_message(msg: &Message) -> String {
    format!("Found:\nRecipient: {}\nMessage: {}", msg.recipient, msg.body)
}

pub fn messages_to(recipient: &str, messages: &[&Message]) -> String {
    let mut out = format!("Messages for Recipient {}:\n\n", recipient);
    if messages.is_empty() {
        out.push_str("No messages found for this recipient.");
    }
    for msg in messages {
        out.push_str(&format!("Message: {}\n", msg.body));
    }
    out
}

pub fn report(entries: &[ReportEntry]) -> String {
    let mut out = String::from("Full Report of Sent Messages:\n\n");
    for entry in entries {
        out.push_str(&format!(
            "Message Hash: {}\nRecipient: {}\nMessage: {}\n\n",
            entry.hash, entry.recipient, entry.body
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatapp_types::models::MessageStatus;

    fn message(number: u32, body: &str) -> Message {
        Message {
            id: "0123456789".into(),
            number,
            recipient: "+27831234567".into(),
            body: body.into(),
            hash: "0123456789abcdef".repeat(4),
            status: MessageStatus::Sent,
        }
    }

    #[test]
    fn validation_results_mark_each_field() {
        let text = validation_results(&[Field::Password]);
        assert!(text.contains("✓ Username: Valid"));
        assert!(text.contains("✗ Password: Invalid (must be ≥ 8 chars"));
        assert!(text.contains("✓ Phone Number: Valid"));
    }

    #[test]
    fn recent_listing_truncates_hash() {
        let text = recent_messages(&[message(2, "later"), message(1, "first")]);
        assert!(text.starts_with("Recent Messages (2 total):"));
        assert!(text.contains("Hash: 0123456789abcdef...\n"));
        assert!(text.find("Message #2").unwrap() < text.find("Message #1").unwrap());
        assert_eq!(recent_messages(&[]), "No messages sent yet.");
    }

    #[test]
    fn recipient_search_without_hits() {
        let text = messages_to("+1", &[]);
        assert!(text.ends_with("No messages found for this recipient."));
    }

    #[test]
    fn report_lists_full_hash() {
        let msg = message(1, "hello");
        let text = report(&[ReportEntry::from(&msg)]);
        assert!(text.contains(&format!("Message Hash: {}\n", msg.hash)));
        assert!(text.contains("Message: hello"));
    }
}
