use rand::Rng;
use tracing::info;

use chatapp_types::models::MessageStatus;

use crate::MessageStore;

/// Demo conversation loaded after login. Recipients are not validated; one
/// of them is not even a phone number.
pub const SAMPLE_MESSAGES: [(&str, &str, MessageStatus); 5] = [
    ("+27834567896", "Did you get the cake?", MessageStatus::Sent),
    (
        "+2783844567",
        "Where are you? You are late! I have asked you to be on time.",
        MessageStatus::Stored,
    ),
    ("+2783444567", "Yahooo, I am at your gate.", MessageStatus::Disregarded),
    ("Developer", "It is dinner time!", MessageStatus::Sent),
    ("+2783844567", "Ok, I am leaving without you.", MessageStatus::Stored),
];

/// Appends the sample messages through the store's normal counter.
pub fn run<R: Rng>(store: &mut MessageStore<R>) {
    for (recipient, body, status) in SAMPLE_MESSAGES {
        store.append(recipient, body, status);
    }
    info!("Seeded {} sample messages", SAMPLE_MESSAGES.len());
}
