/// ChatApp message identity.
///
/// - Ten-digit message IDs drawn from an injectable random source
/// - SHA-256 content fingerprints over (id, number, recipient, body)
///
/// Fingerprints double as deletion keys in the message store.

pub mod identity;

pub use identity::{HASH_HEX_LEN, IdentityHasher, MESSAGE_ID_LEN, compute_hash};
