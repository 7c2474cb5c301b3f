use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Number of decimal digits in a message ID.
pub const MESSAGE_ID_LEN: usize = 10;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Generates message IDs from an owned random source.
///
/// IDs are not checked against anything already issued; two messages may
/// share an ID.
pub struct IdentityHasher<R = StdRng> {
    rng: R,
}

impl IdentityHasher<StdRng> {
    /// Hasher seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Hasher with a fixed seed, for reproducible IDs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> IdentityHasher<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Ten independently drawn digits '0'..='9'.
    pub fn generate_message_id(&mut self) -> String {
        (0..MESSAGE_ID_LEN)
            .map(|_| char::from(b'0' + self.rng.random_range(0..10u8)))
            .collect()
    }
}

/// SHA-256 over the decimal concatenation of the four fields, as lowercase hex.
pub fn compute_hash(message_id: &str, number: u32, recipient: &str, body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message_id.as_bytes());
    hasher.update(number.to_string().as_bytes());
    hasher.update(recipient.as_bytes());
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}
