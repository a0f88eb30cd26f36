use chrono::{DateTime, Utc};
use rand::Rng;

const NONCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NONCE_LENGTH: usize = 10;

/// A source of the current time.
pub trait TimeProvider: Send + Sync + 'static {
    fn current_time(&self) -> DateTime<Utc>;
}

/// A time provider backed by the system clock.
#[derive(Debug, Default)]
pub struct SystemClockTimeProvider;

impl TimeProvider for SystemClockTimeProvider {
    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A source of nonces for newly signed URLs.
///
/// Nonces only need to be printable, they are not checked for uniqueness.
pub trait NonceGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// A nonce generator producing short random base-36 tokens.
#[derive(Debug, Default)]
pub struct RandomNonceGenerator;

impl NonceGenerator for RandomNonceGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..NONCE_LENGTH).map(|_| NONCE_ALPHABET[rng.gen_range(0..NONCE_ALPHABET.len())] as char).collect()
    }
}
