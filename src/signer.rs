use crate::{
    config::{Config, SignerOptions},
    encoder::{self, EncodeError},
    provider::{NonceGenerator, RandomNonceGenerator, SystemClockTimeProvider, TimeProvider},
    validator::{self, ValidatedUrl, ValidationError},
};
use std::fmt;

/// Signs URLs and validates previously signed ones.
///
/// A signer holds no mutable state, so a single instance can be shared across threads.
pub struct UrlSigner {
    config: Config,
    time_provider: Box<dyn TimeProvider>,
    nonce_generator: Box<dyn NonceGenerator>,
}

impl UrlSigner {
    /// Construct a new signer using the given secret.
    pub fn new<S: Into<Vec<u8>>>(secret: S, options: SignerOptions) -> Self {
        Self {
            config: Config::new(secret.into(), options),
            time_provider: Box::new(SystemClockTimeProvider),
            nonce_generator: Box::new(RandomNonceGenerator),
        }
    }

    /// Use the given time provider instead of the system clock.
    pub fn with_time_provider<T: TimeProvider>(mut self, time_provider: T) -> Self {
        self.time_provider = Box::new(time_provider);
        self
    }

    /// Use the given nonce generator instead of the random one.
    pub fn with_nonce_generator<N: NonceGenerator>(mut self, nonce_generator: N) -> Self {
        self.nonce_generator = Box::new(nonce_generator);
        self
    }

    /// The configuration of this signer.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sign a URL.
    ///
    /// The returned URL carries every original query parameter plus the prefixed `nonce`, `timestamp`,
    /// `method` and `signature` ones. Any signature already present in `url` is replaced.
    pub fn encode(&self, url: &str) -> Result<String, EncodeError> {
        encoder::encode(&self.config, url, self.time_provider.as_ref(), self.nonce_generator.as_ref())
    }

    /// Validate a signed URL.
    pub fn validate(&self, url: &str) -> Result<ValidatedUrl, ValidationError> {
        validator::validate(&self.config, url, self.time_provider.as_ref())
    }

    /// Check whether a signed URL is valid.
    pub fn is_valid(&self, url: &str) -> bool {
        self.validate(url).is_ok()
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner").field("config", &self.config).finish_non_exhaustive()
    }
}
