use crate::{digest::SigningError, params::ReservedKeys};
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt, str::FromStr};

const DEFAULT_PREFIX: &str = "es1_";
const DEFAULT_EXPIRED_SECONDS: u64 = 15 * 60;
const DEFAULT_OVERSIGHT: u64 = 3 * 60;

/// A digest algorithm that can be used to compute the keyed signature of a URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// The name used for this algorithm in signed URLs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `SHA-256` and `sha256` name the same thing.
        let normalized: String = s.chars().filter(|c| *c != '-').collect::<String>().to_ascii_lowercase();
        let algorithm = match normalized.as_str() {
            "md5" => Self::Md5,
            "sha1" => Self::Sha1,
            "sha224" => Self::Sha224,
            "sha256" => Self::Sha256,
            "sha384" => Self::Sha384,
            "sha512" => Self::Sha512,
            _ => return Err(SigningError::UnsupportedAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

/// Where the validator takes the digest algorithm from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmPolicy {
    /// Use whatever algorithm the URL's `method` parameter names.
    #[default]
    FromQuery,

    /// Only accept URLs whose `method` parameter matches the configured algorithm.
    Pinned,
}

/// The options used to construct a [`UrlSigner`](crate::UrlSigner).
///
/// Every field has a default, so this can be deserialized from a partial configuration section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerOptions {
    /// The prefix prepended to every query parameter name the signer reserves.
    pub prefix: String,

    /// The digest algorithm used when signing.
    pub method: DigestAlgorithm,

    /// The number of seconds a signed URL stays valid for.
    pub expired_seconds: u64,

    /// The maximum number of seconds a signed URL's timestamp may lag behind the current time.
    pub oversight: u64,

    /// Whether validation pins the digest algorithm to `method`.
    pub algorithm_policy: AlgorithmPolicy,
}

impl Default for SignerOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            method: DigestAlgorithm::default(),
            expired_seconds: DEFAULT_EXPIRED_SECONDS,
            oversight: DEFAULT_OVERSIGHT,
            algorithm_policy: AlgorithmPolicy::default(),
        }
    }
}

impl SignerOptions {
    /// Set the reserved parameter prefix.
    pub fn prefix<T: Into<String>>(mut self, prefix: T) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the digest algorithm.
    pub fn method(mut self, method: DigestAlgorithm) -> Self {
        self.method = method;
        self
    }

    /// Set the number of seconds a signed URL stays valid for.
    pub fn expired_seconds(mut self, seconds: u64) -> Self {
        self.expired_seconds = seconds;
        self
    }

    /// Set the allowed timestamp lag, in seconds.
    pub fn oversight(mut self, seconds: u64) -> Self {
        self.oversight = seconds;
        self
    }

    /// Set the algorithm policy used during validation.
    pub fn algorithm_policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.algorithm_policy = policy;
        self
    }
}

/// The immutable configuration of a signer.
#[derive(Clone)]
pub struct Config {
    pub(crate) secret: Vec<u8>,
    pub(crate) keys: ReservedKeys,
    pub(crate) method: DigestAlgorithm,
    pub(crate) expired_seconds: u64,
    pub(crate) oversight: u64,
    pub(crate) algorithm_policy: AlgorithmPolicy,
}

impl Config {
    pub(crate) fn new(secret: Vec<u8>, options: SignerOptions) -> Self {
        let SignerOptions { prefix, method, expired_seconds, oversight, algorithm_policy } = options;
        Self { secret, keys: ReservedKeys::new(&prefix), method, expired_seconds, oversight, algorithm_policy }
    }

    /// The reserved query parameter names.
    pub fn keys(&self) -> &ReservedKeys {
        &self.keys
    }

    /// The digest algorithm used when signing.
    pub fn method(&self) -> DigestAlgorithm {
        self.method
    }

    /// The number of seconds a signed URL stays valid for.
    pub fn expired_seconds(&self) -> u64 {
        self.expired_seconds
    }

    /// The allowed timestamp lag, in seconds.
    pub fn oversight(&self) -> u64 {
        self.oversight
    }

    /// The algorithm policy used during validation.
    pub fn algorithm_policy(&self) -> AlgorithmPolicy {
        self.algorithm_policy
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("keys", &self.keys)
            .field("method", &self.method)
            .field("expired_seconds", &self.expired_seconds)
            .field("oversight", &self.oversight)
            .field("algorithm_policy", &self.algorithm_policy)
            .finish()
    }
}
