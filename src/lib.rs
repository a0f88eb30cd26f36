pub mod canonical;
pub mod config;
pub mod digest;
pub mod encoder;
pub mod params;
pub mod provider;
pub mod signer;
pub mod url;
pub mod validator;

pub use config::{AlgorithmPolicy, DigestAlgorithm, SignerOptions};
pub use signer::UrlSigner;
pub use validator::{ValidatedUrl, ValidationError, ValidationKind};
