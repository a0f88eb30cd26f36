use crate::config::DigestAlgorithm;
use hmac::{digest::KeyInit, Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// An error that can occur when computing a signature.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("unsupported digest algorithm: {0:?}")]
    UnsupportedAlgorithm(String),
}

/// Compute the keyed digest of a canonical string using the algorithm named by `method`.
///
/// The output is the lowercase hex encoding of the HMAC.
pub fn sign(canonical: &str, secret: &[u8], method: &str) -> Result<String, SigningError> {
    let algorithm: DigestAlgorithm = method.parse()?;
    Ok(sign_with(canonical, secret, algorithm))
}

/// Compute the keyed digest of a canonical string using an already resolved algorithm.
pub fn sign_with(canonical: &str, secret: &[u8], algorithm: DigestAlgorithm) -> String {
    let message = canonical.as_bytes();
    match algorithm {
        DigestAlgorithm::Md5 => hex_mac::<Hmac<Md5>>(secret, message),
        DigestAlgorithm::Sha1 => hex_mac::<Hmac<Sha1>>(secret, message),
        DigestAlgorithm::Sha224 => hex_mac::<Hmac<Sha224>>(secret, message),
        DigestAlgorithm::Sha256 => hex_mac::<Hmac<Sha256>>(secret, message),
        DigestAlgorithm::Sha384 => hex_mac::<Hmac<Sha384>>(secret, message),
        DigestAlgorithm::Sha512 => hex_mac::<Hmac<Sha512>>(secret, message),
    }
}

fn hex_mac<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> String {
    let mut mac = <M as KeyInit>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
