use crate::{
    canonical::canonicalize_origin,
    config::Config,
    digest::{self, SigningError},
    params::SigningParameter,
    provider::{NonceGenerator, TimeProvider},
    url::{ParseUrlError, ParsedUrl},
};
use base64::{prelude::BASE64_STANDARD, Engine};
use tracing::debug;

/// Sign a URL, returning it with the nonce, timestamp, method and signature parameters added.
pub(crate) fn encode(
    config: &Config,
    url: &str,
    time_provider: &dyn TimeProvider,
    nonce_generator: &dyn NonceGenerator,
) -> Result<String, EncodeError> {
    let mut parsed = ParsedUrl::parse(url)?;
    let keys = &config.keys;
    let timestamp = time_provider.current_time().timestamp();

    let query = &mut parsed.query;
    query.insert(keys.get(SigningParameter::Nonce).to_string(), nonce_generator.generate());
    query.insert(keys.get(SigningParameter::Timestamp).to_string(), timestamp.to_string());
    query.insert(keys.get(SigningParameter::Method).to_string(), config.method.to_string());
    // The input may already be signed.
    query.remove(keys.get(SigningParameter::Signature));

    let signature_key = keys.get(SigningParameter::Signature);
    let canonical = canonicalize_origin(&parsed.origin_and_path(), &parsed.query, signature_key);
    let method = parsed.query.get(keys.get(SigningParameter::Method)).cloned().unwrap_or_default();
    let digest = digest::sign(&canonical, &config.secret, &method)?;
    parsed.query.insert(signature_key.to_string(), BASE64_STANDARD.encode(digest));

    debug!(%method, timestamp, host = %parsed.host, path = %parsed.path, "Signed URL");
    Ok(parsed.to_string())
}

/// An error when signing a URL.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("malformed URL: {0}")]
    MalformedUrl(#[from] ParseUrlError),

    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),
}
