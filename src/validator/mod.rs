pub mod error;
mod temporal;

#[cfg(test)]
mod tests;

use crate::{
    canonical::canonicalize_origin,
    config::{AlgorithmPolicy, Config, DigestAlgorithm},
    digest,
    params::{SigningParameter, SigningParameters},
    provider::TimeProvider,
    url::ParsedUrl,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use tracing::debug;

pub use error::{ValidationError, ValidationKind};

/// The result of checking a single validation condition.
pub type ValidationResult = Result<(), ValidationError>;

/// The signing parameters of a URL that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedUrl {
    /// The nonce the URL was signed with.
    pub nonce: String,

    /// The time at which the URL was signed.
    pub timestamp: DateTime<Utc>,

    /// The digest algorithm the URL was signed with.
    pub method: DigestAlgorithm,
}

/// Validate a signed URL.
pub(crate) fn validate(
    config: &Config,
    url: &str,
    time_provider: &dyn TimeProvider,
) -> Result<ValidatedUrl, ValidationError> {
    let result = validate_url(config, url, time_provider);
    match &result {
        Ok(validated) => debug!(method = %validated.method, timestamp = %validated.timestamp, "Signed URL accepted"),
        Err(e) => debug!(error = %e, "Signed URL rejected"),
    };
    result
}

fn validate_url(config: &Config, url: &str, time_provider: &dyn TimeProvider) -> Result<ValidatedUrl, ValidationError> {
    let parsed = ParsedUrl::parse(url)?;
    let keys = &config.keys;
    let params = SigningParameters::extract(&parsed.query, keys).map_err(ValidationKind::MissingParameter)?;

    let signature_key = keys.get(SigningParameter::Signature);
    validate_condition(!parsed.repeated_keys.contains(signature_key), ValidationKind::MalformedSignature)?;
    // Only the last value of a repeated key is signed, the others would be unauthenticated.
    validate_condition(parsed.repeated_keys.is_empty(), ValidationKind::SignatureMismatch)?;
    let provided = BASE64_STANDARD.decode(params.signature).map_err(|_| ValidationKind::MalformedSignature)?;

    let method: DigestAlgorithm = params.method.parse()?;
    if config.algorithm_policy == AlgorithmPolicy::Pinned {
        validate_condition(method == config.method, ValidationKind::MethodMismatch)?;
    }

    let canonical = canonicalize_origin(&parsed.origin_and_path(), &parsed.query, signature_key);
    let expected = digest::sign_with(&canonical, &config.secret, method);
    validate_condition(expected.as_bytes().ct_eq(&provided).into(), ValidationKind::SignatureMismatch)?;

    let now = time_provider.current_time();
    let timestamp = temporal::validate_temporal_properties(params.timestamp, config, &now)?;
    Ok(ValidatedUrl { nonce: params.nonce.to_string(), timestamp, method })
}

fn validate_condition(condition: bool, kind: ValidationKind) -> ValidationResult {
    if condition {
        Ok(())
    } else {
        Err(kind.into())
    }
}
