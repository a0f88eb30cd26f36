use crate::{digest::SigningError, params::SigningParameter, url::ParseUrlError};
use std::fmt;

/// An error during the validation of a signed URL.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("validation failed: {0}")]
    Validation(ValidationKind),

    #[error("malformed URL: {0}")]
    MalformedUrl(#[from] ParseUrlError),

    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),
}

impl From<ValidationKind> for ValidationError {
    fn from(kind: ValidationKind) -> Self {
        Self::Validation(kind)
    }
}

/// A kind of validation that was violated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValidationKind {
    Expired,
    InvalidTimestamp,
    MalformedSignature,
    MethodMismatch,
    MissingParameter(SigningParameter),
    OversightExceeded,
    SignatureMismatch,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationKind::*;
        match self {
            Expired => write!(f, "signature is expired"),
            InvalidTimestamp => write!(f, "timestamp is not a valid unix time"),
            MalformedSignature => write!(f, "signature is malformed"),
            MethodMismatch => write!(f, "signing method does not match the configured one"),
            MissingParameter(parameter) => write!(f, "missing `{parameter}` parameter"),
            OversightExceeded => write!(f, "timestamp lags behind the current time by more than allowed"),
            SignatureMismatch => write!(f, "signature does not match"),
        }
    }
}
