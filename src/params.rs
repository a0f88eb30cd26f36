use crate::url::Query;
use std::fmt;

/// One of the query parameters a signer reserves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningParameter {
    Nonce,
    Timestamp,
    Method,
    Signature,
}

impl SigningParameter {
    /// The parameter name, before prefixing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nonce => "nonce",
            Self::Timestamp => "timestamp",
            Self::Method => "method",
            Self::Signature => "signature",
        }
    }
}

impl fmt::Display for SigningParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The prefixed names of the reserved query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedKeys {
    nonce: String,
    timestamp: String,
    method: String,
    signature: String,
}

impl ReservedKeys {
    /// Build the reserved names for the given prefix.
    pub fn new(prefix: &str) -> Self {
        let prefixed = |parameter: SigningParameter| format!("{prefix}{}", parameter.name());
        Self {
            nonce: prefixed(SigningParameter::Nonce),
            timestamp: prefixed(SigningParameter::Timestamp),
            method: prefixed(SigningParameter::Method),
            signature: prefixed(SigningParameter::Signature),
        }
    }

    /// The query key used for a parameter.
    pub fn get(&self, parameter: SigningParameter) -> &str {
        match parameter {
            SigningParameter::Nonce => &self.nonce,
            SigningParameter::Timestamp => &self.timestamp,
            SigningParameter::Method => &self.method,
            SigningParameter::Signature => &self.signature,
        }
    }
}

/// The signing parameters embedded in a URL's query, still in their wire form.
#[derive(Clone, Debug, PartialEq)]
pub struct SigningParameters<'a> {
    pub nonce: &'a str,
    pub timestamp: &'a str,
    pub method: &'a str,
    pub signature: &'a str,
}

impl<'a> SigningParameters<'a> {
    /// Pull the signing parameters out of a query.
    ///
    /// Parameters are looked up in the order signature, timestamp, method, nonce and the first one
    /// missing is returned as the error.
    pub fn extract(query: &'a Query, keys: &ReservedKeys) -> Result<Self, SigningParameter> {
        let lookup = move |parameter: SigningParameter| {
            query.get(keys.get(parameter)).map(String::as_str).filter(|value| !value.is_empty()).ok_or(parameter)
        };
        let signature = lookup(SigningParameter::Signature)?;
        let timestamp = lookup(SigningParameter::Timestamp)?;
        let method = lookup(SigningParameter::Method)?;
        let nonce = lookup(SigningParameter::Nonce)?;
        Ok(Self { nonce, timestamp, method, signature })
    }
}
