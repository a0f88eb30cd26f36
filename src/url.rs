use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use ::url::Url;

/// The characters left unescaped when encoding a URI component.
///
/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
pub(crate) const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A query string decoded into a key/value map.
pub type Query = BTreeMap<String, String>;

/// A URL split into the parts that take part in signing.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedUrl {
    /// The scheme followed by a colon, e.g. `https:`.
    pub protocol: String,

    /// The host, including the port when it's not the scheme's default one.
    pub host: String,

    /// The path, including its leading slash.
    pub path: String,

    /// The decoded query parameters.
    ///
    /// When a key appears more than once, the last value wins.
    pub query: Query,

    /// The query keys that appeared more than once in the input.
    pub repeated_keys: BTreeSet<String>,
}

impl ParsedUrl {
    /// Parse a URL.
    pub fn parse(input: &str) -> Result<Self, ParseUrlError> {
        let url = Url::parse(input)?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(ParseUrlError::MissingHost),
        };

        let mut query = Query::new();
        let mut repeated_keys = BTreeSet::new();
        let raw_query = url.query().unwrap_or_default();
        for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
            if query.insert(key.to_string(), value.into_owned()).is_some() {
                repeated_keys.insert(key.into_owned());
            }
        }

        Ok(Self { protocol: format!("{}:", url.scheme()), host, path: url.path().to_string(), query, repeated_keys })
    }

    /// The `protocol//host/path` token that prefixes the canonical string.
    pub(crate) fn origin_and_path(&self) -> String {
        format!("{}//{}/{}", self.protocol, self.host, self.path)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}{}?{}", self.protocol, self.host, self.path, serialize_query(&self.query))
    }
}

/// Serialize a query map into a query string.
///
/// Pairs are emitted in key order and both keys and values are percent-encoded.
pub fn serialize_query(query: &Query) -> String {
    let mut output = String::new();
    for (index, (key, value)) in query.iter().enumerate() {
        if index > 0 {
            output.push('&');
        }
        output.extend(utf8_percent_encode(key, COMPONENT_ENCODE_SET));
        output.push('=');
        output.extend(utf8_percent_encode(value, COMPONENT_ENCODE_SET));
    }
    output
}

/// An error when parsing a URL.
#[derive(Debug, thiserror::Error)]
pub enum ParseUrlError {
    #[error("invalid URL: {0}")]
    Invalid(#[from] ::url::ParseError),

    #[error("URL has no host")]
    MissingHost,
}
