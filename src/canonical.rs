//! Canonical string construction.
//!
//! The canonical string is the exact input to the signing digest:
//!
//! ```text
//! encode("{protocol}//{host}/{path}") & encode(sorted query string)
//! ```
//!
//! Each half is percent-encoded on its own, so the `&` separating query pairs is escaped while the `&`
//! joining the two halves is not.

use crate::url::{serialize_query, Query, COMPONENT_ENCODE_SET};
use percent_encoding::utf8_percent_encode;

/// Build the canonical string for a URL's parts.
///
/// The `signature_key` parameter is excluded from the query and the remaining keys are sorted
/// byte-wise, so the insertion order of `query` has no effect on the output.
///
/// # Examples
///
/// ```
/// use signed_url::{canonical::canonicalize, url::Query};
///
/// let query = Query::from([("b".to_string(), "2".to_string()), ("a".to_string(), "1".to_string())]);
/// let canonical = canonicalize("https:", "example.com", "/posts", &query, "es1_signature");
/// assert_eq!(canonical, "https%3A%2F%2Fexample.com%2F%2Fposts&a%3D1%26b%3D2");
/// ```
pub fn canonicalize(protocol: &str, host: &str, path: &str, query: &Query, signature_key: &str) -> String {
    let origin = format!("{protocol}//{host}/{path}");
    canonicalize_origin(&origin, query, signature_key)
}

pub(crate) fn canonicalize_origin(origin: &str, query: &Query, signature_key: &str) -> String {
    let unsigned: Query =
        query.iter().filter(|(key, _)| key.as_str() != signature_key).map(|(k, v)| (k.clone(), v.clone())).collect();
    let query_string = serialize_query(&unsigned);
    format!(
        "{}&{}",
        utf8_percent_encode(origin, COMPONENT_ENCODE_SET),
        utf8_percent_encode(&query_string, COMPONENT_ENCODE_SET)
    )
}
