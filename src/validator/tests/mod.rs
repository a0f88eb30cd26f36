
use super::*;
use crate::{canonical::canonicalize, digest::SigningError, url::ParseUrlError, SignerOptions};
use fixtures::*;
use rstest::rstest;

// Re-sign a URL after tampering with it, the way a holder of the secret would.
fn resign(url: &str, secret: &str) -> String {
    let mut parsed = ParsedUrl::parse(url).expect("invalid URL");
    let canonical = canonicalize(&parsed.protocol, &parsed.host, &parsed.path, &parsed.query, "es1_signature");
    let digest = digest::sign(&canonical, secret.as_bytes(), &parsed.query["es1_method"]).expect("signing failed");
    parsed.query.insert("es1_signature".into(), BASE64_STANDARD.encode(digest));
    parsed.to_string()
}

#[rstest]
#[case::simple("https://example.com/posts?postId=15")]
#[case::no_query("https://example.com/posts")]
#[case::root("http://example.com")]
#[case::port("http://localhost:8080/api/v1/items?limit=10&offset=20")]
#[case::escaped_values("https://example.com/search?q=hello%20world&tags=a%26b&plus=1%2B1")]
#[case::unicode("https://example.com/caf%C3%A9?name=J%C3%BCrgen")]
#[case::reserved_characters("https://example.com/?expr=(a*b)!~c&quote='x'")]
fn round_trip(#[case] url: &str) {
    let asserter = Asserter::default();
    let encoded = asserter.encode(url);
    asserter.assert_success(&encoded);
}

#[test]
fn validated_url_details() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let validated = asserter.assert_success(&encoded);
    assert_eq!(
        validated,
        ValidatedUrl {
            nonce: "k3j4h5g6f7".into(),
            timestamp: DateTime::from_timestamp(SIGNED_AT, 0).unwrap(),
            method: DigestAlgorithm::Sha256,
        }
    );
}

#[test]
fn fixed_timestamp_replacement_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let tampered = replace_param(&encoded, "es1_timestamp", "1573826535");
    asserter.assert_failure(&tampered, ValidationKind::SignatureMismatch);
    assert!(!asserter.signer.is_valid(&tampered));
}

#[rstest]
#[case::nonce("es1_nonce", "k3j4h5g6f8")]
#[case::timestamp("es1_timestamp", "1700000001")]
#[case::method("es1_method", "sha512")]
#[case::original_value("postId", "16")]
fn tampering_rejected(#[case] key: &str, #[case] value: &str) {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let tampered = replace_param(&encoded, key, value);
    assert_ne!(tampered, encoded);
    asserter.assert_failure(&tampered, ValidationKind::SignatureMismatch);
}

#[rstest]
#[case::host("https://example.org/posts?postId=15")]
#[case::path("https://example.com/comments?postId=15")]
#[case::scheme("http://example.com/posts?postId=15")]
fn moved_signature_rejected(#[case] target: &str) {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let (_, signed_query) = encoded.split_once('?').unwrap();
    let (target_base, _) = target.split_once('?').unwrap();
    asserter.assert_failure(&format!("{target_base}?{signed_query}"), ValidationKind::SignatureMismatch);
}

#[test]
fn added_parameter_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    asserter.assert_failure(&format!("{encoded}&admin=true"), ValidationKind::SignatureMismatch);
}

#[test]
fn parameter_order_irrelevant() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let (base, query) = encoded.split_once('?').unwrap();
    let mut pairs: Vec<&str> = query.split('&').collect();
    pairs.reverse();
    asserter.assert_success(&format!("{base}?{}", pairs.join("&")));
}

#[test]
fn insertion_order_does_not_change_signature() {
    let asserter = Asserter::default();
    let first = asserter.encode("https://example.com/posts?a=1&b=2&c=3");
    let second = asserter.encode("https://example.com/posts?c=3&a=1&b=2");
    assert_eq!(first, second);
}

#[test]
fn different_secrets_produce_different_signatures() {
    let first = Asserter::with_secret("first secret", SignerOptions::default());
    let second = Asserter::with_secret("second secret", SignerOptions::default());
    let first_url = first.encode(URL);
    let second_url = second.encode(URL);
    assert_ne!(first_url, second_url);

    first.assert_failure(&second_url, ValidationKind::SignatureMismatch);
    second.assert_failure(&first_url, ValidationKind::SignatureMismatch);
}

#[rstest]
#[case::nonce(SigningParameter::Nonce)]
#[case::timestamp(SigningParameter::Timestamp)]
#[case::method(SigningParameter::Method)]
#[case::signature(SigningParameter::Signature)]
fn missing_parameter_rejected(#[case] parameter: SigningParameter) {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let stripped = remove_param(&encoded, &format!("es1_{parameter}"));
    asserter.assert_failure(&stripped, ValidationKind::MissingParameter(parameter));
}

#[test]
fn unsigned_url_rejected() {
    let asserter = Asserter::default();
    asserter.assert_failure(URL, ValidationKind::MissingParameter(SigningParameter::Signature));
}

#[test]
fn other_prefix_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let other = Asserter::new(SignerOptions::default().prefix("prfx_"));
    other.assert_failure(&encoded, ValidationKind::MissingParameter(SigningParameter::Signature));
}

#[test]
fn custom_prefix_round_trip() {
    let asserter = Asserter::new(SignerOptions::default().prefix("prfx_"));
    let encoded = asserter.encode(URL);
    assert!(encoded.contains("prfx_signature="));
    assert!(!encoded.contains("es1_"));
    asserter.assert_success(&encoded);
}

#[test]
fn repeated_signature_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    asserter.assert_failure(&format!("{encoded}&es1_signature=YWJj"), ValidationKind::MalformedSignature);
}

#[test]
fn non_base64_signature_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let tampered = replace_param(&encoded, "es1_signature", "%21%21%21");
    asserter.assert_failure(&tampered, ValidationKind::MalformedSignature);
}

#[test]
fn resigning_replaces_signature() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    asserter.clock.advance(10);
    let reencoded = asserter.encode(&encoded);
    assert_ne!(reencoded, encoded);
    assert_eq!(reencoded.matches("es1_signature=").count(), 1);
    let validated = asserter.assert_success(&reencoded);
    assert_eq!(validated.timestamp.timestamp(), SIGNED_AT + 10);
}

#[test]
fn unsupported_method_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let tampered = replace_param(&encoded, "es1_method", "whirlpool");
    let err = asserter.signer.validate(&tampered).expect_err("validation succeeded");
    assert!(matches!(err, ValidationError::Signing(SigningError::UnsupportedAlgorithm(name)) if name == "whirlpool"));
}

#[test]
fn method_taken_from_query_by_default() {
    let sha512 = Asserter::new(SignerOptions::default().method(DigestAlgorithm::Sha512));
    let encoded = sha512.encode(URL);
    let validated = Asserter::default().assert_success(&encoded);
    assert_eq!(validated.method, DigestAlgorithm::Sha512);
}

#[test]
fn pinned_method_rejects_other_algorithms() {
    let md5 = Asserter::new(SignerOptions::default().method(DigestAlgorithm::Md5));
    let encoded = md5.encode(URL);
    let pinned = Asserter::new(SignerOptions::default().algorithm_policy(AlgorithmPolicy::Pinned));
    pinned.assert_failure(&encoded, ValidationKind::MethodMismatch);
    pinned.assert_success(&pinned.encode(URL));
}

#[test]
fn non_numeric_timestamp_rejected() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let tampered = resign(&replace_param(&encoded, "es1_timestamp", "soon"), SECRET);
    asserter.assert_failure(&tampered, ValidationKind::InvalidTimestamp);
}

#[test]
fn malformed_url_rejected() {
    let asserter = Asserter::default();
    let err = asserter.signer.validate("not a url").expect_err("validation succeeded");
    assert!(matches!(err, ValidationError::MalformedUrl(ParseUrlError::Invalid(_))));
}

#[rstest]
#[case::original_value("postId=99")]
#[case::nonce("es1_nonce=k3j4h5g6f7")]
#[case::timestamp("es1_timestamp=1700000000")]
fn duplicated_parameter_rejected(#[case] extra: &str) {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    let (base, query) = encoded.split_once('?').unwrap();
    asserter.assert_failure(&format!("{base}?{extra}&{query}"), ValidationKind::SignatureMismatch);
}

#[test]
fn known_signature() {
    let asserter = Asserter::default();
    let encoded = asserter.encode(URL);
    assert_eq!(
        encoded,
        "https://example.com/posts?es1_method=sha256&es1_nonce=k3j4h5g6f7&es1_signature=\
         N2JkYzQ0YTM5MTM5Mjc1Mzc0OGU1YTMwYzdmMzVjNDQxZjNjOTdhMWY5YmM3YzJmNGJjNzhmNmIwNGM2YmJhNA%3D%3D\
         &es1_timestamp=1700000000&postId=15"
    );
    asserter.assert_success(&encoded);
}
