//! Hostile and malformed token tests
//!
//! Tokens here are forged by signing hand-written JSON with a real key, so
//! the checks that run after signature verification are reachable.

mod common;

use common::{NOW, signing_key};
use jwtseal::*;

/// Sign arbitrary header and payload JSON
fn forge(key: &SigningKey, header: &str, payload: &str) -> Token {
    let unsigned = Token::from_parts(header.as_bytes(), payload.as_bytes(), &[]).unwrap();
    let signature = key.sign(unsigned.signing_input().as_bytes()).unwrap();
    Token::from_parts(header.as_bytes(), payload.as_bytes(), &signature).unwrap()
}

fn forged_result(payload: &str) -> Result<Claims> {
    let key = signing_key(AlgorithmType::ES256, "k");
    let token = forge(&key, r#"{"alg":"ES256","kid":"k"}"#, payload);
    validate(
        &token,
        &key.verification_key(),
        &ValidationPolicy::new().at_time(NOW),
    )
}

// ============================================================================
// Algorithm confusion
// ============================================================================

#[test]
fn test_alg_none_rejected() {
    let key = signing_key(AlgorithmType::ES256, "k");
    let header = r#"{"alg":"none","kid":"k"}"#;
    let token = Token::from_parts(header.as_bytes(), br#"{"sub":"admin"}"#, &[]).unwrap();

    let err = validate(&token, &key.verification_key(), &ValidationPolicy::new()).unwrap_err();
    assert_eq!(err, Error::AlgorithmNoneRejected);
    assert_eq!(err.kind(), ErrorKind::Key);

    // Decoding the compact form succeeds; rejection happens at validation
    let compact = token.to_compact();
    assert!(compact.ends_with('.'));
    assert_eq!(
        validate(
            &decode(&compact).unwrap(),
            &key.verification_key(),
            &ValidationPolicy::new()
        ),
        Err(Error::AlgorithmNoneRejected)
    );
}

#[test]
fn test_unsupported_algorithm_rejected() {
    let key = signing_key(AlgorithmType::ES256, "k");
    for alg in ["HS256", "PS256", "EdDSA", "es256"] {
        let header = format!(r#"{{"alg":"{alg}","kid":"k"}}"#);
        let token = Token::from_parts(header.as_bytes(), b"{}", &[0; 64]).unwrap();
        assert!(
            matches!(
                validate(&token, &key.verification_key(), &ValidationPolicy::new()),
                Err(Error::AlgorithmUnsupported(_))
            ),
            "{alg} should be unsupported"
        );
    }
}

#[test]
fn test_header_algorithm_swap() {
    let key = signing_key(AlgorithmType::ES256, "k");
    let token = forge(&key, r#"{"alg":"ES384","kid":"k"}"#, "{}");

    let err = validate(&token, &key.verification_key(), &ValidationPolicy::new()).unwrap_err();
    assert_eq!(
        err,
        Error::KeyMismatch {
            field: "alg",
            expected: "ES256".into(),
            found: "ES384".into(),
        }
    );
}

#[test]
fn test_missing_kid_matches_by_algorithm() {
    let key = signing_key(AlgorithmType::ES256, "k");
    let token = forge(&key, r#"{"alg":"ES256"}"#, r#"{"sub":"s"}"#);
    let claims = validate(
        &token,
        &key.verification_key(),
        &ValidationPolicy::new().at_time(NOW),
    )
    .unwrap();
    assert_eq!(claims.subject().unwrap(), "s");
}

// ============================================================================
// Signature tampering
// ============================================================================

#[test]
fn test_signature_tampering() {
    let key = signing_key(AlgorithmType::ES256, "k");
    let token = encode(
        &ClaimsBuilder::new().subject("s").unwrap().build(),
        &key,
    )
    .unwrap();
    let verification = key.verification_key();
    let policy = ValidationPolicy::new().at_time(NOW);

    let signature = token.signature();
    let mut flipped = signature.to_vec();
    flipped[10] ^= 0x01;
    let mut extended = signature.to_vec();
    extended.push(0);

    let empty: &[u8] = &[];
    for bad in [empty, &signature[..32], flipped.as_slice(), extended.as_slice()] {
        let tampered = Token::from_parts(token.header_bytes(), token.payload_bytes(), bad).unwrap();
        assert_eq!(
            validate(&tampered, &verification, &policy),
            Err(Error::SignatureInvalid)
        );
    }
}

#[test]
fn test_header_tampering() {
    let key = signing_key(AlgorithmType::RS256, "k");
    let token = encode(&ClaimsBuilder::new().subject("s").unwrap().build(), &key).unwrap();

    // Same alg and kid, different bytes: the signing input changes
    let header = br#"{"kid":"k","alg":"RS256"}"#;
    let tampered = Token::from_parts(header, token.payload_bytes(), token.signature()).unwrap();
    assert_eq!(
        validate(&tampered, &key.verification_key(), &ValidationPolicy::new()),
        Err(Error::SignatureInvalid)
    );
}

#[test]
fn test_non_canonical_base64_rejected() {
    let key = signing_key(AlgorithmType::ES256, "k");
    let compact = encode_to_string(&ClaimsBuilder::new().build(), &key).unwrap();
    let (header, rest) = compact.split_once('.').unwrap();
    let (payload, signature) = rest.split_once('.').unwrap();
    assert_eq!(payload, "e30");

    // "e31" decodes to the same bytes with non-zero trailing bits
    let altered = format!("{header}.e31.{signature}");
    assert!(matches!(
        decode(&altered),
        Err(Error::FormatInvalidBase64(_))
    ));

    let padded = format!("{header}.e30=.{signature}");
    assert!(decode(&padded).unwrap_err().is_malformed());
}

// ============================================================================
// Authentic but invalid payloads
// ============================================================================

#[test]
fn test_authentic_payload_must_be_json_object() {
    for payload in ["not json", "[1,2]", "\"sub\"", ""] {
        assert!(
            matches!(forged_result(payload), Err(Error::FormatInvalidJson(_))),
            "{payload:?}"
        );
    }
}

#[test]
fn test_registered_claim_types_enforced() {
    let cases = [
        (r#"{"exp":"soon"}"#, "exp"),
        (r#"{"nbf":true}"#, "nbf"),
        (r#"{"iat":null}"#, "iat"),
        (r#"{"sub":42}"#, "sub"),
        (r#"{"iss":["a"]}"#, "iss"),
        (r#"{"jti":{}}"#, "jti"),
        (r#"{"aud":[]}"#, "aud"),
        (r#"{"aud":["a",1]}"#, "aud"),
        (r#"{"aud":7}"#, "aud"),
    ];

    for (payload, claim) in cases {
        let err = forged_result(payload).unwrap_err();
        assert!(
            matches!(&err, Error::ClaimInvalidType { claim: c, .. } if c == claim),
            "{payload}: {err:?}"
        );
        assert_eq!(err.kind(), ErrorKind::ClaimsModel);
    }
}

#[test]
fn test_timestamp_bounds_enforced() {
    for payload in [
        r#"{"exp":4102444801}"#,
        r#"{"nbf":-1}"#,
        r#"{"iat":-0.5}"#,
        r#"{"exp":1e300}"#,
        r#"{"exp":18446744073709551615}"#,
    ] {
        assert!(
            matches!(
                forged_result(payload),
                Err(Error::TimestampOutOfBounds { .. })
            ),
            "{payload}"
        );
    }
}

#[test]
fn test_fractional_timestamps_floor() {
    let claims = forged_result(r#"{"exp":1700003600.75,"iat":1699999999.2}"#).unwrap();
    assert_eq!(claims.expiration().unwrap(), 1_700_003_600);
    assert_eq!(claims.issued_at().unwrap(), 1_699_999_999);
}

#[test]
fn test_claim_string_length_enforced() {
    let long = "s".repeat(2049);
    let payload = format!(r#"{{"sub":"{long}"}}"#);
    assert!(matches!(
        forged_result(&payload),
        Err(Error::ClaimStringTooLong { .. })
    ));

    let fits = "s".repeat(2048);
    let payload = format!(r#"{{"sub":"{fits}"}}"#);
    assert_eq!(forged_result(&payload).unwrap().subject().unwrap(), fits);
}

#[test]
fn test_deeply_nested_custom_claim_rejected() {
    let nested = format!("{}{}", "[".repeat(40), "]".repeat(40));
    let payload = format!(r#"{{"x":{nested}}}"#);
    assert!(matches!(
        forged_result(&payload),
        Err(Error::FormatInvalidJson(_))
    ));

    let shallow = format!("{}{}", "[".repeat(8), "]".repeat(8));
    let payload = format!(r#"{{"x":{shallow}}}"#);
    assert!(forged_result(&payload).is_ok());
}

#[test]
fn test_duplicate_audience_members_collapse() {
    let claims = forged_result(r#"{"aud":["a","b","a"]}"#).unwrap();
    assert_eq!(claims.audiences().unwrap(), ["a", "b"]);
}

// ============================================================================
// Policy configuration
// ============================================================================

#[test]
fn test_policy_bounds_checked_first() {
    // Bounds are reported even when the key would not match
    let key = signing_key(AlgorithmType::ES256, "k");
    let other = signing_key(AlgorithmType::ES384, "other").verification_key();
    let token = encode(&ClaimsBuilder::new().build(), &key).unwrap();

    let err = validate(&token, &other, &ValidationPolicy::new().clock_skew(301)).unwrap_err();
    assert_eq!(
        err,
        Error::ClockSkewTooLarge {
            value: 301,
            max: 300
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);

    assert!(matches!(
        validate(
            &token,
            &other,
            &ValidationPolicy::new().max_age(86_400 * 365 + 1)
        ),
        Err(Error::MaxAgeTooLarge { .. })
    ));
}
