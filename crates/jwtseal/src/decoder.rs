//! Compact token parsing
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::token::Token;
use crate::utils::{base64url, json};

/// Parse a compact token string
///
/// Checks structure only: three Base64URL segments, a header object with a
/// string `alg`, and a payload object. The signature is not verified and no
/// claims are trusted; pass the result to [`validate`](crate::validate).
pub fn decode(token: &str) -> Result<Token> {
    // 1. Validate token string length
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    // 2. Check token format (header, payload, signature)
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
    if parts.next().is_some() {
        return Err(Error::FormatInvalid);
    }

    // Validate signature Base64URL size before decoding
    if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
        return Err(Error::SignatureB64TooLarge {
            size: signature_b64.len(),
            max: MAX_SIGNATURE_B64_SIZE,
        });
    }

    // 3. Decode segments with size limits
    let header = base64url::decode_bytes(header_b64, MAX_DECODED_HEADER_SIZE)?;
    let payload = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
    let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

    // 4. Header and payload must be JSON objects
    let token = Token::from_parts(&header, &payload, &signature)?;
    json::parse_object(token.payload_bytes(), "payload")?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64url::encode_bytes;

    fn compact(header: &str, payload: &str, signature: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            encode_bytes(header.as_bytes()),
            encode_bytes(payload.as_bytes()),
            encode_bytes(signature)
        )
    }

    #[test]
    fn test_decode_valid() {
        let token = decode(&compact(r#"{"alg":"ES256","kid":"k"}"#, r#"{"sub":"s"}"#, &[1; 64]))
            .unwrap();
        assert_eq!(token.header().algorithm(), "ES256");
        assert_eq!(token.header().key_id(), Some("k"));
        assert_eq!(token.signature(), [1u8; 64]);
    }

    #[test]
    fn test_decode_round_trips_compact() {
        let input = compact(r#"{"alg":"RS256"}"#, r#"{"n":1}"#, &[9, 8, 7]);
        assert_eq!(decode(&input).unwrap().to_compact(), input);
    }

    #[test]
    fn test_decode_segment_count() {
        for bad in ["", "abc", "a.b", "a.b.c.d", "...."] {
            assert_eq!(decode(bad), Err(Error::FormatInvalid), "{bad:?}");
        }
    }

    #[test]
    fn test_decode_invalid_base64() {
        let header = encode_bytes(br#"{"alg":"ES256"}"#);
        let payload = encode_bytes(b"{}");
        assert!(matches!(
            decode(&format!("{header}.{payload}.not*base64")),
            Err(Error::FormatInvalidBase64(_))
        ));
        assert!(matches!(
            decode(&format!("{header}=.{payload}.AA")),
            Err(Error::FormatInvalidBase64(_))
        ));
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(
            decode(&compact("not json", "{}", &[1])),
            Err(Error::FormatInvalidJson(_))
        ));
        assert!(matches!(
            decode(&compact(r#"{"alg":"ES256"}"#, "[1]", &[1])),
            Err(Error::FormatInvalidJson(_))
        ));
        assert!(matches!(
            decode(&compact(r#"{"typ":"JWT"}"#, "{}", &[1])),
            Err(Error::FormatInvalidJson(_))
        ));
    }

    #[test]
    fn test_decode_size_limits() {
        let huge = "a".repeat(MAX_TOKEN_LENGTH + 1);
        assert!(matches!(decode(&huge), Err(Error::TokenTooLarge { .. })));

        let header = encode_bytes(br#"{"alg":"ES256"}"#);
        let signature = "A".repeat(MAX_SIGNATURE_B64_SIZE + 1);
        assert!(matches!(
            decode(&format!("{header}.e30.{signature}")),
            Err(Error::SignatureB64TooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_does_not_reject_unknown_algorithm() {
        // Algorithm support is a validation concern
        let token = decode(&compact(r#"{"alg":"HS256"}"#, "{}", &[1])).unwrap();
        assert_eq!(token.header().algorithm(), "HS256");
    }

    #[test]
    fn test_errors_are_malformed() {
        let missing_alg = compact("{}", "{}", &[]);
        for bad in ["x", "a.b.c", missing_alg.as_str()] {
            assert!(decode(bad).unwrap_err().is_malformed(), "{bad:?}");
        }
    }
}
