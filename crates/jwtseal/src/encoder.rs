//! Token encoding
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::header::TokenHeader;
use crate::limits::{MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE, MAX_TOKEN_LENGTH};
use crate::primitive::Signer;
use crate::token::{Token, signing_input};

/// Sign claims into a token
///
/// The header carries the signer's algorithm and key id with `typ: "JWT"`.
/// Header and payload are serialized deterministically, so the same claims
/// and key always produce the same signing input. If the signer fails no
/// token is produced.
pub fn encode<S>(claims: &Claims, signer: &S) -> Result<Token>
where
    S: Signer + ?Sized,
{
    let header = TokenHeader::new(signer.algorithm(), signer.key_id());
    header.validate_field_sizes()?;

    let header_bytes = header.to_json().into_bytes();
    let payload_bytes = claims.to_json().into_bytes();
    if payload_bytes.len() > MAX_DECODED_PAYLOAD_SIZE {
        return Err(Error::TokenTooLarge {
            size: payload_bytes.len(),
            max: MAX_DECODED_PAYLOAD_SIZE,
        });
    }

    // The compact form must stay within what `decode` accepts
    let input = signing_input(&header_bytes, &payload_bytes);
    if input.len() + 1 > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: input.len() + 1,
            max: MAX_TOKEN_LENGTH,
        });
    }

    let signature = signer.sign(input.as_bytes()).map_err(|e| match e {
        Error::SigningFailure(_) => e,
        other => Error::SigningFailure(other.to_string()),
    })?;

    if signature.is_empty() || signature.len() > MAX_DECODED_SIGNATURE_SIZE {
        return Err(Error::SigningFailure(format!(
            "signer returned a {} byte signature",
            signature.len()
        )));
    }

    let compact_len = input.len() + 1 + encoded_len(signature.len());
    if compact_len > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: compact_len,
            max: MAX_TOKEN_LENGTH,
        });
    }

    Ok(Token::new(header, header_bytes, payload_bytes, signature))
}

/// Length of unpadded Base64URL output for `len` input bytes
fn encoded_len(len: usize) -> usize {
    (len * 4).div_ceil(3)
}

/// Sign claims and return the compact serialization
pub fn encode_to_string<S>(claims: &Claims, signer: &S) -> Result<String>
where
    S: Signer + ?Sized,
{
    encode(claims, signer).map(|token| token.to_compact())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmType;
    use crate::claims::{ClaimValue, ClaimsBuilder};
    use crate::keys::SigningKey;

    struct FailingSigner;

    impl Signer for FailingSigner {
        fn algorithm(&self) -> AlgorithmType {
            AlgorithmType::ES256
        }

        fn key_id(&self) -> &str {
            "broken"
        }

        fn sign(&self, _message: &[u8]) -> Result<Vec<u8>> {
            Err(Error::KeyInvalid("hardware token removed".into()))
        }
    }

    struct EmptySigner;

    impl Signer for EmptySigner {
        fn algorithm(&self) -> AlgorithmType {
            AlgorithmType::RS256
        }

        fn key_id(&self) -> &str {
            "empty"
        }

        fn sign(&self, _message: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_encode_header_and_payload() {
        let key = SigningKey::generate(AlgorithmType::ES256, "kid-1").unwrap();
        let claims = ClaimsBuilder::new().subject("user").unwrap().build();

        let token = encode(&claims, &key).unwrap();
        assert_eq!(
            token.header_bytes(),
            br#"{"alg":"ES256","kid":"kid-1","typ":"JWT"}"#
        );
        assert_eq!(token.payload_bytes(), br#"{"sub":"user"}"#);
        assert_eq!(token.signature().len(), 64);

        let compact = encode_to_string(&claims, &key).unwrap();
        assert_eq!(compact.matches('.').count(), 2);
        // ECDSA signatures are randomized, the signing input is not
        assert!(compact.starts_with(&token.signing_input()));
    }

    #[test]
    fn test_encode_signing_failure() {
        let claims = Claims::default();
        assert!(matches!(
            encode(&claims, &FailingSigner),
            Err(Error::SigningFailure(msg)) if msg.contains("hardware token removed")
        ));
        assert!(matches!(
            encode(&claims, &EmptySigner),
            Err(Error::SigningFailure(_))
        ));
    }

    #[test]
    fn test_encoded_len() {
        for len in [0, 1, 2, 3, 64, 132, 256, 512] {
            assert_eq!(
                encoded_len(len),
                crate::utils::base64url::encode_bytes(&vec![0u8; len]).len()
            );
        }
    }

    #[test]
    fn test_encode_compact_length_limit() {
        // ~50 KB payload fits the payload limit but not the compact limit
        let key = SigningKey::generate(AlgorithmType::ES256, "kid").unwrap();
        let mut builder = ClaimsBuilder::new();
        for i in 0..25 {
            builder
                .set_claim(format!("c{i}"), ClaimValue::from("x".repeat(2000)))
                .unwrap();
        }
        let claims = builder.build();
        assert!(claims.to_json().len() < MAX_DECODED_PAYLOAD_SIZE);
        assert!(matches!(
            encode_to_string(&claims, &key),
            Err(Error::TokenTooLarge { max: MAX_TOKEN_LENGTH, .. })
        ));
    }

    #[test]
    fn test_encoded_tokens_always_decode() {
        let key = SigningKey::generate(AlgorithmType::ES512, "kid").unwrap();

        // Sweep payload sizes across the compact length boundary
        let mut saw_ok = false;
        let mut saw_too_large = false;
        for len in (48_000..49_400).step_by(37) {
            let claims = ClaimsBuilder::new()
                .set_claim("pad", "p".repeat(len))
                .unwrap()
                .build();
            match encode_to_string(&claims, &key) {
                Ok(compact) => {
                    assert!(compact.len() <= MAX_TOKEN_LENGTH);
                    assert!(crate::decoder::decode(&compact).is_ok(), "len {len}");
                    saw_ok = true;
                }
                Err(Error::TokenTooLarge { .. }) => saw_too_large = true,
                Err(other) => panic!("unexpected error at len {len}: {other}"),
            }
        }
        assert!(saw_ok && saw_too_large);
    }

    #[test]
    fn test_encode_payload_too_large() {
        let key = SigningKey::generate(AlgorithmType::ES256, "kid").unwrap();
        let mut builder = ClaimsBuilder::new();
        for i in 0..40 {
            builder
                .set_claim(format!("c{i}"), ClaimValue::from("x".repeat(2000)))
                .unwrap();
        }
        assert!(matches!(
            encode(&builder.build(), &key),
            Err(Error::TokenTooLarge { .. })
        ));
    }
}
