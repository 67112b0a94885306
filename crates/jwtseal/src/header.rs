use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use crate::limits::{MAX_ALG_LENGTH, MAX_KID_LENGTH, MAX_TYP_LENGTH};
use crate::utils::bounds::validate_field_size;
use crate::utils::json::{write_member_name, write_string};
use miniserde::Deserialize;

/// Type header written by the encoder
pub const JWT_TYPE: &str = "JWT";

/// JWT header structure
///
/// Represents the JOSE header containing algorithm, key ID and token type.
/// The algorithm is kept as the raw string until validation so that an
/// unsupported `alg` is reported by the validator, not the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    algorithm: String,

    /// Key ID of the signing key
    #[serde(rename = "kid")]
    key_id: Option<String>,

    /// Media type of the token
    #[serde(rename = "typ")]
    token_type: Option<String>,
}

impl TokenHeader {
    /// Header for a token signed with the given algorithm and key
    pub(crate) fn new(algorithm: AlgorithmType, key_id: &str) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            key_id: Some(key_id.to_string()),
            token_type: Some(JWT_TYPE.to_string()),
        }
    }

    /// Get the `alg` header value
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Get the `kid` header value
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Get the `typ` header value
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    /// Parse the `alg` header into a supported algorithm
    pub fn algorithm_type(&self) -> Result<AlgorithmType> {
        self.algorithm.parse()
    }

    /// Serialize as `{"alg":..,"kid":..,"typ":..}`, omitting absent members
    pub(crate) fn to_json(&self) -> String {
        let mut out = String::from("{");
        let mut first = true;
        write_member_name(&mut out, "alg", &mut first);
        write_string(&mut out, &self.algorithm);
        if let Some(kid) = &self.key_id {
            write_member_name(&mut out, "kid", &mut first);
            write_string(&mut out, kid);
        }
        if let Some(typ) = &self.token_type {
            write_member_name(&mut out, "typ", &mut first);
            write_string(&mut out, typ);
        }
        out.push('}');
        out
    }

    /// Parse a decoded header segment
    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::FormatInvalidJson(format!("header is not valid UTF-8: {e}")))?;

        let header: TokenHeader = miniserde::json::from_str(text)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

        // Bound header field sizes
        header.validate_field_sizes()?;
        Ok(header)
    }

    pub(crate) fn validate_field_sizes(&self) -> Result<()> {
        validate_field_size("alg", &self.algorithm, MAX_ALG_LENGTH)?;
        if let Some(kid) = &self.key_id {
            validate_field_size("kid", kid, MAX_KID_LENGTH)?;
        }
        if let Some(typ) = &self.token_type {
            validate_field_size("typ", typ, MAX_TYP_LENGTH)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_json() {
        let header = TokenHeader::new(AlgorithmType::ES256, "key-1");
        assert_eq!(
            header.to_json(),
            r#"{"alg":"ES256","kid":"key-1","typ":"JWT"}"#
        );
        assert_eq!(TokenHeader::from_json(header.to_json().as_bytes()).unwrap(), header);
    }

    #[test]
    fn test_header_optional_members() {
        let header = TokenHeader::from_json(br#"{"alg":"RS256","extra":1}"#).unwrap();
        assert_eq!(header.algorithm(), "RS256");
        assert_eq!(header.key_id(), None);
        assert_eq!(header.token_type(), None);
        assert_eq!(header.to_json(), r#"{"alg":"RS256"}"#);
        assert_eq!(header.algorithm_type().unwrap(), AlgorithmType::RS256);
    }

    #[test]
    fn test_header_invalid() {
        for bad in [
            &br#"{"kid":"k"}"#[..],
            br#"{"alg":256}"#,
            br#"{"alg":"ES256","kid":7}"#,
            br#"["alg"]"#,
            b"not json",
        ] {
            assert!(
                matches!(TokenHeader::from_json(bad), Err(Error::FormatInvalidJson(_))),
                "{:?} should be rejected",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn test_header_field_limits() {
        let long_kid = format!(r#"{{"alg":"ES256","kid":"{}"}}"#, "k".repeat(MAX_KID_LENGTH + 1));
        assert!(matches!(
            TokenHeader::from_json(long_kid.as_bytes()),
            Err(Error::HeaderFieldTooLong { field, .. }) if field == "kid"
        ));

        let long_alg = format!(r#"{{"alg":"{}"}}"#, "A".repeat(MAX_ALG_LENGTH + 1));
        assert!(matches!(
            TokenHeader::from_json(long_alg.as_bytes()),
            Err(Error::HeaderFieldTooLong { field, .. }) if field == "alg"
        ));
    }

    #[test]
    fn test_header_none_algorithm() {
        let header = TokenHeader::from_json(br#"{"alg":"none"}"#).unwrap();
        assert_eq!(header.algorithm_type(), Err(Error::AlgorithmNoneRejected));
    }
}
