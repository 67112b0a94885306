//! Errors for jwtseal

use thiserror::Error;

/// Broad classification of an [`Error`]
///
/// Callers that only need to decide "bad input", "bad signature" or
/// "policy said no" can match on the kind instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The token string is not a structurally valid compact JWT
    Malformed,
    /// A claim was set, read or parsed with the wrong shape
    ClaimsModel,
    /// Key material or algorithm identifiers could not be used
    Key,
    /// Signing failed or the signature did not authenticate the token
    Cryptographic,
    /// The token is authentic but rejected by the validation policy
    Policy,
    /// The validation policy itself is out of bounds
    Configuration,
}

/// JWTSeal Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWT format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Signature Base64URL string too large: {size} bytes (maximum: {max} bytes)")]
    SignatureB64TooLarge { size: usize, max: usize },

    #[error("Header field '{field}' too long: {length} bytes (maximum: {max} bytes)")]
    HeaderFieldTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    // ============================================================================
    // Claims Model Errors
    // ============================================================================
    #[error("Claim '{claim}' has an invalid type: expected {expected}")]
    ClaimInvalidType { claim: String, expected: String },

    #[error("Claim '{0}' is not present")]
    ClaimNotPresent(String),

    #[error("Claim '{claim}' has type {found}, not {expected}")]
    ClaimWrongType {
        claim: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Claim '{0}' is already set")]
    ClaimAlreadySet(String),

    #[error("Claim '{claim}' too long: {length} bytes (maximum: {max} bytes)")]
    ClaimStringTooLong {
        claim: String,
        length: usize,
        max: usize,
    },

    #[error("Timestamp out of bounds: {value} (valid range: {min} to {max})")]
    TimestampOutOfBounds { value: i64, min: i64, max: i64 },

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,

    // ============================================================================
    // Key and Algorithm Errors
    // ============================================================================
    #[error("Invalid key: {0}")]
    KeyInvalid(String),

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    // ============================================================================
    // Cryptographic Errors
    // ============================================================================
    #[error("Signing failed: {0}")]
    SigningFailure(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Token header {field} '{found}' does not match key {field} '{expected}'")]
    KeyMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },

    // ============================================================================
    // Policy Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, skew: {skew}s)")]
    TokenIssuedInFuture { issued_at: i64, now: i64, skew: u64 },

    #[error("Token too old: issued at {issued_at}, max age {max_age}s (now: {now})")]
    TokenTooOld {
        issued_at: i64,
        now: i64,
        max_age: u64,
    },

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    TokenAudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("Token issuer mismatch: expected '{expected}', found {found:?}")]
    TokenIssuerMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Token type header mismatch: expected '{expected}', found {found:?}")]
    TokenTypeMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("Required token claim '{0}' is missing")]
    TokenMissingClaim(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Clock skew too large: {value} seconds (maximum: {max} seconds)")]
    ClockSkewTooLarge { value: u64, max: u64 },

    #[error("Max age too large: {value} seconds (maximum: {max} seconds)")]
    MaxAgeTooLarge { value: u64, max: u64 },
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TokenTooLarge { .. }
            | Error::FormatInvalid
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::SignatureB64TooLarge { .. }
            | Error::HeaderFieldTooLong { .. } => ErrorKind::Malformed,

            Error::ClaimInvalidType { .. }
            | Error::ClaimNotPresent(_)
            | Error::ClaimWrongType { .. }
            | Error::ClaimAlreadySet(_)
            | Error::ClaimStringTooLong { .. }
            | Error::TimestampOutOfBounds { .. }
            | Error::TimestampOverflow => ErrorKind::ClaimsModel,

            Error::KeyInvalid(_) | Error::AlgorithmUnsupported(_) | Error::AlgorithmNoneRejected => {
                ErrorKind::Key
            }

            Error::SigningFailure(_) | Error::SignatureInvalid | Error::KeyMismatch { .. } => {
                ErrorKind::Cryptographic
            }

            Error::TokenExpired { .. }
            | Error::TokenNotYetValid { .. }
            | Error::TokenIssuedInFuture { .. }
            | Error::TokenTooOld { .. }
            | Error::TokenAudienceMismatch { .. }
            | Error::TokenIssuerMismatch { .. }
            | Error::TokenTypeMismatch { .. }
            | Error::TokenMissingClaim(_) => ErrorKind::Policy,

            Error::ClockSkewTooLarge { .. } | Error::MaxAgeTooLarge { .. } => {
                ErrorKind::Configuration
            }
        }
    }

    /// Whether the token string was structurally unusable
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::Malformed
    }
}

/// Result type alias for JWTSeal operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::FormatInvalid.kind(), ErrorKind::Malformed);
        assert_eq!(Error::SignatureInvalid.kind(), ErrorKind::Cryptographic);
        assert_eq!(
            Error::SigningFailure("hardware fault".into()).kind(),
            ErrorKind::Cryptographic
        );
        assert_eq!(
            Error::TokenAudienceMismatch {
                expected: "a".into(),
                found: vec![],
            }
            .kind(),
            ErrorKind::Policy
        );
        assert_eq!(
            Error::ClaimNotPresent("sub".into()).kind(),
            ErrorKind::ClaimsModel
        );
        assert_eq!(
            Error::ClockSkewTooLarge { value: 1, max: 0 }.kind(),
            ErrorKind::Configuration
        );
        assert!(Error::FormatInvalidJson("x".into()).is_malformed());
        assert!(!Error::SignatureInvalid.is_malformed());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::KeyMismatch {
                field: "kid",
                expected: "k1".into(),
                found: "k2".into(),
            }
            .to_string(),
            "Token header kid 'k2' does not match key kid 'k1'"
        );
        assert_eq!(
            Error::TokenExpired {
                expired_at: 10,
                now: 20,
                skew: 5,
            }
            .to_string(),
            "Token expired at 10 (now: 20, skew: 5s)"
        );
    }
}
