//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-8192 signatures are 1024 bytes; ECDSA fixed signatures are at most 132
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum size for Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum length for key ID (kid) field, in headers and on keys (256 bytes)
pub(crate) const MAX_KID_LENGTH: usize = 256;

/// Maximum length for type (typ) field in JWT header (64 bytes)
pub(crate) const MAX_TYP_LENGTH: usize = 64;

// ============================================================================
// Claim limits
// ============================================================================

/// Maximum length for registered claim string values (2048 bytes)
/// Applies to iss, sub, aud, jti claims
pub(crate) const MAX_CLAIM_STRING_LENGTH: usize = 2048;

/// Maximum nesting depth of custom claim values
pub(crate) const MAX_CLAIM_DEPTH: usize = 32;

// ============================================================================
// Timestamp bounds
// ============================================================================

/// Minimum valid Unix timestamp (1970-01-01 00:00:00 UTC)
pub(crate) const MIN_TIMESTAMP: i64 = 0;

/// Maximum valid Unix timestamp (2100-01-01 00:00:00 UTC)
pub(crate) const MAX_TIMESTAMP: i64 = 4_102_444_800;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Maximum token age (1 year = 31,536,000 seconds)
pub(crate) const MAX_MAX_AGE_SECONDS: u64 = 86400 * 365;
