//! Bounds validation utilities
//!
//! Timestamp bounds, checked clock-skew arithmetic and field size limits.

use crate::error::{Error, Result};
use crate::limits::{MAX_TIMESTAMP, MIN_TIMESTAMP};

/// Check if timestamp is within acceptable bounds
pub(crate) fn validate_timestamp_bounds(value: i64) -> Result<()> {
    if !(MIN_TIMESTAMP..=MAX_TIMESTAMP).contains(&value) {
        return Err(Error::TimestampOutOfBounds {
            value,
            min: MIN_TIMESTAMP,
            max: MAX_TIMESTAMP,
        });
    }
    Ok(())
}

/// Apply clock skew to a timestamp with overflow protection
pub(crate) fn apply_clock_skew(timestamp: i64, skew_seconds: u64, add: bool) -> Result<i64> {
    let skew_i64 = i64::try_from(skew_seconds).map_err(|_| Error::TimestampOverflow)?;
    if add {
        timestamp.checked_add(skew_i64)
    } else {
        timestamp.checked_sub(skew_i64)
    }
    .ok_or(Error::TimestampOverflow)
}

/// Validate header field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::HeaderFieldTooLong {
            field: field.into(),
            length: value.len(),
            max,
        });
    }
    Ok(())
}

/// Validate registered claim string size
pub(crate) fn validate_claim_string(claim: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::ClaimStringTooLong {
            claim: claim.into(),
            length: value.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_bounds() {
        assert!(validate_timestamp_bounds(0).is_ok());
        assert!(validate_timestamp_bounds(MAX_TIMESTAMP).is_ok());
        assert!(matches!(
            validate_timestamp_bounds(-1),
            Err(Error::TimestampOutOfBounds { value: -1, .. })
        ));
        assert!(validate_timestamp_bounds(MAX_TIMESTAMP + 1).is_err());
    }

    #[test]
    fn test_apply_clock_skew() {
        assert_eq!(apply_clock_skew(100, 10, true).unwrap(), 110);
        assert_eq!(apply_clock_skew(100, 10, false).unwrap(), 90);
        assert_eq!(
            apply_clock_skew(i64::MAX, 1, true),
            Err(Error::TimestampOverflow)
        );
        assert_eq!(
            apply_clock_skew(0, u64::MAX, false),
            Err(Error::TimestampOverflow)
        );
    }

    #[test]
    fn test_field_sizes() {
        assert!(validate_field_size("kid", "abc", 3).is_ok());
        assert!(matches!(
            validate_field_size("kid", "abcd", 3),
            Err(Error::HeaderFieldTooLong { length: 4, .. })
        ));
        assert!(matches!(
            validate_claim_string("sub", "abcd", 3),
            Err(Error::ClaimStringTooLong { length: 4, .. })
        ));
    }
}
