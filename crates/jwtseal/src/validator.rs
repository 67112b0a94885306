//! Token validation
//!
//! [`validate`] is the only way to turn a [`Token`] into trusted [`Claims`].
//! It checks, in order: the policy's own bounds, that the token header names
//! the verification key's algorithm and key id, the signature, and finally
//! the claims against the [`ValidationPolicy`]. The first failure is returned.

use crate::claims::{Claims, EXPIRATION, ISSUED_AT};
use crate::decoder::decode;
use crate::error::{Error, Result};
use crate::keys::VerificationKey;
use crate::limits::{MAX_CLOCK_SKEW_SECONDS, MAX_MAX_AGE_SECONDS};
use crate::primitive::Verifier;
use crate::token::{Token, parse_claims};
use crate::utils::bounds::apply_clock_skew;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Claim checks applied after the signature has been verified
///
/// All checks are opt-in except `exp` and `nbf`, which are always enforced
/// when the token carries them.
#[derive(Debug, Clone, Default)]
pub struct ValidationPolicy {
    expected_audience: Option<String>,
    expected_issuer: Option<String>,
    clock_skew_seconds: u64,
    current_time: Option<i64>,
    expected_type_header: Option<String>,
    require_expiration: bool,
    expect_issued_in_past: bool,
    max_age_seconds: Option<u64>,
}

impl ValidationPolicy {
    /// Create a policy that only enforces `exp` and `nbf` when present
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `aud` to contain this audience
    pub fn expected_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    /// Require `iss` to equal this issuer
    pub fn expected_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Set clock skew tolerance
    ///
    /// # Security
    /// Clock skew is limited to prevent effectively disabling expiration checks.
    /// Maximum allowed value is 300 seconds (5 minutes).
    /// Values exceeding the limit will be rejected during validation.
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Validate as if the current time were `timestamp` (Unix seconds)
    pub fn at_time(mut self, timestamp: i64) -> Self {
        self.current_time = Some(timestamp);
        self
    }

    /// Require the `typ` header to equal this value
    pub fn expected_type_header(mut self, typ: impl Into<String>) -> Self {
        self.expected_type_header = Some(typ.into());
        self
    }

    /// Reject tokens without an `exp` claim
    pub fn require_expiration(mut self) -> Self {
        self.require_expiration = true;
        self
    }

    /// Reject tokens whose `iat` lies in the future
    pub fn expect_issued_in_past(mut self) -> Self {
        self.expect_issued_in_past = true;
        self
    }

    /// Set maximum token age measured from `iat`
    ///
    /// # Security
    /// Max age is limited to prevent effectively disabling age checks.
    /// Maximum allowed value is 31,536,000 seconds (1 year).
    /// Values exceeding the limit will be rejected during validation.
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age_seconds = Some(seconds);
        self
    }

    /// Configured clock skew in seconds
    pub fn clock_skew_seconds(&self) -> u64 {
        self.clock_skew_seconds
    }

    /// Time the policy evaluates against
    pub fn now(&self) -> i64 {
        self.current_time.unwrap_or_else(current_timestamp)
    }

    /// Validate configuration bounds to prevent security bypass
    fn validate_bounds(&self) -> Result<()> {
        if self.clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
            return Err(Error::ClockSkewTooLarge {
                value: self.clock_skew_seconds,
                max: MAX_CLOCK_SKEW_SECONDS,
            });
        }
        if let Some(max_age) = self.max_age_seconds
            && max_age > MAX_MAX_AGE_SECONDS
        {
            return Err(Error::MaxAgeTooLarge {
                value: max_age,
                max: MAX_MAX_AGE_SECONDS,
            });
        }
        Ok(())
    }
}

/// Authenticate a token and check its claims
///
/// Returns the claims only when every check passes.
pub fn validate<V>(token: &Token, verifier: &V, policy: &ValidationPolicy) -> Result<Claims>
where
    V: Verifier + ?Sized,
{
    // 1. Policy bounds
    policy.validate_bounds()?;

    // 2. Header must name the verification key
    check_header_matches_key(token, verifier)?;

    // 3. Verify signature over the recomputed signing input
    let signing_input = token.signing_input();
    if !verifier.verify(signing_input.as_bytes(), token.signature()) {
        return Err(Error::SignatureInvalid);
    }

    // 4. Claims are only parsed once the payload is authentic
    let claims = parse_claims(token.payload_bytes())?;

    // 5. Claims against policy
    validate_claims(token, &claims, policy)?;

    Ok(claims)
}

fn check_header_matches_key<V>(token: &Token, verifier: &V) -> Result<()>
where
    V: Verifier + ?Sized,
{
    let algorithm = token.header().algorithm_type()?;
    if algorithm != verifier.algorithm() {
        return Err(Error::KeyMismatch {
            field: "alg",
            expected: verifier.algorithm().to_string(),
            found: algorithm.to_string(),
        });
    }

    // A token without `kid` is matched by algorithm alone
    if let Some(kid) = token.header().key_id()
        && kid != verifier.key_id()
    {
        return Err(Error::KeyMismatch {
            field: "kid",
            expected: verifier.key_id().to_string(),
            found: kid.to_string(),
        });
    }

    Ok(())
}

fn validate_claims(token: &Token, claims: &Claims, policy: &ValidationPolicy) -> Result<()> {
    let now = policy.now();
    let skew = policy.clock_skew_seconds;

    if let Some(expected) = &policy.expected_type_header {
        let found = token.header().token_type();
        if found != Some(expected.as_str()) {
            return Err(Error::TokenTypeMismatch {
                expected: expected.clone(),
                found: found.map(str::to_string),
            });
        }
    }

    // Validate expiration with checked arithmetic
    match claims.expiration() {
        Ok(exp) => {
            let exp_with_skew = apply_clock_skew(exp, skew, true)?;
            if now > exp_with_skew {
                return Err(Error::TokenExpired {
                    expired_at: exp,
                    now,
                    skew,
                });
            }
        }
        Err(_) if policy.require_expiration => {
            return Err(Error::TokenMissingClaim(EXPIRATION.into()));
        }
        Err(_) => {}
    }

    // Validate not-before with checked arithmetic
    if let Ok(nbf) = claims.not_before() {
        let nbf_with_skew = apply_clock_skew(nbf, skew, false)?;
        if now < nbf_with_skew {
            return Err(Error::TokenNotYetValid {
                not_before: nbf,
                now,
                skew,
            });
        }
    }

    // Validate issued-at with checked arithmetic
    if policy.expect_issued_in_past
        && let Ok(iat) = claims.issued_at()
    {
        let now_with_skew = apply_clock_skew(now, skew, true)?;
        if iat > now_with_skew {
            return Err(Error::TokenIssuedInFuture {
                issued_at: iat,
                now,
                skew,
            });
        }
    }

    if let Some(max_age) = policy.max_age_seconds {
        let iat = claims
            .issued_at()
            .map_err(|_| Error::TokenMissingClaim(ISSUED_AT.into()))?;
        let iat_plus_max_age = apply_clock_skew(iat, max_age, true)?;
        if now > iat_plus_max_age {
            return Err(Error::TokenTooOld {
                issued_at: iat,
                now,
                max_age,
            });
        }
    }

    // Validate audience membership
    if let Some(expected) = &policy.expected_audience
        && !claims.contains_audience(expected)
    {
        return Err(Error::TokenAudienceMismatch {
            expected: expected.clone(),
            found: claims
                .audiences()
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        });
    }

    // Validate issuer
    if let Some(expected) = &policy.expected_issuer {
        let found = claims.issuer().ok();
        if found != Some(expected.as_str()) {
            return Err(Error::TokenIssuerMismatch {
                expected: expected.clone(),
                found: found.map(str::to_string),
            });
        }
    }

    Ok(())
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    unix_seconds(elapsed)
}

/// Whole seconds as `i64`, saturating so an out-of-range clock reads as
/// far future and expires every token
fn unix_seconds(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
}

/// JWT token validator
///
/// Bundles a verification key with a policy. The validator is configured once
/// and can be reused, or shared across threads, for many token verifications.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    config_key: VerificationKey,
    config_policy: ValidationPolicy,
}

impl TokenValidator {
    /// Create a validator for tokens signed by the matching signing key
    pub fn new(key: VerificationKey) -> Self {
        Self {
            config_key: key,
            config_policy: ValidationPolicy::default(),
        }
    }

    /// Configure the validation policy
    pub fn policy(&mut self, policy: ValidationPolicy) -> &mut Self {
        self.config_policy = policy;
        self
    }

    /// Finish configuration
    pub fn build(&mut self) -> Self {
        self.clone()
    }

    /// Get the verification key
    pub fn key(&self) -> &VerificationKey {
        &self.config_key
    }

    /// Decode and validate a compact token string
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token = decode(token)?;
        validate(&token, &self.config_key, &self.config_policy)
    }
}
