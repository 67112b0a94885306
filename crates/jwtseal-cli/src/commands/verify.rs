use super::read_public_key;
use crate::cli::VerifyArgs;
use anyhow::{Context, Result};
use jwtseal::{Claims, ValidationPolicy, VerificationKey, decode, validate};

pub fn run(args: VerifyArgs) -> Result<()> {
    let claims = verify_token(args)?;
    println!("{}", claims.to_json());
    Ok(())
}

/// Decode the token and validate it against the key file and policy flags
pub(crate) fn verify_token(args: VerifyArgs) -> Result<Claims> {
    let token = decode(args.token.trim()).context("token is not well formed")?;

    // Without an explicit kid the key file is trusted for whatever the token names
    let kid = match args.kid {
        Some(kid) => kid,
        None => {
            let kid = token.header().key_id().unwrap_or_default().to_string();
            tracing::debug!(kid = %kid, "using key id from token header");
            kid
        }
    };

    let der = read_public_key(&args.public_key)?;
    let key = VerificationKey::from_public_key_der(args.alg, kid.as_str(), &der)
        .with_context(|| format!("failed to load {} public key", args.alg))?;

    let mut policy = ValidationPolicy::new().clock_skew(args.skew);
    if let Some(audience) = args.aud {
        policy = policy.expected_audience(audience);
    }
    if let Some(issuer) = args.iss {
        policy = policy.expected_issuer(issuer);
    }
    if args.require_exp {
        policy = policy.require_expiration();
    }
    if let Some(max_age) = args.max_age {
        policy = policy.max_age(max_age);
    }

    match validate(&token, &key, &policy) {
        Ok(claims) => {
            tracing::info!(algorithm = %args.alg, kid = %kid, "token verified");
            Ok(claims)
        }
        Err(error) => {
            tracing::warn!(kind = ?error.kind(), "token rejected");
            Err(error.into())
        }
    }
}
