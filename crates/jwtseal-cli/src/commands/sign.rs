use super::read_private_key;
use crate::cli::SignArgs;
use anyhow::{Context, Result};
use jwtseal::{ClaimValue, ClaimsBuilder, SigningKey, encode_to_string};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn run(args: SignArgs) -> Result<()> {
    let token = sign_token(args)?;
    println!("{token}");
    Ok(())
}

/// Build claims from the arguments and sign them into a compact token
pub(crate) fn sign_token(args: SignArgs) -> Result<String> {
    let pkcs8 = read_private_key(&args.key)?;
    let key = SigningKey::from_pkcs8_der(args.alg, args.kid.as_str(), &pkcs8)
        .with_context(|| format!("failed to load {} signing key", args.alg))?;

    let issued_at = unix_now()?;
    let ttl = i64::try_from(args.ttl).context("ttl out of range")?;

    let mut builder = ClaimsBuilder::new();
    if let Some(issuer) = args.iss {
        builder.issuer(issuer)?;
    }
    if let Some(subject) = args.sub {
        builder.subject(subject)?;
    }
    if !args.aud.is_empty() {
        builder.audiences(args.aud)?;
    }
    if let Some(jwt_id) = args.jti {
        builder.jwt_id(jwt_id)?;
    }
    builder
        .issued_at(issued_at)?
        .expiration(issued_at.saturating_add(ttl))?;
    for (name, value) in args.claims {
        builder
            .set_claim(name.as_str(), claim_value(&value))
            .with_context(|| format!("invalid claim `{name}`"))?;
    }

    let token = encode_to_string(&builder.build(), &key)?;
    tracing::info!(algorithm = %args.alg, kid = %args.kid, "signed token");
    Ok(token)
}

fn claim_value(raw: &str) -> ClaimValue {
    match raw {
        "true" => ClaimValue::Bool(true),
        "false" => ClaimValue::Bool(false),
        "null" => ClaimValue::Null,
        _ => match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => ClaimValue::Number(number),
            _ => ClaimValue::String(raw.to_string()),
        },
    }
}

fn unix_now() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(i64::try_from(elapsed.as_secs())?)
}
