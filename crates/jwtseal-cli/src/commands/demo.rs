use anyhow::Result;
use jwtseal::{
    AlgorithmType, ClaimsBuilder, SigningKey, TokenValidator, ValidationPolicy, encode_to_string,
};
use std::time::{SystemTime, UNIX_EPOCH};

const SUBJECT: &str = "example subject";
const AUDIENCE: &str = "example audience";

/// Round trip through an ephemeral key: sign, then verify with the public half
pub fn run() -> Result<()> {
    let key = SigningKey::generate(AlgorithmType::ES256, "demo")?;
    tracing::debug!(?key, "generated ephemeral key");

    let now = i64::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())?;
    let claims = ClaimsBuilder::new()
        .subject(SUBJECT)?
        .audience(AUDIENCE)?
        .expiration(now + 3600)?
        .build();
    let token = encode_to_string(&claims, &key)?;
    tracing::info!(len = token.len(), "signed token");

    let validator = TokenValidator::new(key.verification_key())
        .policy(ValidationPolicy::new().expected_audience(AUDIENCE))
        .build();
    let verified = validator.verify(&token)?;
    tracing::info!(subject = %verified.subject()?, "verified token");

    println!("{token}");
    println!("{}", verified.to_json());
    Ok(())
}
