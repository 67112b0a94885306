//! Command line arguments

use clap::{Args, Parser, Subcommand};
use jwtseal::AlgorithmType;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "jwtseal", version, about = "Create keys, sign and verify JSON Web Tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an ECDSA key pair as PKCS#8 and SPKI DER files
    Keygen(KeygenArgs),

    /// Sign a new token and print it
    Sign(SignArgs),

    /// Verify a token and print its claims as JSON
    Verify(VerifyArgs),

    /// Sign and verify a sample token with a throwaway ES256 key
    Demo,
}

#[derive(Debug, Args)]
pub struct KeygenArgs {
    /// Signing algorithm (ES256, ES384 or ES512)
    #[arg(long, env = "JWTSEAL_ALGORITHM", default_value = "ES256", value_parser = parse_algorithm)]
    pub alg: AlgorithmType,

    /// Output path prefix; writes `<out>.pk8` and `<out>.spki`
    #[arg(long, short)]
    pub out: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct SignArgs {
    /// PKCS#8 DER private key file
    #[arg(long, env = "JWTSEAL_SIGNING_KEY")]
    pub key: PathBuf,

    /// Signing algorithm
    #[arg(long, env = "JWTSEAL_ALGORITHM", default_value = "ES256", value_parser = parse_algorithm)]
    pub alg: AlgorithmType,

    /// Key identifier written to the `kid` header
    #[arg(long, env = "JWTSEAL_KEY_ID")]
    pub kid: String,

    /// Subject (sub)
    #[arg(long)]
    pub sub: Option<String>,

    /// Audience (aud), repeatable
    #[arg(long)]
    pub aud: Vec<String>,

    /// Issuer (iss)
    #[arg(long)]
    pub iss: Option<String>,

    /// JWT ID (jti)
    #[arg(long)]
    pub jti: Option<String>,

    /// Lifetime in seconds; sets `iat` to now and `exp` to now + ttl
    #[arg(long, default_value_t = 3600)]
    pub ttl: u64,

    /// Custom claim as `name=value`, repeatable
    ///
    /// `true`, `false`, `null` and numbers keep their JSON type; anything
    /// else is a string.
    #[arg(long = "claim", value_parser = parse_claim)]
    pub claims: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Compact token
    pub token: String,

    /// SPKI DER public key file (PKCS#1 is accepted for RSA)
    #[arg(long = "public-key", env = "JWTSEAL_VERIFICATION_KEY")]
    pub public_key: PathBuf,

    /// Expected algorithm
    #[arg(long, env = "JWTSEAL_ALGORITHM", default_value = "ES256", value_parser = parse_algorithm)]
    pub alg: AlgorithmType,

    /// Expected key identifier; defaults to the token's `kid`
    #[arg(long, env = "JWTSEAL_KEY_ID")]
    pub kid: Option<String>,

    /// Required audience member
    #[arg(long)]
    pub aud: Option<String>,

    /// Required issuer
    #[arg(long)]
    pub iss: Option<String>,

    /// Clock skew tolerance in seconds
    #[arg(long, default_value_t = 0)]
    pub skew: u64,

    /// Reject tokens without `exp`
    #[arg(long)]
    pub require_exp: bool,

    /// Maximum token age in seconds, measured from `iat`
    #[arg(long)]
    pub max_age: Option<u64>,
}

fn parse_algorithm(value: &str) -> Result<AlgorithmType, jwtseal::Error> {
    value.parse()
}

fn parse_claim(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got `{value}`")),
    }
}
