//! Signature algorithms for JWT signing and verification
use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use crate::utils::der::EcdsaCurve;

use aws_lc_rs::signature::{self, EcdsaSigningAlgorithm, RsaEncoding, UnparsedPublicKey};
use std::str::FromStr;

/// Algorithm identifier carried in the JWT `alg` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    ES256,
    ES384,
    ES512,
    RS256,
    RS384,
    RS512,
}

impl AlgorithmType {
    /// All supported algorithms
    pub const ALL: [AlgorithmType; 6] = [
        AlgorithmType::ES256,
        AlgorithmType::ES384,
        AlgorithmType::ES512,
        AlgorithmType::RS256,
        AlgorithmType::RS384,
        AlgorithmType::RS512,
    ];

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::ES256 => "ES256",
            AlgorithmType::ES384 => "ES384",
            AlgorithmType::ES512 => "ES512",
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
        }
    }

    /// Whether this is an ECDSA algorithm
    pub const fn is_ecdsa(&self) -> bool {
        matches!(
            self,
            AlgorithmType::ES256 | AlgorithmType::ES384 | AlgorithmType::ES512
        )
    }

    /// Curve used by an ECDSA algorithm, `None` for RSA
    pub(crate) const fn ecdsa_curve(&self) -> Option<EcdsaCurve> {
        match self {
            AlgorithmType::ES256 => Some(EcdsaCurve::P256),
            AlgorithmType::ES384 => Some(EcdsaCurve::P384),
            AlgorithmType::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }

    /// Signing algorithm for ECDSA keys (fixed-length R||S output)
    pub(crate) fn ecdsa_signing_algorithm(&self) -> Option<&'static EcdsaSigningAlgorithm> {
        match self {
            AlgorithmType::ES256 => Some(&signature::ECDSA_P256_SHA256_FIXED_SIGNING),
            AlgorithmType::ES384 => Some(&signature::ECDSA_P384_SHA384_FIXED_SIGNING),
            AlgorithmType::ES512 => Some(&signature::ECDSA_P521_SHA512_FIXED_SIGNING),
            _ => None,
        }
    }

    /// PKCS#1 v1.5 padding for RSA keys
    pub(crate) fn rsa_encoding(&self) -> Option<&'static dyn RsaEncoding> {
        match self {
            AlgorithmType::RS256 => Some(&signature::RSA_PKCS1_SHA256),
            AlgorithmType::RS384 => Some(&signature::RSA_PKCS1_SHA384),
            AlgorithmType::RS512 => Some(&signature::RSA_PKCS1_SHA512),
            _ => None,
        }
    }

    /// Get the verification algorithm for signature verification
    ///
    /// Note: JWT ECDSA signatures use IEEE P1363 format (fixed-length R||S),
    /// not ASN.1 DER encoding, as per RFC 7518 Section 3.4.
    fn verification_algorithm(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self {
            AlgorithmType::ES256 => &signature::ECDSA_P256_SHA256_FIXED,
            AlgorithmType::ES384 => &signature::ECDSA_P384_SHA384_FIXED,
            AlgorithmType::ES512 => &signature::ECDSA_P521_SHA512_FIXED,
            AlgorithmType::RS256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            AlgorithmType::RS384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            AlgorithmType::RS512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        }
    }

    /// Verify a signature using the algorithm
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The raw signature bytes
    /// * `key_der` - The DER-encoded public key (SubjectPublicKeyInfo)
    pub(crate) fn verify_signature(
        &self,
        signing_input: &[u8],
        signature: &[u8],
        key_der: &[u8],
    ) -> Result<()> {
        let public_key = UnparsedPublicKey::new(self.verification_algorithm(), key_der);

        public_key
            .verify(signing_input, signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

impl FromStr for AlgorithmType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Length check before matching
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "none" => Err(Error::AlgorithmNoneRejected),
            "ES256" => Ok(AlgorithmType::ES256),
            "ES384" => Ok(AlgorithmType::ES384),
            "ES512" => Ok(AlgorithmType::ES512),
            "RS256" => Ok(AlgorithmType::RS256),
            "RS384" => Ok(AlgorithmType::RS384),
            "RS512" => Ok(AlgorithmType::RS512),
            _ => Err(Error::AlgorithmUnsupported(s.into())),
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
