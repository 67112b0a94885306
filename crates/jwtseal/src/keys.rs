//! Key material for signing and verifying tokens
//!
//! A [`SigningKey`] owns an `aws-lc-rs` key pair and never hands out its private
//! bytes. Its public half is exported as a [`VerificationKey`], which holds the
//! DER SubjectPublicKeyInfo and can be distributed freely. Both carry the same
//! algorithm and key identifier so tokens can be matched to keys.

use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use crate::limits::MAX_KID_LENGTH;
use crate::primitive::{Signer, Verifier};
use crate::utils::der::{self, SpkiKeyType};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{EcdsaKeyPair, KeyPair, RsaKeyPair};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Smallest RSA modulus accepted for signing (2048 bits)
const MIN_RSA_MODULUS_LEN: usize = 256;

fn validate_key_id(key_id: &str) -> Result<()> {
    if key_id.len() > MAX_KID_LENGTH {
        return Err(Error::KeyInvalid(format!(
            "key id too long: {} bytes (maximum: {} bytes)",
            key_id.len(),
            MAX_KID_LENGTH
        )));
    }
    Ok(())
}

/// Generate a fresh PKCS#8 v1 private key for an ECDSA algorithm
///
/// The returned buffer is wiped on drop. RSA keys are not generated here;
/// import them with [`SigningKey::from_pkcs8_der`].
pub fn generate_pkcs8(algorithm: AlgorithmType) -> Result<Zeroizing<Vec<u8>>> {
    let signing_algorithm = algorithm.ecdsa_signing_algorithm().ok_or_else(|| {
        Error::KeyInvalid(format!(
            "{algorithm} key generation is not supported, import a PKCS#8 key instead"
        ))
    })?;

    let rng = SystemRandom::new();
    let document = EcdsaKeyPair::generate_pkcs8(signing_algorithm, &rng)
        .map_err(|_| Error::KeyInvalid(format!("{algorithm} key generation failed")))?;

    Ok(Zeroizing::new(document.as_ref().to_vec()))
}

enum KeyPairKind {
    Ecdsa(EcdsaKeyPair),
    Rsa(RsaKeyPair),
}

/// Private signing key tagged with its algorithm and key identifier
pub struct SigningKey {
    algorithm: AlgorithmType,
    key_id: String,
    key_pair: KeyPairKind,
    public_key_der: Arc<[u8]>,
}

impl SigningKey {
    /// Load a signing key from an unencrypted PKCS#8 DER document
    ///
    /// The key type must match `algorithm`: a P-256 key for ES256, an RSA key
    /// of at least 2048 bits for RS256, and so on.
    pub fn from_pkcs8_der(
        algorithm: AlgorithmType,
        key_id: impl Into<String>,
        pkcs8: &[u8],
    ) -> Result<Self> {
        let key_id = key_id.into();
        validate_key_id(&key_id)?;

        let (key_pair, public_key_der) = match (
            algorithm.ecdsa_signing_algorithm(),
            algorithm.ecdsa_curve(),
        ) {
            (Some(signing_algorithm), Some(curve)) => {
                let key_pair = EcdsaKeyPair::from_pkcs8(signing_algorithm, pkcs8)
                    .map_err(|e| Error::KeyInvalid(format!("{algorithm} private key: {e}")))?;
                let spki = der::ec_spki_from_point(key_pair.public_key().as_ref(), curve)?;
                (KeyPairKind::Ecdsa(key_pair), spki)
            }
            _ => {
                let key_pair = RsaKeyPair::from_pkcs8(pkcs8)
                    .map_err(|e| Error::KeyInvalid(format!("{algorithm} private key: {e}")))?;
                if key_pair.public_modulus_len() < MIN_RSA_MODULUS_LEN {
                    return Err(Error::KeyInvalid(format!(
                        "RSA modulus too small: {} bits (minimum: {} bits)",
                        key_pair.public_modulus_len() * 8,
                        MIN_RSA_MODULUS_LEN * 8
                    )));
                }
                let public_key = key_pair.public_key().as_ref();
                let spki = match der::spki_key_type(public_key) {
                    Ok(SpkiKeyType::Rsa) => public_key.to_vec(),
                    _ => der::rsa_spki_from_pkcs1(public_key)?,
                };
                (KeyPairKind::Rsa(key_pair), spki)
            }
        };

        Ok(Self {
            algorithm,
            key_id,
            key_pair,
            public_key_der: spki_into_arc(public_key_der),
        })
    }

    /// Generate a new random signing key (ECDSA algorithms only)
    pub fn generate(algorithm: AlgorithmType, key_id: impl Into<String>) -> Result<Self> {
        let pkcs8 = generate_pkcs8(algorithm)?;
        Self::from_pkcs8_der(algorithm, key_id, &pkcs8)
    }

    /// Get the signing algorithm
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    /// Get the key identifier
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Derive the matching verification key
    pub fn verification_key(&self) -> VerificationKey {
        VerificationKey {
            algorithm: self.algorithm,
            key_id: self.key_id.clone(),
            spki_der: Arc::clone(&self.public_key_der),
        }
    }
}

impl Signer for SigningKey {
    fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();
        match &self.key_pair {
            KeyPairKind::Ecdsa(key_pair) => key_pair
                .sign(&rng, message)
                .map(|signature| signature.as_ref().to_vec())
                .map_err(|_| Error::SigningFailure(format!("{} signing failed", self.algorithm))),
            KeyPairKind::Rsa(key_pair) => {
                let encoding = self.algorithm.rsa_encoding().ok_or_else(|| {
                    Error::SigningFailure(format!("{} is not an RSA algorithm", self.algorithm))
                })?;
                let mut signature = vec![0u8; key_pair.public_modulus_len()];
                key_pair
                    .sign(encoding, &rng, message, &mut signature)
                    .map_err(|_| {
                        Error::SigningFailure(format!("{} signing failed", self.algorithm))
                    })?;
                Ok(signature)
            }
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

fn spki_into_arc(spki_der: Vec<u8>) -> Arc<[u8]> {
    Arc::from(spki_der.into_boxed_slice())
}

/// Public verification key tagged with its algorithm and key identifier
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey {
    algorithm: AlgorithmType,
    key_id: String,
    spki_der: Arc<[u8]>,
}

impl VerificationKey {
    /// Import a public key
    ///
    /// Accepts a DER SubjectPublicKeyInfo for any algorithm, a raw uncompressed
    /// X9.62 point for ECDSA, or a DER PKCS#1 `RSAPublicKey` for RSA. The key
    /// type and curve must match `algorithm`.
    pub fn from_public_key_der(
        algorithm: AlgorithmType,
        key_id: impl Into<String>,
        der_bytes: &[u8],
    ) -> Result<Self> {
        let key_id = key_id.into();
        validate_key_id(&key_id)?;

        let spki_der = match der::spki_key_type(der_bytes) {
            Ok(key_type) => {
                check_key_type(algorithm, key_type)?;
                der_bytes.to_vec()
            }
            Err(spki_error) => match algorithm.ecdsa_curve() {
                Some(curve) if der_bytes.first() == Some(&0x04) => {
                    der::ec_spki_from_point(der_bytes, curve)?
                }
                Some(_) => return Err(spki_error),
                None => der::rsa_spki_from_pkcs1(der_bytes).map_err(|_| {
                    Error::KeyInvalid(
                        "expected SubjectPublicKeyInfo or PKCS#1 RSAPublicKey".to_string(),
                    )
                })?,
            },
        };

        Ok(Self {
            algorithm,
            key_id,
            spki_der: spki_into_arc(spki_der),
        })
    }

    /// Get the verification algorithm
    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    /// Get the key identifier
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Borrow the DER SubjectPublicKeyInfo
    pub fn public_key_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Export the DER SubjectPublicKeyInfo
    pub fn to_public_key_der(&self) -> Vec<u8> {
        self.spki_der.to_vec()
    }
}

fn check_key_type(algorithm: AlgorithmType, key_type: SpkiKeyType) -> Result<()> {
    let matches = match key_type {
        SpkiKeyType::Rsa => !algorithm.is_ecdsa(),
        SpkiKeyType::Ecdsa(curve) => algorithm.ecdsa_curve() == Some(curve),
    };

    if matches {
        Ok(())
    } else {
        Err(Error::KeyInvalid(format!(
            "{key_type:?} public key cannot be used with {algorithm}"
        )))
    }
}

impl Verifier for VerificationKey {
    fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.algorithm
            .verify_signature(message, signature, &self.spki_der)
            .is_ok()
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .field("spki_len", &self.spki_der.len())
            .finish()
    }
}
