//! DER helpers for SubjectPublicKeyInfo public keys
//!
//! Verification keys are stored and exported as DER SubjectPublicKeyInfo, the
//! form `aws-lc-rs` accepts for both RSA and ECDSA verification. This module
//! wraps raw key encodings (X9.62 points, PKCS#1 `RSAPublicKey`) in SPKI and
//! inspects SPKI documents to find out which key type they carry.

use crate::error::{Error, Result};
use der::asn1::{AnyRef, BitString, UintRef};
use der::{Decode, Encode, Sequence};
use spki::{
    AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned, SubjectPublicKeyInfoRef,
};

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP256R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const SECP521R1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

fn key_error(operation: &str, details: impl std::fmt::Display) -> Error {
    Error::KeyInvalid(format!("{operation}: {details}"))
}

/// Named curves supported for ECDSA keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EcdsaCurve {
    P256,
    P384,
    P521,
}

impl EcdsaCurve {
    fn oid(self) -> ObjectIdentifier {
        match self {
            EcdsaCurve::P256 => SECP256R1_OID,
            EcdsaCurve::P384 => SECP384R1_OID,
            EcdsaCurve::P521 => SECP521R1_OID,
        }
    }

    fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        [EcdsaCurve::P256, EcdsaCurve::P384, EcdsaCurve::P521]
            .into_iter()
            .find(|curve| curve.oid() == oid)
    }

    /// Length of an uncompressed X9.62 point (0x04 || X || Y)
    pub(crate) fn point_len(self) -> usize {
        match self {
            EcdsaCurve::P256 => 65,
            EcdsaCurve::P384 => 97,
            EcdsaCurve::P521 => 133,
        }
    }
}

/// Key type found inside a SubjectPublicKeyInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpkiKeyType {
    Rsa,
    Ecdsa(EcdsaCurve),
}

fn encode_spki(algorithm: AlgorithmIdentifierOwned, key_bytes: &[u8]) -> Result<Vec<u8>> {
    let subject_public_key = BitString::new(0, key_bytes.to_vec())
        .map_err(|e| key_error("failed to create bit string", e))?;

    let spki = SubjectPublicKeyInfoOwned {
        algorithm,
        subject_public_key,
    };

    spki.to_der()
        .map_err(|e| key_error("failed to encode SPKI", e))
}

/// Wrap an uncompressed X9.62 EC point in SubjectPublicKeyInfo
pub(crate) fn ec_spki_from_point(point: &[u8], curve: EcdsaCurve) -> Result<Vec<u8>> {
    if point.len() != curve.point_len() || point.first() != Some(&0x04) {
        return Err(key_error(
            "invalid EC public key",
            format!(
                "expected {} byte uncompressed point for {curve:?}, got {} bytes",
                curve.point_len(),
                point.len()
            ),
        ));
    }

    let curve_oid = curve.oid();
    let algorithm = AlgorithmIdentifierOwned {
        oid: EC_PUBLIC_KEY_OID,
        parameters: Some(AnyRef::from(&curve_oid).into()),
    };

    encode_spki(algorithm, point)
}

/// RSA public key structure
///
/// Represents RSAPublicKey as defined in RFC 3447:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Largest accepted RSA modulus (8192 bits)
const MAX_RSA_MODULUS_SIZE: usize = 1024;

/// Wrap a DER PKCS#1 `RSAPublicKey` in SubjectPublicKeyInfo
pub(crate) fn rsa_spki_from_pkcs1(pkcs1: &[u8]) -> Result<Vec<u8>> {
    let key = RsaPublicKey::from_der(pkcs1)
        .map_err(|e| key_error("invalid RSA public key", e))?;

    if key.modulus.as_bytes().len() > MAX_RSA_MODULUS_SIZE {
        return Err(key_error(
            "RSA modulus too large",
            format!(
                "{} bytes (maximum: {} bytes)",
                key.modulus.as_bytes().len(),
                MAX_RSA_MODULUS_SIZE
            ),
        ));
    }
    if key.public_exponent.as_bytes().is_empty() {
        return Err(key_error("invalid RSA public key", "empty exponent"));
    }

    let algorithm = AlgorithmIdentifierOwned {
        oid: RSA_ENCRYPTION_OID,
        parameters: Some(AnyRef::NULL.into()),
    };

    encode_spki(algorithm, pkcs1)
}

/// Identify the key type carried by a SubjectPublicKeyInfo document
pub(crate) fn spki_key_type(spki_der: &[u8]) -> Result<SpkiKeyType> {
    let spki = SubjectPublicKeyInfoRef::from_der(spki_der)
        .map_err(|e| key_error("failed to decode SPKI", e))?;

    let (oid, parameters) = spki
        .algorithm
        .oids()
        .map_err(|e| key_error("failed to decode SPKI algorithm", e))?;

    if oid == RSA_ENCRYPTION_OID {
        return Ok(SpkiKeyType::Rsa);
    }
    if oid != EC_PUBLIC_KEY_OID {
        return Err(key_error("unsupported public key algorithm", oid));
    }

    let curve_oid =
        parameters.ok_or_else(|| key_error("EC public key", "missing curve parameter"))?;
    EcdsaCurve::from_oid(curve_oid)
        .map(SpkiKeyType::Ecdsa)
        .ok_or_else(|| key_error("unsupported EC curve", curve_oid))
}
