//! Shared fixtures for integration tests

#![allow(dead_code)]

use jwtseal::{AlgorithmType, SigningKey};
use rsa::RsaPrivateKey;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed validation time used by deterministic tests
pub const NOW: i64 = 1_700_000_000;

/// RSA key material in every encoding the tests need
pub struct RsaFixture {
    pub pkcs8: Vec<u8>,
    pub pkcs1_private: Vec<u8>,
    pub pkcs1_public: Vec<u8>,
    pub spki: Vec<u8>,
}

/// 2048-bit RSA key, generated once per test binary
pub fn rsa_fixture() -> &'static RsaFixture {
    static FIXTURE: OnceLock<RsaFixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key");
        let public_key = private_key.to_public_key();

        RsaFixture {
            pkcs8: private_key
                .to_pkcs8_der()
                .expect("Failed to serialize to PKCS#8")
                .as_bytes()
                .to_vec(),
            pkcs1_private: private_key
                .to_pkcs1_der()
                .expect("Failed to serialize to PKCS#1")
                .as_bytes()
                .to_vec(),
            pkcs1_public: public_key
                .to_pkcs1_der()
                .expect("Failed to serialize public key to PKCS#1")
                .as_bytes()
                .to_vec(),
            spki: public_key
                .to_public_key_der()
                .expect("Failed to serialize public key to SPKI")
                .as_bytes()
                .to_vec(),
        }
    })
}

/// Signing key for any supported algorithm
pub fn signing_key(algorithm: AlgorithmType, key_id: &str) -> SigningKey {
    if algorithm.is_ecdsa() {
        SigningKey::generate(algorithm, key_id).expect("Failed to generate ECDSA key")
    } else {
        SigningKey::from_pkcs8_der(algorithm, key_id, &rsa_fixture().pkcs8)
            .expect("Failed to load RSA key")
    }
}

/// Current Unix timestamp
pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}
