//! Signature primitive seam
//!
//! The encoder and validator never touch key material directly. They go
//! through these two traits, which [`SigningKey`](crate::SigningKey) and
//! [`VerificationKey`](crate::VerificationKey) implement on top of `aws-lc-rs`.
//! Other backends (hardware tokens, remote signers) plug in by implementing
//! them as well.

use crate::algorithm::AlgorithmType;
use crate::error::Result;

/// Produces signatures over a JWT signing input
pub trait Signer {
    /// Algorithm written to the `alg` header
    fn algorithm(&self) -> AlgorithmType;

    /// Key identifier written to the `kid` header
    fn key_id(&self) -> &str;

    /// Sign `message`, returning the raw JWS signature bytes
    ///
    /// ECDSA signatures must use the fixed-length `R||S` encoding.
    /// Any failure must be reported as an error, never as a truncated signature.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Checks signatures over a JWT signing input
pub trait Verifier {
    /// Algorithm this key verifies
    fn algorithm(&self) -> AlgorithmType;

    /// Identifier of the key pair
    fn key_id(&self) -> &str;

    /// Whether `signature` authenticates `message`
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;
}

impl<T: Signer + ?Sized> Signer for &T {
    fn algorithm(&self) -> AlgorithmType {
        (**self).algorithm()
    }

    fn key_id(&self) -> &str {
        (**self).key_id()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(message)
    }
}

impl<T: Verifier + ?Sized> Verifier for &T {
    fn algorithm(&self) -> AlgorithmType {
        (**self).algorithm()
    }

    fn key_id(&self) -> &str {
        (**self).key_id()
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        (**self).verify(message, signature)
    }
}
