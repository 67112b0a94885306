//! A small JWT signing and verification engine.
//!
//! Tokens are signed with asymmetric keys (ECDSA P-256/P-384/P-521 or RSA
//! PKCS#1 v1.5) through `aws-lc-rs` and carried in the compact
//! `header.payload.signature` form.
//!
//! ```
//! use jwtseal::{
//!     AlgorithmType, ClaimsBuilder, SigningKey, TokenValidator, ValidationPolicy, encode,
//! };
//!
//! let key = SigningKey::generate(AlgorithmType::ES256, "key-1")?;
//!
//! let claims = ClaimsBuilder::new()
//!     .subject("example subject")?
//!     .audience("example audience")?
//!     .expiration(4_000_000_000)?
//!     .build();
//! let token = encode(&claims, &key)?.to_compact();
//!
//! let validator = TokenValidator::new(key.verification_key())
//!     .policy(ValidationPolicy::new().expected_audience("example audience"))
//!     .build();
//! let verified = validator.verify(&token)?;
//! assert_eq!(verified.subject()?, "example subject");
//! # Ok::<(), jwtseal::Error>(())
//! ```
//!
//! The library never logs and never panics on untrusted input; every
//! failure is an [`Error`] that can be classified with [`Error::kind`].

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod claims;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod header;
pub(crate) mod keys;
pub(crate) mod primitive;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod validator;

// Public Interface
pub use algorithm::AlgorithmType;
pub use claims::{ClaimValue, Claims, ClaimsBuilder, REGISTERED_CLAIMS, is_registered_claim};
pub use decoder::decode;
pub use encoder::{encode, encode_to_string};
pub use error::{Error, ErrorKind, Result};
pub use header::{JWT_TYPE, TokenHeader};
pub use keys::{SigningKey, VerificationKey, generate_pkcs8};
pub use primitive::{Signer, Verifier};
pub use token::Token;
pub use validator::{TokenValidator, ValidationPolicy, validate};

pub(crate) mod limits;
