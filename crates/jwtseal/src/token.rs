//! Signed token representation
//!
//! A [`Token`] is the ordered triple of header, payload and signature bytes.
//! It is immutable once built: the encoder produces one after signing, the
//! decoder produces one from a compact string, and the validator turns it
//! into trusted [`Claims`].

use crate::claims::Claims;
use crate::error::Result;
use crate::header::TokenHeader;
use crate::utils::{base64url, json};

/// Signed JWT in decoded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    header: TokenHeader,
    header_bytes: Vec<u8>,
    payload_bytes: Vec<u8>,
    signature: Vec<u8>,
}

impl Token {
    pub(crate) fn new(
        header: TokenHeader,
        header_bytes: Vec<u8>,
        payload_bytes: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            header,
            header_bytes,
            payload_bytes,
            signature,
        }
    }

    /// Assemble a token from raw decoded segments
    ///
    /// Only the header is parsed here. The payload is not inspected until
    /// the token is validated, after its signature has been checked.
    pub fn from_parts(header: &[u8], payload: &[u8], signature: &[u8]) -> Result<Self> {
        let parsed = TokenHeader::from_json(header)?;
        Ok(Self::new(
            parsed,
            header.to_vec(),
            payload.to_vec(),
            signature.to_vec(),
        ))
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Raw header JSON bytes
    pub fn header_bytes(&self) -> &[u8] {
        &self.header_bytes
    }

    /// Raw payload JSON bytes
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload_bytes
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The bytes covered by the signature: `b64url(header).b64url(payload)`
    pub fn signing_input(&self) -> String {
        signing_input(&self.header_bytes, &self.payload_bytes)
    }

    /// Compact serialization `header.payload.signature`
    pub fn to_compact(&self) -> String {
        let mut compact = self.signing_input();
        compact.push('.');
        compact.push_str(&base64url::encode_bytes(&self.signature));
        compact
    }

    /// Parse the payload without checking the signature
    ///
    /// The returned claims are attacker controlled. Use them only for
    /// inspection or routing, never for authorization.
    pub fn danger_unverified_claims(&self) -> Result<Claims> {
        parse_claims(&self.payload_bytes)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_compact())
    }
}

impl std::str::FromStr for Token {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::decoder::decode(s)
    }
}

pub(crate) fn signing_input(header: &[u8], payload: &[u8]) -> String {
    let mut input = base64url::encode_bytes(header);
    input.push('.');
    input.push_str(&base64url::encode_bytes(payload));
    input
}

/// Parse a payload segment into claims
pub(crate) fn parse_claims(payload: &[u8]) -> Result<Claims> {
    let object = json::parse_object(payload, "payload")?;
    Claims::from_json_object(&object)
}
