//! Claims model for JWT payloads
//!
//! [`Claims`] is the immutable set of assertions a token carries. Registered
//! claims (`iss`, `sub`, `aud`, `exp`, `nbf`, `iat`, `jti`) are stored typed;
//! everything else is a custom claim holding a [`ClaimValue`]. Claims are
//! assembled with [`ClaimsBuilder`], which type-checks registered claims as
//! they are set and refuses to silently overwrite an existing claim.

use crate::error::{Error, Result};
use crate::limits::{MAX_CLAIM_DEPTH, MAX_CLAIM_STRING_LENGTH};
use crate::utils::bounds::{validate_claim_string, validate_timestamp_bounds};
use crate::utils::json::{number_to_f64, write_member_name, write_number, write_string};

use miniserde::json::{Number, Object, Value};
use std::collections::BTreeMap;

/// Issuer claim name
pub const ISSUER: &str = "iss";
/// Subject claim name
pub const SUBJECT: &str = "sub";
/// Audience claim name
pub const AUDIENCE: &str = "aud";
/// Expiration time claim name
pub const EXPIRATION: &str = "exp";
/// Not-before claim name
pub const NOT_BEFORE: &str = "nbf";
/// Issued-at claim name
pub const ISSUED_AT: &str = "iat";
/// JWT ID claim name
pub const JWT_ID: &str = "jti";

/// Registered claim names in serialization order
pub const REGISTERED_CLAIMS: [&str; 7] = [
    ISSUER, SUBJECT, AUDIENCE, EXPIRATION, NOT_BEFORE, ISSUED_AT, JWT_ID,
];

/// Whether `name` is one of the registered claim names
pub fn is_registered_claim(name: &str) -> bool {
    REGISTERED_CLAIMS.contains(&name)
}

// ============================================================================
// Claim values
// ============================================================================

/// Value of a single claim
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    /// Finite JSON number
    Number(f64),
    String(String),
    /// Unix seconds, only valid for `exp`, `nbf` and `iat`
    ///
    /// Custom claims reject this variant with [`Error::ClaimInvalidType`].
    /// A timestamp is a plain number on the wire and parses back as
    /// [`ClaimValue::Number`], so store custom times as `Number` instead.
    Timestamp(i64),
    Array(Vec<ClaimValue>),
    /// JSON object, serialized with sorted keys
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::Null => "null",
            ClaimValue::Bool(_) => "bool",
            ClaimValue::Number(_) => "number",
            ClaimValue::String(_) => "string",
            ClaimValue::Timestamp(_) => "timestamp",
            ClaimValue::Array(_) => "array",
            ClaimValue::Object(_) => "object",
        }
    }

    pub(crate) fn write_json(&self, out: &mut String) {
        match self {
            ClaimValue::Null => out.push_str("null"),
            ClaimValue::Bool(true) => out.push_str("true"),
            ClaimValue::Bool(false) => out.push_str("false"),
            ClaimValue::Number(n) => write_number(out, *n),
            ClaimValue::String(s) => write_string(out, s),
            ClaimValue::Timestamp(t) => out.push_str(&t.to_string()),
            ClaimValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_json(out);
                }
                out.push(']');
            }
            ClaimValue::Object(members) => {
                out.push('{');
                let mut first = true;
                for (name, value) in members {
                    write_member_name(out, name, &mut first);
                    value.write_json(out);
                }
                out.push('}');
            }
        }
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }

    fn from_json(value: &Value, depth: usize) -> Result<Self> {
        if depth > MAX_CLAIM_DEPTH {
            return Err(Error::FormatInvalidJson(format!(
                "claim nesting exceeds {MAX_CLAIM_DEPTH} levels"
            )));
        }

        Ok(match value {
            Value::Null => ClaimValue::Null,
            Value::Bool(b) => ClaimValue::Bool(*b),
            Value::Number(n) => ClaimValue::Number(number_to_f64(n)),
            Value::String(s) => ClaimValue::String(s.clone()),
            Value::Array(items) => ClaimValue::Array(
                items
                    .iter()
                    .map(|item| Self::from_json(item, depth + 1))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(members) => ClaimValue::Object(
                members
                    .iter()
                    .map(|(name, item)| {
                        Self::from_json(item, depth + 1).map(|value| (name.clone(), value))
                    })
                    .collect::<Result<_>>()?,
            ),
        })
    }

    /// Check that a value may be stored as a custom claim
    fn check_custom(&self, claim: &str, depth: usize) -> Result<()> {
        let invalid = |expected: &str| Error::ClaimInvalidType {
            claim: claim.into(),
            expected: expected.into(),
        };

        if depth > MAX_CLAIM_DEPTH {
            return Err(invalid("value nested at most 32 levels deep"));
        }

        match self {
            ClaimValue::Timestamp(_) => Err(invalid(
                "a non-timestamp value (timestamps are reserved for exp, nbf and iat)",
            )),
            ClaimValue::Number(n) if !n.is_finite() => Err(invalid("a finite number")),
            ClaimValue::Array(items) => items
                .iter()
                .try_for_each(|item| item.check_custom(claim, depth + 1)),
            ClaimValue::Object(members) => members
                .values()
                .try_for_each(|item| item.check_custom(claim, depth + 1)),
            _ => Ok(()),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Number(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Number(f64::from(value))
    }
}

impl From<Vec<ClaimValue>> for ClaimValue {
    fn from(value: Vec<ClaimValue>) -> Self {
        ClaimValue::Array(value)
    }
}

impl From<BTreeMap<String, ClaimValue>> for ClaimValue {
    fn from(value: BTreeMap<String, ClaimValue>) -> Self {
        ClaimValue::Object(value)
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Set of claims carried by a token
///
/// Presence is explicit: an absent claim is different from one set to
/// `false`, `0` or an empty string. Equality compares claim-for-claim and
/// ignores the order of custom claims.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<Vec<String>>,
    expiration: Option<i64>,
    not_before: Option<i64>,
    issued_at: Option<i64>,
    jwt_id: Option<String>,
    custom: Vec<(String, ClaimValue)>,
}

impl PartialEq for Claims {
    fn eq(&self, other: &Self) -> bool {
        self.issuer == other.issuer
            && self.subject == other.subject
            && self.audience == other.audience
            && self.expiration == other.expiration
            && self.not_before == other.not_before
            && self.issued_at == other.issued_at
            && self.jwt_id == other.jwt_id
            && self.custom.len() == other.custom.len()
            && self
                .custom
                .iter()
                .all(|(name, value)| other.custom_value(name) == Some(value))
    }
}

fn not_present(name: &str) -> Error {
    Error::ClaimNotPresent(name.into())
}

impl Claims {
    /// Start building a new set of claims
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Result<&str> {
        self.issuer.as_deref().ok_or_else(|| not_present(ISSUER))
    }

    /// Subject (sub)
    pub fn subject(&self) -> Result<&str> {
        self.subject.as_deref().ok_or_else(|| not_present(SUBJECT))
    }

    /// Audience (aud) as a set of recipients
    pub fn audiences(&self) -> Result<&[String]> {
        self.audience
            .as_deref()
            .ok_or_else(|| not_present(AUDIENCE))
    }

    /// Expiration time (exp), Unix seconds
    pub fn expiration(&self) -> Result<i64> {
        self.expiration.ok_or_else(|| not_present(EXPIRATION))
    }

    /// Not-before time (nbf), Unix seconds
    pub fn not_before(&self) -> Result<i64> {
        self.not_before.ok_or_else(|| not_present(NOT_BEFORE))
    }

    /// Issued-at time (iat), Unix seconds
    pub fn issued_at(&self) -> Result<i64> {
        self.issued_at.ok_or_else(|| not_present(ISSUED_AT))
    }

    /// JWT ID (jti)
    pub fn jwt_id(&self) -> Result<&str> {
        self.jwt_id.as_deref().ok_or_else(|| not_present(JWT_ID))
    }

    pub fn has_issuer(&self) -> bool {
        self.issuer.is_some()
    }

    pub fn has_subject(&self) -> bool {
        self.subject.is_some()
    }

    pub fn has_audience(&self) -> bool {
        self.audience.is_some()
    }

    pub fn has_expiration(&self) -> bool {
        self.expiration.is_some()
    }

    pub fn has_not_before(&self) -> bool {
        self.not_before.is_some()
    }

    pub fn has_issued_at(&self) -> bool {
        self.issued_at.is_some()
    }

    pub fn has_jwt_id(&self) -> bool {
        self.jwt_id.is_some()
    }

    /// Whether `audience` is one of the token's recipients
    pub fn contains_audience(&self, audience: &str) -> bool {
        self.audience
            .as_ref()
            .is_some_and(|set| set.iter().any(|member| member == audience))
    }

    /// Whether a claim with this name is present
    pub fn has_claim(&self, name: &str) -> bool {
        match name {
            ISSUER => self.has_issuer(),
            SUBJECT => self.has_subject(),
            AUDIENCE => self.has_audience(),
            EXPIRATION => self.has_expiration(),
            NOT_BEFORE => self.has_not_before(),
            ISSUED_AT => self.has_issued_at(),
            JWT_ID => self.has_jwt_id(),
            _ => self.custom_value(name).is_some(),
        }
    }

    /// Look up any claim by name
    ///
    /// Registered time claims are returned as [`ClaimValue::Timestamp`]; an
    /// audience with one member is returned as a string, otherwise as an array.
    pub fn claim(&self, name: &str) -> Result<ClaimValue> {
        let value = match name {
            ISSUER => self.issuer.clone().map(ClaimValue::String),
            SUBJECT => self.subject.clone().map(ClaimValue::String),
            AUDIENCE => self.audience.as_deref().map(audience_value),
            EXPIRATION => self.expiration.map(ClaimValue::Timestamp),
            NOT_BEFORE => self.not_before.map(ClaimValue::Timestamp),
            ISSUED_AT => self.issued_at.map(ClaimValue::Timestamp),
            JWT_ID => self.jwt_id.clone().map(ClaimValue::String),
            _ => self.custom_value(name).cloned(),
        };
        value.ok_or_else(|| not_present(name))
    }

    /// Names of custom claims in insertion order
    pub fn custom_claim_names(&self) -> impl Iterator<Item = &str> {
        self.custom.iter().map(|(name, _)| name.as_str())
    }

    fn custom_value(&self, name: &str) -> Option<&ClaimValue> {
        self.custom
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Look up a custom claim for a typed getter
    fn custom_typed(&self, name: &str) -> Result<&ClaimValue> {
        if is_registered_claim(name) {
            return Err(Error::ClaimInvalidType {
                claim: name.into(),
                expected: "a custom claim (use the registered claim getter)".into(),
            });
        }
        self.custom_value(name).ok_or_else(|| not_present(name))
    }

    /// Custom claim holding a string
    pub fn string_claim(&self, name: &str) -> Result<&str> {
        match self.custom_typed(name)? {
            ClaimValue::String(s) => Ok(s),
            other => Err(wrong_type(name, "string", other)),
        }
    }

    /// Custom claim holding a number
    pub fn number_claim(&self, name: &str) -> Result<f64> {
        match self.custom_typed(name)? {
            ClaimValue::Number(n) => Ok(*n),
            other => Err(wrong_type(name, "number", other)),
        }
    }

    /// Custom claim holding a boolean
    pub fn bool_claim(&self, name: &str) -> Result<bool> {
        match self.custom_typed(name)? {
            ClaimValue::Bool(b) => Ok(*b),
            other => Err(wrong_type(name, "bool", other)),
        }
    }

    /// Custom claim holding an array
    pub fn array_claim(&self, name: &str) -> Result<&[ClaimValue]> {
        match self.custom_typed(name)? {
            ClaimValue::Array(items) => Ok(items),
            other => Err(wrong_type(name, "array", other)),
        }
    }

    /// Custom claim holding an object
    pub fn object_claim(&self, name: &str) -> Result<&BTreeMap<String, ClaimValue>> {
        match self.custom_typed(name)? {
            ClaimValue::Object(members) => Ok(members),
            other => Err(wrong_type(name, "object", other)),
        }
    }

    /// Whether a custom claim is present and explicitly `null`
    pub fn is_null_claim(&self, name: &str) -> Result<bool> {
        Ok(matches!(self.custom_typed(name)?, ClaimValue::Null))
    }

    /// Serialize to the canonical payload JSON
    ///
    /// Registered claims come first in a fixed order, followed by custom
    /// claims in insertion order.
    pub fn to_json(&self) -> String {
        let mut out = String::from("{");
        let mut first = true;

        let mut string_member = |out: &mut String, name: &str, value: &Option<String>| {
            if let Some(value) = value {
                write_member_name(out, name, &mut first);
                write_string(out, value);
            }
        };
        string_member(&mut out, ISSUER, &self.issuer);
        string_member(&mut out, SUBJECT, &self.subject);

        if let Some(audience) = &self.audience {
            write_member_name(&mut out, AUDIENCE, &mut first);
            audience_value(audience).write_json(&mut out);
        }

        for (name, value) in [
            (EXPIRATION, self.expiration),
            (NOT_BEFORE, self.not_before),
            (ISSUED_AT, self.issued_at),
        ] {
            if let Some(timestamp) = value {
                write_member_name(&mut out, name, &mut first);
                out.push_str(&timestamp.to_string());
            }
        }

        if let Some(jwt_id) = &self.jwt_id {
            write_member_name(&mut out, JWT_ID, &mut first);
            write_string(&mut out, jwt_id);
        }

        for (name, value) in &self.custom {
            write_member_name(&mut out, name, &mut first);
            value.write_json(&mut out);
        }

        out.push('}');
        out
    }

    /// Rebuild claims from a parsed payload object
    pub(crate) fn from_json_object(object: &Object) -> Result<Self> {
        let mut claims = Claims::default();

        for (name, value) in object.iter() {
            match name.as_str() {
                ISSUER => claims.issuer = Some(registered_string(name, value)?),
                SUBJECT => claims.subject = Some(registered_string(name, value)?),
                JWT_ID => claims.jwt_id = Some(registered_string(name, value)?),
                AUDIENCE => claims.audience = Some(registered_audience(value)?),
                EXPIRATION => claims.expiration = Some(registered_timestamp(name, value)?),
                NOT_BEFORE => claims.not_before = Some(registered_timestamp(name, value)?),
                ISSUED_AT => claims.issued_at = Some(registered_timestamp(name, value)?),
                _ => claims
                    .custom
                    .push((name.clone(), ClaimValue::from_json(value, 1)?)),
            }
        }

        Ok(claims)
    }
}

fn wrong_type(claim: &str, expected: &'static str, found: &ClaimValue) -> Error {
    Error::ClaimWrongType {
        claim: claim.into(),
        expected,
        found: found.type_name(),
    }
}

fn audience_value(audience: &[String]) -> ClaimValue {
    match audience {
        [single] => ClaimValue::String(single.clone()),
        many => ClaimValue::Array(many.iter().cloned().map(ClaimValue::String).collect()),
    }
}

fn invalid_type(claim: &str, expected: &str) -> Error {
    Error::ClaimInvalidType {
        claim: claim.into(),
        expected: expected.into(),
    }
}

fn registered_string(claim: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => {
            validate_claim_string(claim, s, MAX_CLAIM_STRING_LENGTH)?;
            Ok(s.clone())
        }
        _ => Err(invalid_type(claim, "string")),
    }
}

fn registered_audience(value: &Value) -> Result<Vec<String>> {
    let mut audience = Vec::new();
    match value {
        Value::String(s) => push_audience(&mut audience, s)?,
        Value::Array(items) if !items.is_empty() => {
            for item in items.iter() {
                match item {
                    Value::String(s) => push_audience(&mut audience, s)?,
                    _ => return Err(invalid_type(AUDIENCE, AUDIENCE_EXPECTED)),
                }
            }
        }
        _ => return Err(invalid_type(AUDIENCE, AUDIENCE_EXPECTED)),
    }
    Ok(audience)
}

const AUDIENCE_EXPECTED: &str = "string or non-empty array of strings";

/// Add a member to the audience set, skipping duplicates
fn push_audience(audience: &mut Vec<String>, member: &str) -> Result<()> {
    validate_claim_string(AUDIENCE, member, MAX_CLAIM_STRING_LENGTH)?;
    if !audience.iter().any(|existing| existing == member) {
        audience.push(member.to_string());
    }
    Ok(())
}

fn registered_timestamp(claim: &str, value: &Value) -> Result<i64> {
    let out_of_range = |value: i64| Error::TimestampOutOfBounds {
        value,
        min: crate::limits::MIN_TIMESTAMP,
        max: crate::limits::MAX_TIMESTAMP,
    };

    let timestamp = match value {
        Value::Number(Number::U64(n)) => i64::try_from(*n).map_err(|_| out_of_range(i64::MAX))?,
        Value::Number(Number::I64(n)) => *n,
        Value::Number(Number::F64(n)) if n.is_finite() => {
            let floored = n.floor();
            if floored < i64::MIN as f64 || floored >= i64::MAX as f64 {
                return Err(out_of_range(if floored < 0.0 { i64::MIN } else { i64::MAX }));
            }
            floored as i64
        }
        _ => return Err(invalid_type(claim, "number")),
    };

    validate_timestamp_bounds(timestamp)?;
    Ok(timestamp)
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable builder for [`Claims`]
///
/// Setters return `Result<&mut Self>` so they chain with `?`:
///
/// ```
/// use jwtseal::ClaimsBuilder;
///
/// let claims = ClaimsBuilder::new()
///     .subject("user-1")?
///     .audience("api")?
///     .expiration(1_900_000_000)?
///     .build();
/// assert_eq!(claims.subject()?, "user-1");
/// # Ok::<(), jwtseal::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim that is not yet present
    ///
    /// Registered claims are type-checked: `iss`, `sub` and `jti` take a
    /// string, `aud` a string or non-empty array of strings, and `exp`, `nbf`
    /// and `iat` a [`ClaimValue::Timestamp`] within bounds. Custom claims may
    /// hold anything except timestamps and non-finite numbers.
    pub fn set_claim(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if self.claims.has_claim(&name) {
            return Err(Error::ClaimAlreadySet(name));
        }
        self.insert(name, value.into())?;
        Ok(self)
    }

    /// Set a claim, replacing any existing value
    pub fn replace_claim(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Result<&mut Self> {
        let name = name.into();
        let value = value.into();

        // Validate against a scratch copy so a rejected value keeps the old one
        let mut scratch = self.clone();
        scratch.remove_claim(&name);
        scratch.insert(name, value)?;
        *self = scratch;
        Ok(self)
    }

    /// Remove a claim if present
    pub fn remove_claim(&mut self, name: &str) -> &mut Self {
        let claims = &mut self.claims;
        match name {
            ISSUER => claims.issuer = None,
            SUBJECT => claims.subject = None,
            AUDIENCE => claims.audience = None,
            EXPIRATION => claims.expiration = None,
            NOT_BEFORE => claims.not_before = None,
            ISSUED_AT => claims.issued_at = None,
            JWT_ID => claims.jwt_id = None,
            _ => claims.custom.retain(|(existing, _)| existing != name),
        }
        self
    }

    /// Whether a claim with this name has been set
    pub fn has_claim(&self, name: &str) -> bool {
        self.claims.has_claim(name)
    }

    pub fn issuer(&mut self, issuer: impl Into<String>) -> Result<&mut Self> {
        self.set_claim(ISSUER, issuer.into())
    }

    pub fn subject(&mut self, subject: impl Into<String>) -> Result<&mut Self> {
        self.set_claim(SUBJECT, subject.into())
    }

    /// Set a single intended recipient
    pub fn audience(&mut self, audience: impl Into<String>) -> Result<&mut Self> {
        self.set_claim(AUDIENCE, audience.into())
    }

    /// Set several intended recipients
    pub fn audiences<I, S>(&mut self, audiences: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = audiences
            .into_iter()
            .map(|member| ClaimValue::String(member.into()))
            .collect::<Vec<_>>();
        self.set_claim(AUDIENCE, members)
    }

    pub fn expiration(&mut self, timestamp: i64) -> Result<&mut Self> {
        self.set_claim(EXPIRATION, ClaimValue::Timestamp(timestamp))
    }

    pub fn not_before(&mut self, timestamp: i64) -> Result<&mut Self> {
        self.set_claim(NOT_BEFORE, ClaimValue::Timestamp(timestamp))
    }

    pub fn issued_at(&mut self, timestamp: i64) -> Result<&mut Self> {
        self.set_claim(ISSUED_AT, ClaimValue::Timestamp(timestamp))
    }

    pub fn jwt_id(&mut self, jwt_id: impl Into<String>) -> Result<&mut Self> {
        self.set_claim(JWT_ID, jwt_id.into())
    }

    /// Snapshot the claims built so far
    pub fn build(&self) -> Claims {
        self.claims.clone()
    }

    fn insert(&mut self, name: String, value: ClaimValue) -> Result<()> {
        let claims = &mut self.claims;
        match name.as_str() {
            ISSUER => claims.issuer = Some(string_value(ISSUER, value)?),
            SUBJECT => claims.subject = Some(string_value(SUBJECT, value)?),
            JWT_ID => claims.jwt_id = Some(string_value(JWT_ID, value)?),
            AUDIENCE => claims.audience = Some(audience_from_value(value)?),
            EXPIRATION => claims.expiration = Some(timestamp_value(EXPIRATION, value)?),
            NOT_BEFORE => claims.not_before = Some(timestamp_value(NOT_BEFORE, value)?),
            ISSUED_AT => claims.issued_at = Some(timestamp_value(ISSUED_AT, value)?),
            _ => {
                value.check_custom(&name, 1)?;
                claims.custom.push((name, value));
            }
        }
        Ok(())
    }
}

fn string_value(claim: &str, value: ClaimValue) -> Result<String> {
    match value {
        ClaimValue::String(s) => {
            validate_claim_string(claim, &s, MAX_CLAIM_STRING_LENGTH)?;
            Ok(s)
        }
        _ => Err(invalid_type(claim, "string")),
    }
}

fn audience_from_value(value: ClaimValue) -> Result<Vec<String>> {
    let mut audience = Vec::new();
    match value {
        ClaimValue::String(s) => push_audience(&mut audience, &s)?,
        ClaimValue::Array(items) if !items.is_empty() => {
            for item in items {
                match item {
                    ClaimValue::String(s) => push_audience(&mut audience, &s)?,
                    _ => return Err(invalid_type(AUDIENCE, AUDIENCE_EXPECTED)),
                }
            }
        }
        _ => return Err(invalid_type(AUDIENCE, AUDIENCE_EXPECTED)),
    }
    Ok(audience)
}

fn timestamp_value(claim: &str, value: ClaimValue) -> Result<i64> {
    match value {
        ClaimValue::Timestamp(t) => {
            validate_timestamp_bounds(t)?;
            Ok(t)
        }
        _ => Err(invalid_type(claim, "timestamp")),
    }
}
