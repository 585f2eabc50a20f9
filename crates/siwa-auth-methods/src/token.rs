//! Identity token payload decoding.
//!
//! **No signature verification happens here.** The payload segment of the
//! compact JWS is decoded and parsed for inspection only; nothing returned
//! by this module proves who the user is.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decode the payload segment of a compact JWS into a JSON object.
///
/// Empty segments are ignored when splitting on `.`; at least two must
/// remain. The second is translated from the URL-safe alphabet, padded to a
/// multiple of four and decoded as standard base64.
///
/// Returns `None` when there are too few segments, the base64 is invalid,
/// or the bytes are not a JSON object.
pub fn decode_payload(token: &str) -> Option<Map<String, Value>> {
    let segments: Vec<&str> = token.split('.').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }

    let mut encoded: String = segments[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - encoded.len() % 4) % 4;
    encoded.extend(std::iter::repeat('=').take(padding));

    let bytes = STANDARD.decode(encoded.as_bytes()).ok()?;
    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Decode the payload of `token` into [`TokenClaims`]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    decode_payload(token).map(TokenClaims::from_payload)
}

/// Claims read from an identity token payload.
///
/// Every field is optional: a claim that is missing or has an unexpected
/// JSON type is left as `None`. The full payload is kept in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer
    pub iss: Option<String>,
    /// Subject, the provider user id
    pub sub: Option<String>,
    /// Audience, the client id the token was issued to
    pub aud: Option<String>,
    /// Expiration, seconds since the Unix epoch
    pub exp: Option<i64>,
    /// Issued at, seconds since the Unix epoch
    pub iat: Option<i64>,
    /// Nonce digest echoed by the provider
    pub nonce: Option<String>,
    /// Email, possibly a private relay address
    pub email: Option<String>,
    /// Whether the provider verified the email
    pub email_verified: Option<bool>,
    /// Whether `email` is a private relay address
    pub is_private_email: Option<bool>,
    /// Decoded payload
    pub payload: Map<String, Value>,
}

impl TokenClaims {
    /// Build claims from a decoded payload
    pub fn from_payload(payload: Map<String, Value>) -> Self {
        let string = |name: &str| payload.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            iss: string("iss"),
            sub: string("sub"),
            aud: string("aud"),
            exp: payload.get("exp").and_then(seconds),
            iat: payload.get("iat").and_then(seconds),
            nonce: string("nonce"),
            email: string("email"),
            email_verified: payload.get("email_verified").and_then(flag),
            is_private_email: payload.get("is_private_email").and_then(flag),
            payload,
        }
    }

    /// Expiration as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
    }

    /// Whether the token expired at or before `now` (Unix seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= now)
    }
}

/// Seconds from an integer or floating JSON number
fn seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// Apple sends boolean claims either as JSON booleans or as "true"/"false"
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
