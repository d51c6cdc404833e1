//! Token claims and payload decoding.
//!
//! This module provides the [`TokenClaims`] structure plus two decode paths:
//! a full signature-verifying decode (used by the gate) lives in
//! [`crate::gate`]; here are the cheap, signature-independent decodes used to
//! inspect the header and the expiry claim.
//!
//! # Example
//!
//! ```no_run
//! // Requires a structurally valid JWT string.
//! use certiq_authn::claims::{decode_claims_unverified, decode_token_header};
//!
//! # fn example(token: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let header = decode_token_header(token)?;
//! let claims = decode_claims_unverified(token)?;
//!
//! println!("algorithm: {:?}", header.alg);
//! println!("expires at: {}", claims.exp);
//! # Ok(())
//! # }
//! ```

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Header, decode_header};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried by a registry bearer token.
///
/// The token contract requires at least a subject and an expiry:
///
/// ```json
/// {
///   "sub": "<subjectId>",
///   "exp": 1234567890,
///   "iat": 1234567800
/// }
/// ```
///
/// `exp` and `iat` are Unix seconds. Unknown claims are ignored on decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier of the authenticated party.
    ///
    /// Optional at the decode layer; [`require_subject`](Self::require_subject)
    /// enforces presence where the gate needs it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (seconds since epoch).
    pub exp: u64,
    /// Issued at (optional, seconds since epoch).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

impl TokenClaims {
    /// Require the subject identifier, returning an error if absent or empty.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingClaim` if the `sub` claim is missing or
    /// empty.
    pub fn require_subject(&self) -> Result<String, AuthError> {
        self.sub
            .as_ref()
            .filter(|subject| !subject.is_empty())
            .cloned()
            .ok_or_else(|| AuthError::missing_claim("sub"))
    }

    /// Whether the token is expired at the given instant.
    ///
    /// The expiry claim is scaled to milliseconds (`exp * 1000`) and compared
    /// against the wall clock; a zero or negative remaining delta counts as
    /// expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let expires_at_ms = i128::from(self.exp) * 1000;
        expires_at_ms - i128::from(now.timestamp_millis()) <= 0
    }
}

/// Decode a token header without verification.
///
/// # Errors
///
/// Returns an error if the token header cannot be decoded.
pub fn decode_token_header(token: &str) -> Result<Header, AuthError> {
    decode_header(token)
        .map_err(|e| AuthError::invalid_token_format(format!("failed to decode header: {}", e)))
}

/// Decode token claims without verifying the signature.
///
/// This is the cheap second decode the gate uses for the expiry check; it
/// must never be treated as proof of authenticity on its own.
///
/// # Errors
///
/// Returns an error if:
/// - The token does not have exactly 3 dot-separated parts
/// - The payload cannot be base64-decoded
/// - The payload cannot be parsed as JSON carrying an `exp` claim
pub fn decode_claims_unverified(token: &str) -> Result<TokenClaims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::invalid_token_format("token must have 3 parts separated by dots"));
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::invalid_token_format(format!("failed to decode payload: {}", e)))?;

    let claims: TokenClaims = serde_json::from_slice(&payload_bytes)
        .map_err(|e| AuthError::invalid_token_format(format!("failed to parse claims: {}", e)))?;

    Ok(claims)
}
