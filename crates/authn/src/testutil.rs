//! Shared test utilities for authentication testing.
//!
//! This module provides helpers for minting HS256-signed tokens and crafting
//! raw token strings (for attack testing). It is feature-gated behind
//! `testutil` to prevent leaking into production builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! certiq-authn = { path = "../authn", features = ["testutil"] }
//! ```

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

/// Shared secret used across the test suites.
pub const TEST_SECRET: &[u8] = b"secretkey";

/// Creates a signed token for `subject` expiring `expires_in_secs` seconds
/// from now (negative values produce an already-expired token).
///
/// # Panics
///
/// Panics if token encoding fails (should not happen with valid inputs).
pub fn create_signed_token(secret: &[u8], subject: &str, expires_in_secs: i64) -> String {
    let exp = Utc::now().timestamp().saturating_add(expires_in_secs);
    let claims = json!({
        "sub": subject,
        "exp": exp,
        "iat": Utc::now().timestamp(),
    });
    create_token_with_claims(secret, &claims)
}

/// Creates a signed HS256 token from arbitrary claims JSON.
///
/// Useful for omitting or malforming individual claims.
///
/// # Panics
///
/// Panics if token encoding fails.
pub fn create_token_with_claims(secret: &[u8], claims: &serde_json::Value) -> String {
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret);
    jsonwebtoken::encode(&header, claims, &encoding_key).expect("failed to encode test token")
}

/// Creates a raw token string from arbitrary header and payload JSON.
///
/// The resulting token has the structure `{header_b64}.{payload_b64}.` with
/// an empty signature, for testing rejection of unsigned or
/// algorithm-confused tokens.
///
/// # Panics
///
/// Panics if JSON serialization fails.
pub fn craft_raw_token(header_json: &serde_json::Value, payload_json: &serde_json::Value) -> String {
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header_json).expect("header json"));
    let payload_b64 =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload_json).expect("payload json"));
    format!("{header_b64}.{payload_b64}.")
}

/// Asserts that a `Result<T, AuthError>` is an `Err` matching the given
/// [`AuthError`](crate::error::AuthError) variant.
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use certiq_authn::assert_auth_error;
/// use certiq_authn::error::AuthError;
///
/// let result: Result<(), AuthError> = Err(AuthError::token_expired());
/// assert_auth_error!(result, TokenExpired);
/// ```
#[macro_export]
macro_rules! assert_auth_error {
    ($result:expr, $variant:ident) => {
        assert!(
            matches!($result, Err($crate::error::AuthError::$variant { .. })),
            "expected AuthError::{}, got: {:?}",
            stringify!($variant),
            $result,
        );
    };
    ($result:expr, $variant:ident, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::AuthError::$variant { .. })),
            "{}: expected AuthError::{}, got: {:?}",
            $msg,
            stringify!($variant),
            $result,
        );
    };
}
