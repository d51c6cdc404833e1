//! The access gate.
//!
//! [`AccessGate`] guards every protected registry operation: it extracts the
//! bearer token from the raw authorization header, validates it against the
//! shared secret, and either rejects the request or produces an
//! [`AuthenticatedContext`] for the operation to carry.
//!
//! The gate is fully stateless. Verification is synchronous CPU-bound work
//! with no suspension points, so callers in async code invoke it directly
//! before their first await.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use zeroize::Zeroizing;

use crate::{
    claims::{TokenClaims, decode_claims_unverified, decode_token_header},
    error::AuthError,
    validation::validate_algorithm,
};

/// Token literal browsers send when no credential is stored client-side.
///
/// Clients that read a missing credential out of local storage serialize it
/// as the string `"null"`; the gate treats it the same as an absent token.
pub const NULL_TOKEN_SENTINEL: &str = "null";

/// Request-scoped identity produced by a successful authentication.
///
/// Carries the verified subject for downstream use (audit logging; no
/// ownership checks are performed in the current scope). It is created per
/// request and never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedContext {
    /// The verified subject identifier from the credential's `sub` claim.
    pub subject: String,
}

/// Stateless guard validating bearer credentials against a shared secret.
///
/// The secret is captured once at construction — process-wide immutable
/// configuration, never mutated afterwards — and scrubbed from memory when
/// the gate is dropped.
///
/// # Example
///
/// ```
/// use certiq_authn::{AccessGate, AuthError};
///
/// let gate = AccessGate::new(b"shared-secret");
///
/// let result = gate.authenticate(Some("Bearer null"));
/// assert!(matches!(result, Err(AuthError::NullToken)));
/// ```
pub struct AccessGate {
    decoding_key: DecodingKey,
    validation: Validation,
    // Retained only so the secret bytes are zeroized on drop.
    _secret: Zeroizing<Vec<u8>>,
}

impl AccessGate {
    /// Creates a gate verifying against the given shared secret.
    ///
    /// Expiry validation inside the verification step is disabled: the gate
    /// performs its own expiry check (see [`authenticate`](Self::authenticate))
    /// so that the expired case is reported distinctly.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let secret = Zeroizing::new(secret.to_vec());
        let decoding_key = DecodingKey::from_secret(&secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self { decoding_key, validation, _secret: secret }
    }

    /// Authenticate the raw value of a request's authorization header.
    ///
    /// Validation steps, each a rejection point, evaluated in order:
    ///
    /// 1. Absent header → [`AuthError::MissingCredentials`]
    /// 2. No token word after the scheme → [`AuthError::InvalidTokenFormat`]
    /// 3. Empty or `"null"` sentinel token → [`AuthError::NullToken`]
    /// 4. Algorithm outside the accepted list → [`AuthError::UnsupportedAlgorithm`]
    /// 5. Signature failure or structural damage → [`AuthError::InvalidSignature`] /
    ///    [`AuthError::InvalidTokenFormat`]
    /// 6. Expiry claim at or before now → [`AuthError::TokenExpired`]
    /// 7. Missing/empty subject claim → [`AuthError::MissingClaim`]
    ///
    /// The scheme word itself is not inspected: the token is whatever follows
    /// the first space. The expiry check reads `exp` from a second,
    /// signature-independent decode and compares `exp * 1000` milliseconds
    /// against the wall clock; it is only decisive once the signature has
    /// already passed.
    ///
    /// # Errors
    ///
    /// Every failure is an [`AuthError`] and is terminal for the request —
    /// there is no retry and no partial success. Verification failures are
    /// never surfaced as server errors.
    #[tracing::instrument(skip_all)]
    pub fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedContext, AuthError> {
        let header = authorization.ok_or_else(AuthError::missing_credentials)?;
        let token = bearer_token(header)?;

        if token.is_empty() || token == NULL_TOKEN_SENTINEL {
            return Err(AuthError::null_token());
        }

        let token_header = decode_token_header(token)?;
        validate_algorithm(&format!("{:?}", token_header.alg))?;

        let claims = self.verify_signature(token)?;

        // Redundant with verification-time expiry checking by contract; kept
        // as a separate unverified decode so the expired case stays distinct.
        let unverified = decode_claims_unverified(token)?;
        if unverified.is_expired_at(Utc::now()) {
            tracing::warn!("credential rejected: token expired");
            return Err(AuthError::token_expired());
        }

        let subject = claims.require_subject()?;
        tracing::debug!(subject = %subject, "credential verified");

        Ok(AuthenticatedContext { subject })
    }

    /// Verify the token signature against the shared secret.
    fn verify_signature(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Extract the token literal from an authorization header value.
///
/// The token is the second space-separated word; the scheme word is not
/// validated.
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .split(' ')
        .nth(1)
        .ok_or_else(|| AuthError::invalid_token_format("authorization header carries no token"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::{
        assert_auth_error,
        testutil::{TEST_SECRET, craft_raw_token, create_signed_token},
    };

    fn gate() -> AccessGate {
        AccessGate::new(TEST_SECRET)
    }

    #[test]
    fn test_absent_header_rejected() {
        assert_auth_error!(gate().authenticate(None), MissingCredentials);
    }

    #[test]
    fn test_header_without_token_rejected() {
        assert_auth_error!(gate().authenticate(Some("Bearer")), InvalidTokenFormat);
    }

    #[test]
    fn test_null_sentinel_rejected() {
        assert_auth_error!(gate().authenticate(Some("Bearer null")), NullToken);
    }

    #[test]
    fn test_empty_token_rejected_as_sentinel() {
        // "Bearer  x" splits to an empty second word.
        assert_auth_error!(gate().authenticate(Some("Bearer  x")), NullToken);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert_auth_error!(gate().authenticate(Some("Bearer not-a-token")), InvalidTokenFormat);
    }

    #[test]
    fn test_valid_token_round_trips_subject() {
        let token = create_signed_token(TEST_SECRET, "inspector-7", 3600);
        let ctx = gate().authenticate(Some(&format!("Bearer {token}"))).expect("authenticate");
        assert_eq!(ctx.subject, "inspector-7");
    }

    #[test]
    fn test_scheme_word_is_not_inspected() {
        let token = create_signed_token(TEST_SECRET, "inspector-7", 3600);
        let ctx = gate().authenticate(Some(&format!("Token {token}"))).expect("authenticate");
        assert_eq!(ctx.subject, "inspector-7");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_signed_token(b"a-different-secret", "inspector-7", 3600);
        assert_auth_error!(
            gate().authenticate(Some(&format!("Bearer {token}"))),
            InvalidSignature
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_signed_token(TEST_SECRET, "inspector-7", -1);
        assert_auth_error!(gate().authenticate(Some(&format!("Bearer {token}"))), TokenExpired);
    }

    #[test]
    fn test_unsigned_none_token_rejected() {
        let token = craft_raw_token(
            &serde_json::json!({"alg": "none", "typ": "JWT"}),
            &serde_json::json!({"sub": "attacker", "exp": 9_999_999_999u64}),
        );
        let result = gate().authenticate(Some(&format!("Bearer {token}")));
        assert!(result.is_err(), "unsigned token must never authenticate: {result:?}");
    }

    #[test]
    fn test_asymmetric_alg_token_rejected() {
        let token = craft_raw_token(
            &serde_json::json!({"alg": "EdDSA", "typ": "JWT"}),
            &serde_json::json!({"sub": "attacker", "exp": 9_999_999_999u64}),
        );
        assert_auth_error!(
            gate().authenticate(Some(&format!("Bearer {token}"))),
            UnsupportedAlgorithm
        );
    }

    #[test]
    fn test_token_without_subject_rejected() {
        let token = crate::testutil::create_token_with_claims(
            TEST_SECRET,
            &serde_json::json!({"exp": far_future()}),
        );
        assert_auth_error!(gate().authenticate(Some(&format!("Bearer {token}"))), MissingClaim);
    }

    #[test]
    fn test_token_with_empty_subject_rejected() {
        let token = crate::testutil::create_token_with_claims(
            TEST_SECRET,
            &serde_json::json!({"sub": "", "exp": far_future()}),
        );
        assert_auth_error!(gate().authenticate(Some(&format!("Bearer {token}"))), MissingClaim);
    }

    fn far_future() -> u64 {
        (Utc::now().timestamp() as u64) + 3600
    }
}
