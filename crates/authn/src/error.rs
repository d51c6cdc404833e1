//! Authentication error types.
//!
//! Every variant here is an authentication failure and surfaces to the caller
//! as the same `401` rejection. The variants exist so that logs and tests can
//! distinguish the sub-cases; only the expired case carries a different
//! caller-facing message (see [`AuthError::public_message`]).

use thiserror::Error;

/// Authentication failures.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No authorization header was presented.
    #[error("no authorization presented")]
    MissingCredentials,

    /// The embedded token literal is the empty/`"null"` sentinel that
    /// browsers send when no credential is stored client-side.
    #[error("credential is the null sentinel")]
    NullToken,

    /// Malformed token — cannot be decoded.
    #[error("invalid token format: {0}")]
    InvalidTokenFormat(String),

    /// Signature verification against the shared secret failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The token's expiry claim is in the past.
    #[error("token expired")]
    TokenExpired,

    /// Algorithm not in the accepted list.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A required claim is missing or empty.
    #[error("missing claim: {0}")]
    MissingClaim(String),
}

impl AuthError {
    /// Creates a new `MissingCredentials` error.
    #[must_use]
    pub fn missing_credentials() -> Self {
        Self::MissingCredentials
    }

    /// Creates a new `NullToken` error.
    #[must_use]
    pub fn null_token() -> Self {
        Self::NullToken
    }

    /// Creates a new `InvalidTokenFormat` error with the given message.
    #[must_use]
    pub fn invalid_token_format(message: impl Into<String>) -> Self {
        Self::InvalidTokenFormat(message.into())
    }

    /// Creates a new `InvalidSignature` error.
    #[must_use]
    pub fn invalid_signature() -> Self {
        Self::InvalidSignature
    }

    /// Creates a new `TokenExpired` error.
    #[must_use]
    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    /// Creates a new `UnsupportedAlgorithm` error for the given algorithm.
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm(alg.into())
    }

    /// Creates a new `MissingClaim` error for the given claim name.
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingClaim(claim.into())
    }

    /// The caller-facing rejection message for this failure.
    ///
    /// Every sub-case deliberately shares the same terse wording except
    /// expiry, which clients distinguish to trigger a credential refresh.
    /// Internal detail never crosses this boundary.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::TokenExpired => "invalid token",
            _ => "unauthorized request",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken => {
                AuthError::InvalidTokenFormat("invalid token structure".into())
            },
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm("algorithm not supported".into())
            },
            ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
            _ => AuthError::InvalidTokenFormat(format!("token error: {}", err)),
        }
    }
}

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
