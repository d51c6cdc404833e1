//! Registry error types and the rejection payload.
//!
//! The taxonomy has three families:
//!
//! - [`RegistryError::Unauthorized`] — any authentication failure; always
//!   terminal before core logic or a store write runs.
//! - [`RegistryError::DataIntegrity`] (and [`RegistryError::DuplicateFolio`])
//!   — malformed or conflicting business identifiers, surfaced distinctly
//!   and never coerced to a default value.
//! - [`RegistryError::Store`] — storage faults, propagated as-is with no
//!   retry and no transient/permanent distinction.

use certiq_authn::AuthError;
use certiq_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The request failed authentication; no operation ran.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// A certificate with the requested folio already exists.
    #[error("a certificate with folio {folio} already exists")]
    DuplicateFolio {
        /// The conflicting folio.
        folio: String,
    },

    /// Stored identifier data could not be interpreted.
    ///
    /// Raised when sequence allocation meets a folio that does not parse as
    /// `<prefix>-<integer>`. Deliberately fatal for the request: silently
    /// falling back to a default would hand out colliding identifiers.
    #[error("data integrity violation: {message}")]
    DataIntegrity {
        /// Description of the inconsistency.
        message: String,
    },

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Creates a new `DuplicateFolio` error for the given folio.
    #[must_use]
    pub fn duplicate_folio(folio: impl Into<String>) -> Self {
        Self::DuplicateFolio { folio: folio.into() }
    }

    /// Creates a new `DataIntegrity` error with the given message.
    #[must_use]
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrity { message: message.into() }
    }

    /// Renders this error as the caller-facing rejection payload.
    ///
    /// Authentication failures collapse to their uniform public wording;
    /// store faults carry the underlying error detail; integrity and
    /// duplicate-folio rejections carry their own short message. No stack
    /// traces or internals cross this boundary.
    #[must_use]
    pub fn to_rejection(&self) -> Rejection {
        let message = match self {
            Self::Unauthorized(err) => err.public_message().to_owned(),
            _ => self.to_string(),
        };
        Rejection { message }
    }
}

/// Structured rejection payload returned for every failed operation.
///
/// Carries a single short, human-readable message field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Human-readable rejection reason.
    pub message: String,
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
