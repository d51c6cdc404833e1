//! # Certiq Authentication
//!
//! Bearer-credential validation for the certiq quality-certificate registry.
//!
//! This crate provides:
//! - **Claim decoding**: payload parsing with and without signature verification
//! - **Algorithm policy**: only the deployment's symmetric algorithm is accepted
//! - **The access gate**: a stateless guard that turns a raw authorization
//!   header into an [`AuthenticatedContext`] or a terminal rejection
//!
//! ## Design
//!
//! Tokens are signed with a single shared secret (HS256). There is no key
//! rotation, no session state, no revocation list: every request is verified
//! independently against process-wide immutable configuration. All failure
//! paths collapse to the same caller-facing rejection; the [`AuthError`]
//! variants exist so logs can tell the sub-cases apart.
//!
//! ## Example
//!
//! ```
//! use certiq_authn::AccessGate;
//!
//! let gate = AccessGate::new(b"shared-secret");
//!
//! // A request without credentials is rejected before anything else runs.
//! let result = gate.authenticate(None);
//! assert!(result.is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Token claims and payload decoding.
pub mod claims;
/// Authentication error types.
pub mod error;
/// The access gate.
pub mod gate;
/// Algorithm policy checks.
pub mod validation;

#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;

// Re-export key types for convenience
pub use claims::TokenClaims;
pub use error::{AuthError, Result};
pub use gate::{AccessGate, AuthenticatedContext, NULL_TOKEN_SENTINEL};
pub use validation::{ACCEPTED_ALGORITHMS, FORBIDDEN_ALGORITHMS, validate_algorithm};
