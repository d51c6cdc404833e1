//! Algorithm policy checks.
//!
//! Registry tokens are signed with a single shared secret, so HS256 is the
//! only algorithm the deployment can verify. Everything else is rejected
//! before signature verification runs.

use crate::error::AuthError;

/// Algorithms that are never accepted, regardless of configuration.
///
/// `none` means no signature at all and is trivially forgeable. It is listed
/// separately from the merely-unsupported algorithms so the rejection message
/// flags it as a policy violation rather than a configuration gap.
pub const FORBIDDEN_ALGORITHMS: &[&str] = &["none"];

/// Accepted token algorithms.
///
/// Only HS256 is supported: the token contract is a single symmetric secret
/// shared with the issuer, and this service has no key-distribution
/// machinery for asymmetric verification. Per RFC 8725 Section 3.1,
/// algorithms that are not fully implemented must be rejected outright
/// rather than failing later at signature verification.
pub const ACCEPTED_ALGORITHMS: &[&str] = &["HS256"];

/// Validate a token algorithm against the deployment policy.
///
/// # Arguments
///
/// * `alg` - The algorithm name from the token header
///
/// # Errors
///
/// Returns [`AuthError::UnsupportedAlgorithm`] if:
/// - The algorithm is `none`
/// - The algorithm is not in [`ACCEPTED_ALGORITHMS`]
///
/// # Examples
///
/// ```
/// use certiq_authn::validation::validate_algorithm;
///
/// assert!(validate_algorithm("HS256").is_ok());
///
/// // Asymmetric algorithms cannot be verified with a shared secret
/// assert!(validate_algorithm("EdDSA").is_err());
///
/// // Unsigned tokens are always rejected
/// assert!(validate_algorithm("none").is_err());
/// ```
pub fn validate_algorithm(alg: &str) -> Result<(), AuthError> {
    if FORBIDDEN_ALGORITHMS.contains(&alg) {
        return Err(AuthError::unsupported_algorithm(format!(
            "algorithm '{}' is not allowed for security reasons",
            alg
        )));
    }

    if !ACCEPTED_ALGORITHMS.contains(&alg) {
        return Err(AuthError::unsupported_algorithm(format!(
            "algorithm '{}' is not in the accepted list (only HS256 is supported)",
            alg
        )));
    }

    Ok(())
}
