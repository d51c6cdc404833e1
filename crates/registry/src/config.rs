//! Configuration for the certificate registry.
//!
//! This module provides [`RegistryConfig`], the immutable process-wide
//! configuration injected at startup: the shared token-signing secret and the
//! folio prefix for the deployment.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Folio prefix used when none is configured.
pub const DEFAULT_FOLIO_PREFIX: &str = "CFC";

/// Error raised when a configuration fails validation.
#[derive(Debug, Error)]
#[error("invalid registry configuration: {0}")]
pub struct ConfigError(String);

/// Immutable registry configuration.
///
/// Built once at startup and read-only thereafter — the shared secret is
/// never mutated at call time. The secret is wrapped in
/// [`Zeroizing`] so it is scrubbed from memory on drop, and it is redacted
/// from debug output.
///
/// # Example
///
/// ```
/// use certiq_registry::RegistryConfig;
///
/// let config = RegistryConfig::builder()
///     .token_secret("shared-secret")
///     .folio_prefix("QC")
///     .build()?;
///
/// assert_eq!(config.folio_prefix(), "QC");
/// # Ok::<(), certiq_registry::ConfigError>(())
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Shared secret the token issuer signs with (symmetric, no rotation).
    pub(crate) token_secret: Zeroizing<String>,

    /// Prefix of every folio issued by this deployment.
    #[serde(default = "default_folio_prefix")]
    pub(crate) folio_prefix: String,
}

fn default_folio_prefix() -> String {
    DEFAULT_FOLIO_PREFIX.to_owned()
}

#[bon::bon]
impl RegistryConfig {
    /// Creates a new configuration, validating all fields.
    ///
    /// # Arguments
    ///
    /// * `token_secret` - Shared signing secret. Must be non-empty.
    /// * `folio_prefix` - Folio prefix (default: `"CFC"`). Must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret or the prefix is empty.
    #[builder]
    pub fn new(
        #[builder(into)] token_secret: String,
        #[builder(default = default_folio_prefix(), into)] folio_prefix: String,
    ) -> Result<Self, ConfigError> {
        if token_secret.is_empty() {
            return Err(ConfigError("token_secret cannot be empty".into()));
        }

        if folio_prefix.is_empty() {
            return Err(ConfigError("folio_prefix cannot be empty".into()));
        }

        Ok(Self { token_secret: Zeroizing::new(token_secret), folio_prefix })
    }

    /// Returns the configured folio prefix.
    #[must_use]
    pub fn folio_prefix(&self) -> &str {
        &self.folio_prefix
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("token_secret", &"<redacted>")
            .field("folio_prefix", &self.folio_prefix)
            .finish()
    }
}
