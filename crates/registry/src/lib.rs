//! # Certiq Registry
//!
//! The quality-certificate registry core: a set of bearer-token-gated record
//! operations over a document store, plus the sequential folio/item numbering
//! scheme.
//!
//! Two components carry the real design weight:
//!
//! - [`certiq_authn::AccessGate`] (re-used from the authn crate) runs in
//!   front of every operation exposed by [`CertificateService`].
//! - [`SequenceAllocator`] derives the next folio and item number from the
//!   most recently inserted record — no persisted counter exists.
//!
//! Everything else is a thin passthrough to the
//! [`CertificateStore`](certiq_store::CertificateStore) collaborator.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use certiq_registry::{CertificateService, RegistryConfig};
//! use certiq_store::MemoryCertificateStore;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let config = RegistryConfig::builder()
//!     .token_secret("shared-secret")
//!     .build()
//!     .unwrap();
//! let service = CertificateService::new(&config, Arc::new(MemoryCertificateStore::new()));
//!
//! // Without credentials, nothing gets through the gate.
//! assert!(service.next_folio(None).await.is_err());
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Registry configuration.
pub mod config;
/// Registry error types and the rejection payload.
pub mod error;
/// Sequential folio/item allocation.
pub mod sequence;
/// The gated operation set.
pub mod service;

// Re-export key types for convenience
pub use config::{ConfigError, DEFAULT_FOLIO_PREFIX, RegistryConfig};
pub use error::{Rejection, RegistryError, Result};
pub use sequence::SequenceAllocator;
pub use service::CertificateService;
