//! Certificate document store abstraction for the certiq registry.
//!
//! This crate provides the [`CertificateStore`] trait and the record model it
//! operates on. The registry's service layer is written against the trait;
//! backends supply the persistence.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Service Layer                   │
//! │   (certiq-registry: gate, allocator, service)   │
//! ├─────────────────────────────────────────────────┤
//! │                  certiq-store                   │
//! │              CertificateStore trait             │
//! │  (count, insert, latest, max_item, find, page)  │
//! ├────────────────────────┬────────────────────────┤
//! │ MemoryCertificateStore │   production backend   │
//! │  (testing, dev)        │   (external document   │
//! │                        │    store, out of tree) │
//! └────────────────────────┴────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use certiq_store::{CertificateDraft, CertificateStore, MemoryCertificateStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryCertificateStore::new();
//!
//!     let draft = CertificateDraft::builder().folio("CFC-1").item(1).build();
//!     let record = store.insert(draft).await?;
//!
//!     assert_eq!(record.folio, "CFC-1");
//!     assert_eq!(store.count().await?, 1);
//!     Ok(())
//! }
//! ```
//!
//! # Consistency Model
//!
//! The store serializes each call internally but offers **no cross-call
//! transaction**: a read followed by a write is not atomic, and callers that
//! derive values from reads (the registry's sequence allocator does) must
//! account for that.
//!
//! # Error Handling
//!
//! All operations return [`StoreResult<T>`]. Backends map their internal
//! failures to [`StoreError`] variants; the registry propagates them without
//! retrying and without distinguishing transient from permanent faults.
//!
//! # Feature Flags
//!
//! - **`testutil`**: enables the `testutil` module with shared test helpers (record factories,
//!   pre-populated stores, assertion macros). Enable this in `[dev-dependencies]` for integration
//!   tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod record;
pub mod store;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;
pub mod types;

// Re-export primary types at crate root for convenience
pub use error::{BoxError, StoreError, StoreResult};
pub use memory::MemoryCertificateStore;
pub use record::{Certificate, CertificateDraft, CertificateUpdate};
pub use store::CertificateStore;
pub use types::RecordId;
