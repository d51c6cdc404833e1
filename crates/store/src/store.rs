//! Certificate store trait definition.
//!
//! This module defines the [`CertificateStore`] trait, the core abstraction
//! in front of the document store that holds certificate records. The
//! registry's service layer and sequence allocator are written against this
//! trait; [`MemoryCertificateStore`](crate::MemoryCertificateStore) is the
//! in-tree implementation, and production deployments supply their own
//! backend over the external document store.
//!
//! # Design Philosophy
//!
//! The trait is deliberately narrow: it exposes exactly the read and write
//! shapes the registry uses (counts, ordered single-record lookups, ordered
//! windows, and per-record writes) rather than a generic query language.
//!
//! - **Async by default**: every operation is a suspension point.
//! - **Per-call serialization only**: the store serializes each call
//!   internally but offers no cross-call transaction and no locks held
//!   across calls.
//! - **Two orderings**: insertion order (by [`RecordId`]) and item order
//!   (by the `item` field). The registry depends on both; see
//!   [`latest`](CertificateStore::latest) and
//!   [`max_item`](CertificateStore::max_item).

use async_trait::async_trait;

use crate::{
    error::StoreResult,
    record::{Certificate, CertificateDraft, CertificateUpdate},
    types::RecordId,
};

/// Persistence layer for certificate records.
///
/// Implementations must be thread-safe (`Send + Sync`) and support concurrent
/// calls; each call is independently serialized by the backend.
///
/// # Example
///
/// ```
/// use certiq_store::{CertificateDraft, CertificateStore, MemoryCertificateStore};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let store = MemoryCertificateStore::new();
///
/// let draft = CertificateDraft::builder().folio("CFC-1").item(1).build();
/// store.insert(draft).await.unwrap();
///
/// let latest = store.latest().await.unwrap();
/// assert_eq!(latest.unwrap().folio, "CFC-1");
/// # });
/// ```
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Returns the total number of records in the collection.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn count(&self) -> StoreResult<u64>;

    /// Inserts a new record, assigning its [`RecordId`] and creation time.
    ///
    /// Uniqueness of the folio is **not** enforced here; the registry
    /// performs its own pre-insert check.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn insert(&self, draft: CertificateDraft) -> StoreResult<Certificate>;

    /// Returns the most recently inserted record.
    ///
    /// Ordering is by insertion id descending — not by folio value and not
    /// by any business meaning. Returns `Ok(None)` on an empty collection.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn latest(&self) -> StoreResult<Option<Certificate>>;

    /// Returns the record with the highest `item` value.
    ///
    /// Ordering is by the `item` field descending, independent of insertion
    /// order. Returns `Ok(None)` on an empty collection.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn max_item(&self) -> StoreResult<Option<Certificate>>;

    /// Retrieves a record by id.
    ///
    /// Returns `Ok(None)` if no record has the given id.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn get(&self, id: RecordId) -> StoreResult<Option<Certificate>>;

    /// Retrieves the first record carrying the given folio.
    ///
    /// "First" is oldest-inserted, matching the document store's natural
    /// find order. Returns `Ok(None)` if no record matches.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn find_by_folio(&self, folio: &str) -> StoreResult<Option<Certificate>>;

    /// Returns all records, newest first.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn list(&self) -> StoreResult<Vec<Certificate>>;

    /// Returns a window of records, newest first.
    ///
    /// Skips `skip` records from the newest end and returns at most `limit`.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn page(&self, skip: u64, limit: u64) -> StoreResult<Vec<Certificate>>;

    /// Replaces the status of a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// record does not exist.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn update_status(&self, id: RecordId, status: String) -> StoreResult<()>;

    /// Applies a partial update to a record's detail fields.
    ///
    /// Fields absent from `update` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// record does not exist.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn update_details(&self, id: RecordId, update: CertificateUpdate) -> StoreResult<()>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if the
    /// record does not exist.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn delete(&self, id: RecordId) -> StoreResult<()>;
}
