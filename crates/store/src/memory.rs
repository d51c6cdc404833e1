//! In-memory certificate store implementation.
//!
//! This module provides [`MemoryCertificateStore`], an in-memory
//! implementation of [`CertificateStore`] suitable for testing and
//! development.
//!
//! # Features
//!
//! - **Thread-safe**: uses [`parking_lot::RwLock`] for concurrent access
//! - **Ordered storage**: records live in a [`BTreeMap`] keyed by insertion id, so insertion-order
//!   scans are cheap
//! - **Faithful isolation**: each call takes the lock once and releases it before returning —
//!   exactly the per-call serialization the external document store offers, and nothing more
//!
//! # Limitations
//!
//! - Data is not persisted; everything is lost when the process exits
//! - No replication or distributed features

use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    error::{StoreError, StoreResult},
    record::{Certificate, CertificateDraft, CertificateUpdate},
    store::CertificateStore,
    types::RecordId,
};
use async_trait::async_trait;

/// In-memory certificate store backed by a [`BTreeMap`].
///
/// Primarily intended for tests, but usable for development deployments
/// where persistence is not required.
///
/// # Cloning
///
/// `MemoryCertificateStore` is cheaply cloneable via [`Arc`]. All clones
/// share the same underlying collection.
#[derive(Debug, Default, Clone)]
pub struct MemoryCertificateStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Monotonic insertion-id source. Never reused, even after deletes.
    next_id: i64,
    records: BTreeMap<RecordId, Certificate>,
}

impl MemoryCertificateStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateStore for MemoryCertificateStore {
    #[tracing::instrument(skip(self))]
    async fn count(&self) -> StoreResult<u64> {
        let inner = self.inner.read();
        Ok(inner.records.len() as u64)
    }

    #[tracing::instrument(skip(self, draft), fields(folio = %draft.folio))]
    async fn insert(&self, draft: CertificateDraft) -> StoreResult<Certificate> {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = RecordId::from(inner.next_id);

        let record = draft.into_record(id, Utc::now());
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn latest(&self) -> StoreResult<Option<Certificate>> {
        let inner = self.inner.read();
        Ok(inner.records.last_key_value().map(|(_, record)| record.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn max_item(&self) -> StoreResult<Option<Certificate>> {
        let inner = self.inner.read();
        // max_by_key keeps the last maximum in iteration order, so ties
        // resolve to the most recently inserted record.
        Ok(inner.records.values().max_by_key(|record| record.item).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: RecordId) -> StoreResult<Option<Certificate>> {
        let inner = self.inner.read();
        Ok(inner.records.get(&id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_folio(&self, folio: &str) -> StoreResult<Option<Certificate>> {
        let inner = self.inner.read();
        Ok(inner.records.values().find(|record| record.folio == folio).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Certificate>> {
        let inner = self.inner.read();
        Ok(inner.records.values().rev().cloned().collect())
    }

    #[tracing::instrument(skip(self))]
    async fn page(&self, skip: u64, limit: u64) -> StoreResult<Vec<Certificate>> {
        let inner = self.inner.read();
        Ok(inner
            .records
            .values()
            .rev()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self, status))]
    async fn update_status(&self, id: RecordId, status: String) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let record =
            inner.records.get_mut(&id).ok_or_else(|| StoreError::not_found(id.to_string()))?;

        record.status = Some(status);
        Ok(())
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_details(&self, id: RecordId, update: CertificateUpdate) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let record =
            inner.records.get_mut(&id).ok_or_else(|| StoreError::not_found(id.to_string()))?;

        update.apply_to(record);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.records.remove(&id).is_none() {
            return Err(StoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}
