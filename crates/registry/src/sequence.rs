//! Sequential folio/item allocation.
//!
//! No dedicated counter is persisted anywhere: the next folio and the next
//! item number are *derived on demand* by reading the relevant extreme of the
//! collection and incrementing. The two operations deliberately use different
//! ordering keys:
//!
//! - [`next_folio`](SequenceAllocator::next_folio) orders by **insertion id**
//!   (most recently inserted record), trusting that the latest insert also
//!   carries the highest folio number.
//! - [`next_item`](SequenceAllocator::next_item) orders by the **item field**
//!   itself.
//!
//! The asymmetry is part of the deployed numbering behavior and must not be
//! "corrected" — changing either ordering key changes the numbers clients
//! see.
//!
//! # Concurrency
//!
//! Both operations are pure read-then-compute sequences with no lock held
//! across the store call and no compare-and-set on insert. Two concurrent
//! callers that observe the same collection state receive the **same**
//! value; uniqueness is only as strong as the registry's separate (also
//! racy) duplicate-folio pre-check. This is a known limitation preserved for
//! behavioral parity. The allocator is the single seam where an atomic
//! counter could later be substituted without touching callers.

use std::sync::Arc;

use certiq_store::CertificateStore;

use crate::error::{RegistryError, Result};

/// Derives the next folio and item number from the collection's current
/// extremes.
#[derive(Clone)]
pub struct SequenceAllocator {
    store: Arc<dyn CertificateStore>,
    prefix: String,
}

impl SequenceAllocator {
    /// Creates an allocator reading from `store` and issuing folios under
    /// `prefix`.
    pub fn new(store: Arc<dyn CertificateStore>, prefix: impl Into<String>) -> Self {
        Self { store, prefix: prefix.into() }
    }

    /// Computes the folio for the next certificate.
    ///
    /// On an empty collection this is the seed folio `"<PREFIX>-1"`.
    /// Otherwise the most recently **inserted** record's folio is parsed and
    /// its numeric suffix incremented.
    ///
    /// Calling this repeatedly without inserting records returns the same
    /// value each time — it is a pure read.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DataIntegrity`] if the latest record's folio
    /// does not parse as `<prefix>-<integer>`, and propagates store faults
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn next_folio(&self) -> Result<String> {
        if self.store.count().await? == 0 {
            return Ok(format!("{}-1", self.prefix));
        }

        let latest = self.store.latest().await?.ok_or_else(|| {
            RegistryError::data_integrity(
                "collection reported records but no latest record was found",
            )
        })?;

        let number = parse_folio_number(&latest.folio, &self.prefix)?;
        let next = number.checked_add(1).ok_or_else(|| {
            RegistryError::data_integrity(format!(
                "folio {:?} numeric suffix cannot be incremented",
                latest.folio
            ))
        })?;

        Ok(format!("{}-{}", self.prefix, next))
    }

    /// Computes the item number for the next certificate.
    ///
    /// On an empty collection this is `1`. Otherwise one past the highest
    /// `item` value present — ordered by the item field, not by insertion.
    ///
    /// Like [`next_folio`](Self::next_folio), a pure read with no
    /// reservation: concurrent callers can receive the same number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DataIntegrity`] on inconsistent collection
    /// state, and propagates store faults unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn next_item(&self) -> Result<u64> {
        if self.store.count().await? == 0 {
            return Ok(1);
        }

        let top = self.store.max_item().await?.ok_or_else(|| {
            RegistryError::data_integrity(
                "collection reported records but no maximum item was found",
            )
        })?;

        top.item.checked_add(1).ok_or_else(|| {
            RegistryError::data_integrity(format!(
                "item number {} cannot be incremented",
                top.item
            ))
        })
    }
}

/// Parse the numeric suffix out of a `<prefix>-<integer>` folio.
///
/// The suffix must be one or more ASCII digits; anything else — a different
/// prefix, a missing separator, an empty or non-numeric suffix — is a data
/// integrity failure, never a default.
fn parse_folio_number(folio: &str, prefix: &str) -> Result<u64> {
    let suffix = folio
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| {
            RegistryError::data_integrity(format!(
                "folio {folio:?} does not start with prefix {prefix:?}"
            ))
        })?;

    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistryError::data_integrity(format!(
            "folio {folio:?} has no numeric suffix"
        )));
    }

    suffix.parse::<u64>().map_err(|_| {
        RegistryError::data_integrity(format!("folio {folio:?} numeric suffix is out of range"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use certiq_store::{
        MemoryCertificateStore,
        testutil::{make_draft, populated_store},
    };

    use super::*;

    fn allocator(store: MemoryCertificateStore) -> SequenceAllocator {
        SequenceAllocator::new(Arc::new(store), "CFC")
    }

    #[tokio::test]
    async fn test_next_folio_on_empty_collection_is_seed() {
        let alloc = allocator(MemoryCertificateStore::new());
        assert_eq!(alloc.next_folio().await.expect("next_folio"), "CFC-1");
    }

    #[tokio::test]
    async fn test_next_folio_increments_latest() {
        let store = populated_store("CFC", 7).await;
        let alloc = allocator(store);
        assert_eq!(alloc.next_folio().await.expect("next_folio"), "CFC-8");
    }

    #[tokio::test]
    async fn test_next_folio_follows_insertion_order_not_folio_order() {
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("CFC-40", 1)).await.expect("insert");
        store.insert(make_draft("CFC-7", 2)).await.expect("insert");

        // The latest insert carries CFC-7, so the next folio is CFC-8 even
        // though CFC-40 exists.
        let alloc = allocator(store);
        assert_eq!(alloc.next_folio().await.expect("next_folio"), "CFC-8");
    }

    #[tokio::test]
    async fn test_next_folio_is_idempotent_without_inserts() {
        let store = populated_store("CFC", 3).await;
        let alloc = allocator(store);

        let first = alloc.next_folio().await.expect("next_folio");
        let second = alloc.next_folio().await.expect("next_folio");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_next_folio_rejects_foreign_prefix() {
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("LOT-7", 1)).await.expect("insert");

        let result = allocator(store).next_folio().await;
        assert!(matches!(result, Err(RegistryError::DataIntegrity { .. })), "got: {result:?}");
    }

    #[tokio::test]
    async fn test_next_folio_rejects_non_numeric_suffix() {
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("CFC-seven", 1)).await.expect("insert");

        let result = allocator(store).next_folio().await;
        assert!(matches!(result, Err(RegistryError::DataIntegrity { .. })), "got: {result:?}");
    }

    #[tokio::test]
    async fn test_next_folio_rejects_missing_separator() {
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("CFC7", 1)).await.expect("insert");

        let result = allocator(store).next_folio().await;
        assert!(matches!(result, Err(RegistryError::DataIntegrity { .. })), "got: {result:?}");
    }

    #[tokio::test]
    async fn test_next_folio_rejects_signed_suffix() {
        // "+7" would slip through a bare integer parse; the digits-only rule
        // keeps the folio shape canonical.
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("CFC-+7", 1)).await.expect("insert");

        let result = allocator(store).next_folio().await;
        assert!(matches!(result, Err(RegistryError::DataIntegrity { .. })), "got: {result:?}");
    }

    #[tokio::test]
    async fn test_next_item_on_empty_collection_is_one() {
        let alloc = allocator(MemoryCertificateStore::new());
        assert_eq!(alloc.next_item().await.expect("next_item"), 1);
    }

    #[tokio::test]
    async fn test_next_item_increments_maximum() {
        let store = MemoryCertificateStore::new();
        store.insert(make_draft("CFC-1", 5)).await.expect("insert");
        store.insert(make_draft("CFC-2", 12)).await.expect("insert");
        store.insert(make_draft("CFC-3", 3)).await.expect("insert");

        let alloc = allocator(store);
        assert_eq!(alloc.next_item().await.expect("next_item"), 13);
    }

    #[tokio::test]
    async fn test_next_item_is_idempotent_without_inserts() {
        let store = populated_store("CFC", 4).await;
        let alloc = allocator(store);

        assert_eq!(alloc.next_item().await.expect("next_item"), 5);
        assert_eq!(alloc.next_item().await.expect("next_item"), 5);
    }

    #[tokio::test]
    async fn test_concurrent_next_folio_can_collide() {
        // Documented hazard, not a correctness property: two concurrent
        // calls over an unchanged collection observe the same latest record
        // and hand out the same folio.
        let store = populated_store("CFC", 2).await;
        let alloc = allocator(store);

        let (a, b) = tokio::join!(alloc.next_folio(), alloc.next_folio());
        assert_eq!(a.expect("first"), b.expect("second"));
    }

    #[test]
    fn test_parse_folio_number_accepts_zero_padded_suffix() {
        // "007" is digits-only and parses to 7.
        assert_eq!(parse_folio_number("CFC-007", "CFC").expect("parse"), 7);
    }

    #[test]
    fn test_parse_folio_number_rejects_empty_suffix() {
        assert!(parse_folio_number("CFC-", "CFC").is_err());
    }

    #[test]
    fn test_parse_folio_number_rejects_overflow() {
        assert!(parse_folio_number("CFC-99999999999999999999999999", "CFC").is_err());
    }
}
