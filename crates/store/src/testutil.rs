//! Shared test utilities for store testing.
//!
//! This module provides common helpers for building test records,
//! pre-populating stores, and asserting on [`StoreResult`](crate::StoreResult)
//! values. It is feature-gated behind `testutil` to prevent leaking into
//! production builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! certiq-store = { path = "../store", features = ["testutil"] }
//! ```

use crate::{
    memory::MemoryCertificateStore,
    record::CertificateDraft,
    store::CertificateStore,
};

/// Create a minimal draft with the given folio and item number.
#[must_use]
pub fn make_draft(folio: &str, item: u64) -> CertificateDraft {
    CertificateDraft::builder().folio(folio).item(item).build()
}

/// Create a draft with representative detail fields filled in.
#[must_use]
pub fn make_detailed_draft(folio: &str, item: u64) -> CertificateDraft {
    CertificateDraft::builder()
        .folio(folio)
        .item(item)
        .status("in review")
        .issued_on("2024-03-01")
        .customer("ACME Tooling")
        .description("machined bracket, rev C")
        .part_number("PN-1040")
        .inspector("R. Mata")
        .build()
}

/// Create a [`MemoryCertificateStore`] pre-populated with `count` records.
///
/// Records carry folios `"{prefix}-1"` through `"{prefix}-{count}"` and item
/// numbers `1..=count`, inserted in that order.
///
/// # Panics
///
/// Panics if any insert fails (should not happen with the memory store).
pub async fn populated_store(prefix: &str, count: u64) -> MemoryCertificateStore {
    let store = MemoryCertificateStore::new();
    for n in 1..=count {
        store
            .insert(make_draft(&format!("{prefix}-{n}"), n))
            .await
            .expect("populate insert failed");
    }
    store
}

/// Asserts that a [`StoreResult`](crate::StoreResult) is an `Err` matching
/// the given [`StoreError`](crate::StoreError) variant.
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use certiq_store::assert_store_error;
/// use certiq_store::{StoreError, StoreResult};
///
/// let result: StoreResult<()> = Err(StoreError::not_found("CFC-1"));
/// assert_store_error!(result, NotFound);
/// ```
#[macro_export]
macro_rules! assert_store_error {
    ($result:expr, $variant:ident) => {
        assert!(
            matches!($result, Err($crate::error::StoreError::$variant { .. })),
            "expected StoreError::{}, got: {:?}",
            stringify!($variant),
            $result,
        );
    };
    ($result:expr, $variant:ident, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StoreError::$variant { .. })),
            "{}: expected StoreError::{}, got: {:?}",
            $msg,
            stringify!($variant),
            $result,
        );
    };
}
