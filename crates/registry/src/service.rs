//! The gated operation set.
//!
//! [`CertificateService`] is the registry's public surface: every operation
//! takes the raw authorization header value, runs the
//! [`AccessGate`](certiq_authn::AccessGate) first, and only then touches the
//! store. Authentication failures are terminal — no core logic and no store
//! write runs after a rejection.
//!
//! Transports (HTTP or otherwise) sit on top of this service and own the
//! wire format; failures convert to a caller-facing payload via
//! [`RegistryError::to_rejection`].

use std::sync::Arc;

use certiq_authn::{AccessGate, AuthenticatedContext};
use certiq_store::{Certificate, CertificateDraft, CertificateStore, CertificateUpdate, RecordId};

use crate::{
    config::RegistryConfig,
    error::{RegistryError, Result},
    sequence::SequenceAllocator,
};

/// Bearer-token-gated certificate operations over a document store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use certiq_registry::{CertificateService, RegistryConfig};
/// use certiq_store::MemoryCertificateStore;
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let config = RegistryConfig::builder().token_secret("shared-secret").build().unwrap();
/// let service = CertificateService::new(&config, Arc::new(MemoryCertificateStore::new()));
///
/// let result = service.total(None).await;
/// assert!(result.is_err(), "ungated access must be rejected");
/// # });
/// ```
pub struct CertificateService {
    gate: AccessGate,
    store: Arc<dyn CertificateStore>,
    allocator: SequenceAllocator,
}

impl CertificateService {
    /// Creates a service over the given store, with the gate and allocator
    /// configured from `config`.
    #[must_use]
    pub fn new(config: &RegistryConfig, store: Arc<dyn CertificateStore>) -> Self {
        let gate = AccessGate::new(config.token_secret.as_bytes());
        let allocator = SequenceAllocator::new(Arc::clone(&store), config.folio_prefix.clone());
        Self { gate, store, allocator }
    }

    /// Run the gate; every operation calls this before anything else.
    fn authorize(&self, authorization: Option<&str>) -> Result<AuthenticatedContext> {
        Ok(self.gate.authenticate(authorization)?)
    }

    /// Registers a new certificate.
    ///
    /// Performs the duplicate-folio pre-check (a find-then-insert sequence
    /// with no transaction — two concurrent registrations of the same folio
    /// can both pass the check; see [`SequenceAllocator`] for the companion
    /// hazard) and then inserts the record.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateFolio`] if a record with the draft's folio
    /// already exists, plus the usual authentication and store failures.
    #[tracing::instrument(skip(self, authorization, draft), fields(folio = %draft.folio))]
    pub async fn register(
        &self,
        authorization: Option<&str>,
        draft: CertificateDraft,
    ) -> Result<Certificate> {
        let ctx = self.authorize(authorization)?;

        if self.store.find_by_folio(&draft.folio).await?.is_some() {
            tracing::warn!(folio = %draft.folio, "registration rejected: folio already exists");
            return Err(RegistryError::duplicate_folio(draft.folio));
        }

        let record = self.store.insert(draft).await?;
        tracing::debug!(subject = %ctx.subject, id = %record.id, "certificate registered");
        Ok(record)
    }

    /// Returns all certificates, newest first.
    pub async fn list(&self, authorization: Option<&str>) -> Result<Vec<Certificate>> {
        self.authorize(authorization)?;
        Ok(self.store.list().await?)
    }

    /// Returns one page of certificates, newest first.
    ///
    /// `page` is 1-based; the window skips `(page - 1) * limit` records.
    /// Page 0 saturates to page 1.
    pub async fn page(
        &self,
        authorization: Option<&str>,
        page: u64,
        limit: u64,
    ) -> Result<Vec<Certificate>> {
        self.authorize(authorization)?;
        let skip = page.saturating_sub(1).saturating_mul(limit);
        Ok(self.store.page(skip, limit).await?)
    }

    /// Returns the total number of certificates.
    pub async fn total(&self, authorization: Option<&str>) -> Result<u64> {
        self.authorize(authorization)?;
        Ok(self.store.count().await?)
    }

    /// Fetches a certificate by record id, if present.
    pub async fn get(
        &self,
        authorization: Option<&str>,
        id: RecordId,
    ) -> Result<Option<Certificate>> {
        self.authorize(authorization)?;
        Ok(self.store.get(id).await?)
    }

    /// Fetches a certificate by folio, if present.
    pub async fn find_by_folio(
        &self,
        authorization: Option<&str>,
        folio: &str,
    ) -> Result<Option<Certificate>> {
        self.authorize(authorization)?;
        Ok(self.store.find_by_folio(folio).await?)
    }

    /// Computes the folio the next certificate should carry.
    ///
    /// A pure read; nothing is reserved. See
    /// [`SequenceAllocator::next_folio`].
    pub async fn next_folio(&self, authorization: Option<&str>) -> Result<String> {
        self.authorize(authorization)?;
        self.allocator.next_folio().await
    }

    /// Computes the item number the next certificate should carry.
    ///
    /// A pure read; nothing is reserved. See
    /// [`SequenceAllocator::next_item`].
    pub async fn next_item(&self, authorization: Option<&str>) -> Result<u64> {
        self.authorize(authorization)?;
        self.allocator.next_item().await
    }

    /// Replaces the status of a certificate.
    #[tracing::instrument(skip(self, authorization, status))]
    pub async fn update_status(
        &self,
        authorization: Option<&str>,
        id: RecordId,
        status: impl Into<String>,
    ) -> Result<()> {
        let ctx = self.authorize(authorization)?;
        self.store.update_status(id, status.into()).await?;
        tracing::debug!(subject = %ctx.subject, id = %id, "certificate status updated");
        Ok(())
    }

    /// Applies a partial update to a certificate's detail fields.
    #[tracing::instrument(skip(self, authorization, update))]
    pub async fn update_details(
        &self,
        authorization: Option<&str>,
        id: RecordId,
        update: CertificateUpdate,
    ) -> Result<()> {
        let ctx = self.authorize(authorization)?;
        self.store.update_details(id, update).await?;
        tracing::debug!(subject = %ctx.subject, id = %id, "certificate details updated");
        Ok(())
    }

    /// Deletes a certificate.
    #[tracing::instrument(skip(self, authorization))]
    pub async fn delete(&self, authorization: Option<&str>, id: RecordId) -> Result<()> {
        let ctx = self.authorize(authorization)?;
        self.store.delete(id).await?;
        tracing::debug!(subject = %ctx.subject, id = %id, "certificate deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use certiq_authn::testutil::{TEST_SECRET, create_signed_token};
    use certiq_store::{MemoryCertificateStore, testutil::make_draft};

    use super::*;

    fn service() -> (CertificateService, Arc<MemoryCertificateStore>) {
        let config = RegistryConfig::builder()
            .token_secret(String::from_utf8(TEST_SECRET.to_vec()).expect("utf8 secret"))
            .build()
            .expect("config");
        let store = Arc::new(MemoryCertificateStore::new());
        (CertificateService::new(&config, Arc::clone(&store) as Arc<dyn CertificateStore>), store)
    }

    fn auth_header() -> String {
        format!("Bearer {}", create_signed_token(TEST_SECRET, "inspector-7", 3600))
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_folio() {
        let (service, _) = service();
        let header = auth_header();

        service.register(Some(&header), make_draft("CFC-1", 1)).await.expect("first register");
        let result = service.register(Some(&header), make_draft("CFC-1", 2)).await;

        assert!(
            matches!(result, Err(RegistryError::DuplicateFolio { ref folio }) if folio == "CFC-1"),
            "got: {result:?}"
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_register_leaves_store_untouched() {
        let (service, store) = service();

        let result = service.register(Some("Bearer null"), make_draft("CFC-1", 1)).await;

        assert!(matches!(result, Err(RegistryError::Unauthorized(_))));
        assert_eq!(store.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_page_zero_saturates_to_first_page() {
        let (service, _) = service();
        let header = auth_header();
        for n in 1..=3u64 {
            service
                .register(Some(&header), make_draft(&format!("CFC-{n}"), n))
                .await
                .expect("register");
        }

        let page_zero = service.page(Some(&header), 0, 2).await.expect("page");
        let page_one = service.page(Some(&header), 1, 2).await.expect("page");
        assert_eq!(page_zero, page_one);
    }

    #[tokio::test]
    async fn test_status_and_details_updates_are_gated() {
        let (service, _) = service();
        let header = auth_header();
        let record =
            service.register(Some(&header), make_draft("CFC-1", 1)).await.expect("register");

        let denied =
            service.update_status(None, record.id, "released").await;
        assert!(matches!(denied, Err(RegistryError::Unauthorized(_))));

        service
            .update_status(Some(&header), record.id, "released")
            .await
            .expect("update_status");
        let fetched = service.get(Some(&header), record.id).await.expect("get").expect("some");
        assert_eq!(fetched.status.as_deref(), Some("released"));
    }
}
