//! Liked-collection service
//!
//! Binds a [`LikeStore`] to the liked collection, resolved once by name when
//! the service is built. Every like operation goes through the
//! [`BatchOrchestrator`]: a single like is a one-id chunk, bulk-like is one
//! chunk holding the whole input, like-all uses the configured chunk size.

use std::sync::Arc;

use tracing::info;

use crate::config::LikesConfig;
use crate::error::LikeError;
use crate::model::{AnnotatedCompany, Collection, CollectionId, Company, CompanyId, Page, PageWindow};
use crate::orchestrator::{BatchOrchestrator, BatchReport};
use crate::store::LikeStore;

pub struct LikeService {
    store: Arc<dyn LikeStore>,
    liked: Collection,
    orchestrator: BatchOrchestrator,
    reset_size: u32,
}

impl LikeService {
    /// Resolve the liked collection named in `config` and build the service.
    ///
    /// # Errors
    ///
    /// [`LikeError::CollectionNotFound`] when no collection has that name.
    pub async fn connect(store: Arc<dyn LikeStore>, config: &LikesConfig) -> Result<Self, LikeError> {
        let liked = store
            .find_collection(&config.collection_name)
            .await?
            .ok_or_else(|| LikeError::CollectionNotFound {
                name: config.collection_name.to_string(),
            })?;
        let orchestrator = BatchOrchestrator::new(config.chunk_size)?;

        info!(
            collection = %liked.collection_name,
            id = %liked.id,
            chunk_size = orchestrator.chunk_size(),
            "liked collection resolved"
        );

        Ok(Self {
            store,
            liked,
            orchestrator,
            reset_size: config.reset_size,
        })
    }

    pub fn liked_collection(&self) -> &Collection {
        &self.liked
    }

    pub fn chunk_size(&self) -> usize {
        self.orchestrator.chunk_size()
    }

    /// Page of companies, each flagged with whether it is liked.
    ///
    /// The membership lookup covers the page's ids only.
    pub async fn list_companies(&self, window: PageWindow) -> Result<Page<AnnotatedCompany>, LikeError> {
        let page = self.store.list_companies(window).await?;
        self.annotate(page).await
    }

    /// Like one company. Returns `true` if it was not liked before.
    pub async fn like(&self, id: CompanyId) -> Result<bool, LikeError> {
        let report = BatchOrchestrator::single()
            .like_all(self.store.as_ref(), self.liked.id, &[id])
            .await
            .map_err(single_unit)?;
        Ok(report.added > 0)
    }

    /// Like every id in one committed chunk. Returns the number added.
    pub async fn bulk_like(&self, ids: &[CompanyId]) -> Result<u64, LikeError> {
        let report = BatchOrchestrator::whole(ids.len())
            .like_all(self.store.as_ref(), self.liked.id, ids)
            .await
            .map_err(single_unit)?;
        Ok(report.added)
    }

    /// Like every id, committing one chunk at a time.
    pub async fn like_all(&self, ids: &[CompanyId]) -> Result<BatchReport, LikeError> {
        info!(
            total = ids.len(),
            chunks = self.orchestrator.chunk_count(ids.len()),
            "starting like-all"
        );
        self.orchestrator
            .like_all(self.store.as_ref(), self.liked.id, ids)
            .await
    }

    /// Replace the liked set with the first `reset_size` companies.
    pub async fn reset(&self) -> Result<u64, LikeError> {
        let inserted = self
            .store
            .reset_members(self.liked.id, self.reset_size)
            .await?;
        info!(inserted, "liked collection reset");
        Ok(inserted)
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>, LikeError> {
        Ok(self.store.list_collections().await?)
    }

    /// A collection's member companies, flagged against the liked set.
    pub async fn collection_page(
        &self,
        id: CollectionId,
        window: PageWindow,
    ) -> Result<(Collection, Page<AnnotatedCompany>), LikeError> {
        let collection = self.collection(id).await?;
        let page = self.store.list_collection_companies(id, window).await?;
        Ok((collection, self.annotate(page).await?))
    }

    /// Every member id of a collection, ascending.
    pub async fn collection_company_ids(&self, id: CollectionId) -> Result<Vec<CompanyId>, LikeError> {
        self.collection(id).await?;
        Ok(self.store.collection_company_ids(id).await?)
    }

    async fn collection(&self, id: CollectionId) -> Result<Collection, LikeError> {
        self.store
            .get_collection(id)
            .await?
            .ok_or_else(|| LikeError::CollectionNotFound {
                name: id.to_string(),
            })
    }

    async fn annotate(&self, page: Page<Company>) -> Result<Page<AnnotatedCompany>, LikeError> {
        let ids: Vec<CompanyId> = page.items.iter().map(|c| c.id).collect();
        let liked = self.store.members_among(self.liked.id, &ids).await?;

        Ok(page.map(|c| AnnotatedCompany {
            liked: liked.contains(&c.id),
            id: c.id,
            company_name: c.company_name,
        }))
    }
}

/// A one-chunk run either commits or doesn't; report it as a plain storage
/// failure rather than partial progress.
fn single_unit(err: LikeError) -> LikeError {
    match err {
        LikeError::PartialBatch { source, .. } => LikeError::Store(source),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CollectionName;
    use crate::store::memory::MemoryStore;

    async fn service(companies: i32) -> (LikeService, Arc<MemoryStore>) {
        let (store, _) = MemoryStore::seeded(companies, &CollectionName::default());
        let store = Arc::new(store);
        let service = LikeService::connect(store.clone(), &LikesConfig::default())
            .await
            .unwrap();
        (service, store)
    }

    #[tokio::test]
    async fn connect_fails_without_collection() {
        let store = Arc::new(MemoryStore::new());
        let err = LikeService::connect(store, &LikesConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LikeError::CollectionNotFound { ref name } if name == "Liked Companies"));
    }

    #[tokio::test]
    async fn like_twice_adds_once() {
        let (service, store) = service(5).await;
        assert!(service.like(CompanyId(3)).await.unwrap());
        assert!(!service.like(CompanyId(3)).await.unwrap());
        assert_eq!(store.membership_count(service.liked_collection().id).await, 1);
    }

    #[tokio::test]
    async fn bulk_like_counts_new_only() {
        let (service, _) = service(5).await;
        service.like(CompanyId(2)).await.unwrap();

        let added = service
            .bulk_like(&[CompanyId(1), CompanyId(2), CompanyId(3)])
            .await
            .unwrap();
        assert_eq!(added, 2);
    }

    #[tokio::test]
    async fn bulk_like_failure_is_plain_store_error() {
        let (service, store) = service(5).await;
        store.fail_insert_on_call(1).await;

        let err = service.bulk_like(&[CompanyId(1)]).await.unwrap_err();
        assert!(matches!(err, LikeError::Store(_)));
    }

    #[tokio::test]
    async fn listing_flags_liked_companies() {
        let (service, _) = service(30).await;
        service.bulk_like(&[CompanyId(2), CompanyId(25)]).await.unwrap();

        let page = service.list_companies(PageWindow::new(0, 10)).await.unwrap();
        assert_eq!(page.total, 30);
        assert_eq!(page.items.len(), 10);
        let liked: Vec<i32> = page.items.iter().filter(|c| c.liked).map(|c| c.id.get()).collect();
        assert_eq!(liked, vec![2]);
    }

    #[tokio::test]
    async fn unknown_collection_page_is_not_found() {
        let (service, _) = service(3).await;
        let err = service
            .collection_page(CollectionId::new_v4(), PageWindow::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LikeError::CollectionNotFound { .. }));
    }
}
