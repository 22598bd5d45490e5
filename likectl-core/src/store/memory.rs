//! In-memory [`LikeStore`]
//!
//! Backs `likectl serve --in-memory` and the test suites. Memberships are kept
//! per collection in ordered sets, so the (company, collection) uniqueness
//! invariant holds the same way the Postgres constraint enforces it.
//! Failures can be injected per call to exercise partial-batch handling.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LikeStore, StoreError};
use crate::model::{Collection, CollectionId, CollectionName, Company, CompanyId, Page, PageWindow};

#[derive(Default)]
struct MemoryState {
    companies: BTreeMap<CompanyId, String>,
    collections: Vec<Collection>,
    memberships: HashMap<CollectionId, BTreeSet<CompanyId>>,
    /// Id count passed to each `insert_members` call, in call order
    insert_sizes: Vec<usize>,
    fail_insert_call: Option<usize>,
    fail_reset: bool,
}

impl MemoryState {
    fn members(&self, collection: CollectionId) -> Option<&BTreeSet<CompanyId>> {
        self.memberships.get(&collection)
    }

    fn ensure_collection(&self, collection: CollectionId) -> Result<(), StoreError> {
        if self.collections.iter().any(|c| c.id == collection) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "collection {} does not exist",
                collection
            )))
        }
    }
}

/// Process-local store guarded by a single async mutex
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with companies `1..=company_count` named "Company N" and an
    /// empty collection called `liked_name`.
    pub fn seeded(company_count: i32, liked_name: &CollectionName) -> (Self, CollectionId) {
        let liked = CollectionId::new_v4();
        let mut state = MemoryState::default();
        for id in 1..=company_count {
            state.companies.insert(CompanyId(id), format!("Company {}", id));
        }
        state.collections.push(Collection {
            id: liked,
            collection_name: liked_name.as_str().to_owned(),
        });
        state.memberships.insert(liked, BTreeSet::new());

        (
            Self {
                state: Mutex::new(state),
            },
            liked,
        )
    }

    pub async fn add_company(&self, id: CompanyId, name: impl Into<String>) {
        self.state.lock().await.companies.insert(id, name.into());
    }

    pub async fn add_collection(&self, name: &CollectionName) -> CollectionId {
        let id = CollectionId::new_v4();
        let mut state = self.state.lock().await;
        state.collections.push(Collection {
            id,
            collection_name: name.as_str().to_owned(),
        });
        state.memberships.insert(id, BTreeSet::new());
        id
    }

    /// Number of memberships currently held by `collection`.
    pub async fn membership_count(&self, collection: CollectionId) -> usize {
        let state = self.state.lock().await;
        state.members(collection).map_or(0, BTreeSet::len)
    }

    /// Current members of `collection`, ascending.
    pub async fn members(&self, collection: CollectionId) -> Vec<CompanyId> {
        let state = self.state.lock().await;
        state
            .members(collection)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of `insert_members` calls seen so far.
    pub async fn insert_calls(&self) -> usize {
        self.state.lock().await.insert_sizes.len()
    }

    /// Id count of each `insert_members` call so far, failed calls included.
    pub async fn insert_sizes(&self) -> Vec<usize> {
        self.state.lock().await.insert_sizes.clone()
    }

    /// Make the `call`-th `insert_members` call (1-based) fail before writing.
    pub async fn fail_insert_on_call(&self, call: usize) {
        self.state.lock().await.fail_insert_call = Some(call);
    }

    pub async fn fail_resets(&self, fail: bool) {
        self.state.lock().await.fail_reset = fail;
    }
}

fn window<T: Clone>(items: &[T], window: PageWindow) -> Vec<T> {
    items
        .iter()
        .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
        .take(window.limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn find_collection(
        &self,
        name: &CollectionName,
    ) -> Result<Option<Collection>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .collections
            .iter()
            .find(|c| c.collection_name == name.as_str())
            .cloned())
    }

    async fn get_collection(&self, id: CollectionId) -> Result<Option<Collection>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.collections.iter().find(|c| c.id == id).cloned())
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, StoreError> {
        Ok(self.state.lock().await.collections.clone())
    }

    async fn list_companies(&self, page: PageWindow) -> Result<Page<Company>, StoreError> {
        let state = self.state.lock().await;
        let all: Vec<Company> = state
            .companies
            .iter()
            .map(|(id, name)| Company {
                id: *id,
                company_name: name.clone(),
            })
            .collect();

        Ok(Page {
            items: window(&all, page),
            total: all.len() as i64,
        })
    }

    async fn list_collection_companies(
        &self,
        collection: CollectionId,
        page: PageWindow,
    ) -> Result<Page<Company>, StoreError> {
        let state = self.state.lock().await;
        let members: Vec<Company> = state
            .members(collection)
            .into_iter()
            .flatten()
            .filter_map(|id| {
                state.companies.get(id).map(|name| Company {
                    id: *id,
                    company_name: name.clone(),
                })
            })
            .collect();

        Ok(Page {
            items: window(&members, page),
            total: members.len() as i64,
        })
    }

    async fn collection_company_ids(
        &self,
        collection: CollectionId,
    ) -> Result<Vec<CompanyId>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .members(collection)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn members_among(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<HashSet<CompanyId>, StoreError> {
        let state = self.state.lock().await;
        let Some(members) = state.members(collection) else {
            return Ok(HashSet::new());
        };
        Ok(ids.iter().filter(|id| members.contains(id)).copied().collect())
    }

    async fn insert_members(
        &self,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        state.insert_sizes.push(ids.len());
        let call = state.insert_sizes.len();
        if state.fail_insert_call == Some(call) {
            return Err(StoreError::Unavailable(format!(
                "injected failure on insert call {}",
                call
            )));
        }
        state.ensure_collection(collection)?;

        let members = state.memberships.entry(collection).or_default();
        let inserted = ids.iter().filter(|id| members.insert(**id)).count();
        Ok(inserted as u64)
    }

    async fn reset_members(
        &self,
        collection: CollectionId,
        default_size: u32,
    ) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        if state.fail_reset {
            return Err(StoreError::Unavailable("injected reset failure".into()));
        }
        state.ensure_collection(collection)?;

        let fresh: BTreeSet<CompanyId> = state
            .companies
            .keys()
            .take(default_size as usize)
            .copied()
            .collect();
        let inserted = fresh.len() as u64;
        state.memberships.insert(collection, fresh);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i32]) -> Vec<CompanyId> {
        raw.iter().copied().map(CompanyId).collect()
    }

    #[tokio::test]
    async fn insert_skips_existing_rows() {
        let (store, liked) = MemoryStore::seeded(5, &CollectionName::default());
        assert_eq!(store.insert_members(liked, &ids(&[1, 2])).await.unwrap(), 2);
        assert_eq!(store.insert_members(liked, &ids(&[2, 3])).await.unwrap(), 1);
        assert_eq!(store.members(liked).await, ids(&[1, 2, 3]));
    }

    #[tokio::test]
    async fn injected_insert_failure_leaves_state() {
        let (store, liked) = MemoryStore::seeded(5, &CollectionName::default());
        store.fail_insert_on_call(2).await;

        store.insert_members(liked, &ids(&[1])).await.unwrap();
        assert!(store.insert_members(liked, &ids(&[2])).await.is_err());
        assert_eq!(store.members(liked).await, ids(&[1]));
        assert_eq!(store.insert_calls().await, 2);
    }

    #[tokio::test]
    async fn reset_replaces_members() {
        let (store, liked) = MemoryStore::seeded(20, &CollectionName::default());
        store.insert_members(liked, &ids(&[15, 16, 17])).await.unwrap();

        assert_eq!(store.reset_members(liked, 10).await.unwrap(), 10);
        assert_eq!(store.members(liked).await, (1..=10).map(CompanyId).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn failed_reset_keeps_prior_members() {
        let (store, liked) = MemoryStore::seeded(20, &CollectionName::default());
        store.insert_members(liked, &ids(&[15])).await.unwrap();
        store.fail_resets(true).await;

        assert!(store.reset_members(liked, 10).await.is_err());
        assert_eq!(store.members(liked).await, ids(&[15]));
    }

    #[tokio::test]
    async fn collection_page_joins_known_companies() {
        let (store, liked) = MemoryStore::seeded(3, &CollectionName::default());
        store.insert_members(liked, &ids(&[3, 1, 77])).await.unwrap();

        let page = store
            .list_collection_companies(liked, PageWindow::new(0, 10))
            .await
            .unwrap();
        let listed: Vec<CompanyId> = page.items.iter().map(|c| c.id).collect();
        assert_eq!(listed, ids(&[1, 3]));
        assert_eq!(page.total, 2);

        let all = store.collection_company_ids(liked).await.unwrap();
        assert_eq!(all, ids(&[1, 3, 77]));
    }

    #[tokio::test]
    async fn listing_is_ordered_by_id() {
        let store = MemoryStore::new();
        store.add_company(CompanyId(9), "Nine").await;
        store.add_company(CompanyId(2), "Two").await;

        let page = store.list_companies(PageWindow::new(0, 10)).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Two", "Nine"]);
        assert_eq!(page.total, 2);
    }
}
