use async_trait::async_trait;
use chrono::NaiveDateTime;
use pagination::PageRequest;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::RequestResult;
use crate::models::ItemRequest;

/// Repository trait for item-request persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn create(
        &self,
        requester_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest>;

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>>;

    /// The requester's own requests, created descending.
    async fn by_requester(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>>;

    /// One page of other users' requests, created descending.
    async fn by_others(
        &self,
        requester_id: i64,
        page: PageRequest,
    ) -> RequestResult<Vec<ItemRequest>>;

    /// All other users' requests, created descending, unpaged.
    async fn by_others_all(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>>;
}

/// In-memory implementation used by tests and local development.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequestRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    requests: HashMap<i64, ItemRequest>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn others_sorted(&self, requester_id: i64) -> Vec<ItemRequest> {
        let store = self.store.read().await;
        let mut requests: Vec<ItemRequest> = store
            .requests
            .values()
            .filter(|r| r.requester_id != requester_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        requests
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn create(
        &self,
        requester_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let request = ItemRequest {
            id: store.next_id,
            description,
            requester_id,
            created,
        };
        store.requests.insert(request.id, request.clone());

        tracing::info!(request_id = request.id, requester_id, "created item request");
        Ok(request)
    }

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        let store = self.store.read().await;
        Ok(store.requests.get(&id).cloned())
    }

    async fn by_requester(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let store = self.store.read().await;
        let mut requests: Vec<ItemRequest> = store
            .requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(requests)
    }

    async fn by_others(
        &self,
        requester_id: i64,
        page: PageRequest,
    ) -> RequestResult<Vec<ItemRequest>> {
        Ok(self
            .others_sorted(requester_id)
            .await
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect())
    }

    async fn by_others_all(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>> {
        Ok(self.others_sorted(requester_id).await)
    }
}
