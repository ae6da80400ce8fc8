use chrono::Utc;
use std::sync::Arc;

use domain_items::ItemLookup;
use domain_users::UserLookup;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateRequest, ItemRequest, RequestItem, RequestResponse};
use crate::repository::RequestRepository;

/// Business rules for item requests.
#[derive(Clone)]
pub struct RequestService<R: RequestRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserLookup>,
    items: Arc<dyn ItemLookup>,
}

impl<R: RequestRepository> RequestService<R> {
    pub fn new(repository: R, users: Arc<dyn UserLookup>, items: Arc<dyn ItemLookup>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    async fn require_user(&self, id: i64) -> RequestResult<()> {
        self.users
            .user_by_id(id)
            .await?
            .ok_or(RequestError::UserNotFound(id))?;
        Ok(())
    }

    async fn enrich(&self, request: ItemRequest) -> RequestResult<RequestResponse> {
        let items: Vec<RequestItem> = self
            .items
            .items_by_request(request.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(RequestResponse::from_parts(request, items))
    }

    async fn enrich_all(&self, requests: Vec<ItemRequest>) -> RequestResult<Vec<RequestResponse>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.enrich(request).await?);
        }
        Ok(responses)
    }

    pub async fn create_request(
        &self,
        requester_id: i64,
        input: CreateRequest,
    ) -> RequestResult<ItemRequest> {
        self.require_user(requester_id).await?;
        let created = Utc::now().naive_utc();
        self.repository
            .create(requester_id, input.description, created)
            .await
    }

    pub async fn get_request(&self, id: i64, caller_id: i64) -> RequestResult<RequestResponse> {
        self.require_user(caller_id).await?;
        let request = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(RequestError::NotFound(id))?;
        self.enrich(request).await
    }

    /// The caller's own requests, newest first, with their items.
    pub async fn own_requests(&self, requester_id: i64) -> RequestResult<Vec<RequestResponse>> {
        self.require_user(requester_id).await?;
        let requests = self.repository.by_requester(requester_id).await?;
        self.enrich_all(requests).await
    }

    /// Other users' requests, newest first. Without a `size` the whole
    /// "not mine" listing is fetched and `from` entries are skipped; with a
    /// `size` the page plan applies.
    pub async fn other_requests(
        &self,
        requester_id: i64,
        from: i64,
        size: Option<i64>,
    ) -> RequestResult<Vec<RequestResponse>> {
        self.require_user(requester_id).await?;

        let requests = match size {
            None => {
                if from < 0 {
                    return Err(RequestError::Validation(
                        "values must not be negative".to_string(),
                    ));
                }
                self.repository
                    .by_others_all(requester_id)
                    .await?
                    .into_iter()
                    .skip(from as usize)
                    .collect()
            }
            Some(_) => {
                pagination::fetch_all(from, size, |page| {
                    let repository = Arc::clone(&self.repository);
                    async move { repository.by_others(requester_id, page).await }
                })
                .await?
            }
        };

        self.enrich_all(requests).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRequestRepository;
    use async_trait::async_trait;
    use domain_items::{Item, ItemResult};
    use domain_users::{User, UserResult};

    /// Lookup that knows users 1..=3.
    struct ThreeUsers;

    #[async_trait]
    impl UserLookup for ThreeUsers {
        async fn user_by_id(&self, id: i64) -> UserResult<Option<User>> {
            Ok(((1..=3).contains(&id)).then(|| User {
                id,
                name: format!("user-{id}"),
                email: format!("user{id}@example.com"),
            }))
        }
    }

    /// One item answers request 1.
    struct OneAnswer;

    #[async_trait]
    impl ItemLookup for OneAnswer {
        async fn item_by_id(&self, _id: i64) -> ItemResult<Option<Item>> {
            Ok(None)
        }

        async fn items_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>> {
            Ok((request_id == 1)
                .then(|| {
                    vec![Item {
                        id: 7,
                        name: "Drill".to_string(),
                        description: "Cordless".to_string(),
                        available: true,
                        owner_id: 2,
                        request_id: Some(1),
                    }]
                })
                .unwrap_or_default())
        }
    }

    fn service() -> RequestService<InMemoryRequestRepository> {
        RequestService::new(
            InMemoryRequestRepository::new(),
            Arc::new(ThreeUsers),
            Arc::new(OneAnswer),
        )
    }

    fn wish(text: &str) -> CreateRequest {
        CreateRequest {
            description: text.to_string(),
        }
    }

    #[tokio::test]
    async fn create_requires_known_user() {
        let err = service().create_request(9, wish("a drill")).await.unwrap_err();
        assert!(matches!(err, RequestError::UserNotFound(9)));
    }

    #[tokio::test]
    async fn read_is_enriched_with_answering_items() {
        let service = service();
        let request = service.create_request(1, wish("a drill")).await.unwrap();

        let response = service.get_request(request.id, 2).await.unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].name, "Drill");
    }

    #[tokio::test]
    async fn own_requests_exclude_other_users() {
        let service = service();
        service.create_request(1, wish("a drill")).await.unwrap();
        service.create_request(2, wish("a ladder")).await.unwrap();

        let own = service.own_requests(1).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].description, "a drill");
    }

    #[tokio::test]
    async fn other_requests_without_size_skip_from_entries() {
        let service = service();
        service.create_request(1, wish("one")).await.unwrap();
        service.create_request(2, wish("two")).await.unwrap();
        service.create_request(2, wish("three")).await.unwrap();

        let all = service.other_requests(3, 0, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let skipped = service.other_requests(3, 2, None).await.unwrap();
        assert_eq!(skipped.len(), 1);
    }

    #[tokio::test]
    async fn other_requests_with_size_use_page_plan() {
        let service = service();
        for i in 0..6 {
            service
                .create_request(1, wish(&format!("wish-{i}")))
                .await
                .unwrap();
        }

        // from=2, size=3: pages of 2 starting at page 1, truncated to 3.
        let page = service.other_requests(2, 2, Some(3)).await.unwrap();
        assert_eq!(page.len(), 3);

        let err = service.other_requests(2, 0, Some(0)).await.unwrap_err();
        assert_eq!(err.to_string(), "limit must not be zero");
    }
}
