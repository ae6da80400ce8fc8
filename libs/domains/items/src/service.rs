use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;

use domain_users::UserLookup;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    BookingBrief, CommentResponse, CreateComment, CreateItem, Item, ItemResponse, NewComment,
    UpdateItem,
};
use crate::repository::ItemRepository;

/// Port consumed by the bookings and requests domains.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    async fn item_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Items created in response to a request, id descending.
    async fn items_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>>;
}

/// Port implemented by the bookings domain. Lets item reads carry booking
/// information without the items crate depending on bookings.
#[async_trait]
pub trait BookingHistory: Send + Sync {
    /// Most recent approved booking that started before `now`.
    async fn last_for_item(&self, item_id: i64, now: NaiveDateTime)
        -> ItemResult<Option<BookingBrief>>;

    /// Soonest approved booking that starts after `now`.
    async fn next_for_item(&self, item_id: i64, now: NaiveDateTime)
        -> ItemResult<Option<BookingBrief>>;

    /// An approved booking of `item_id` by `booker_id` that ended before
    /// `now`, if any. Gates comment creation.
    async fn finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>>;
}

/// Business rules for items and comments.
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserLookup>,
    bookings: Arc<dyn BookingHistory>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R, users: Arc<dyn UserLookup>, bookings: Arc<dyn BookingHistory>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            bookings,
        }
    }

    async fn require_user(&self, id: i64) -> ItemResult<domain_users::User> {
        self.users
            .user_by_id(id)
            .await?
            .ok_or(ItemError::UserNotFound(id))
    }

    async fn require_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    async fn enrich(&self, item: Item, with_bookings: bool) -> ItemResult<ItemResponse> {
        let comments: Vec<CommentResponse> = self
            .repository
            .comments_for_item(item.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let (last_booking, next_booking) = if with_bookings {
            let now = Utc::now().naive_utc();
            (
                self.bookings.last_for_item(item.id, now).await?,
                self.bookings.next_for_item(item.id, now).await?,
            )
        } else {
            (None, None)
        };

        Ok(ItemResponse::from_parts(
            item,
            last_booking,
            next_booking,
            comments,
        ))
    }

    pub async fn create_item(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        self.require_user(owner_id).await?;
        self.repository.create(owner_id, input).await
    }

    /// Read a single item. The owner additionally sees the last and next
    /// approved bookings.
    pub async fn get_item(&self, id: i64, caller_id: i64) -> ItemResult<ItemResponse> {
        let item = self.require_item(id).await?;
        let is_owner = item.owner_id == caller_id;
        self.enrich(item, is_owner).await
    }

    /// The caller's own items, id ascending, with booking info and comments.
    pub async fn items_by_owner(
        &self,
        owner_id: i64,
        from: i64,
        size: Option<i64>,
    ) -> ItemResult<Vec<ItemResponse>> {
        self.require_user(owner_id).await?;

        let items = pagination::fetch_all(from, size, |page| {
            let repository = Arc::clone(&self.repository);
            async move { repository.by_owner(owner_id, page).await }
        })
        .await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.enrich(item, true).await?);
        }
        Ok(responses)
    }

    pub async fn update_item(
        &self,
        id: i64,
        caller_id: i64,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        let mut item = self.require_item(id).await?;

        if item.owner_id != caller_id {
            return Err(ItemError::Forbidden(
                "only the owner can edit the item".to_string(),
            ));
        }

        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(ItemError::Validation("name cannot be blank".to_string()));
            }
            item.name = name;
        }
        if let Some(description) = input.description {
            if description.trim().is_empty() {
                return Err(ItemError::Validation(
                    "description cannot be blank".to_string(),
                ));
            }
            item.description = description;
        }
        if let Some(available) = input.available {
            item.available = available;
        }
        if let Some(request_id) = input.request_id {
            item.request_id = Some(request_id);
        }

        self.repository.save(item).await
    }

    pub async fn delete_item(&self, id: i64, caller_id: i64) -> ItemResult<()> {
        let item = self.require_item(id).await?;

        if item.owner_id != caller_id {
            return Err(ItemError::Forbidden(
                "only the owner can delete the item".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        Ok(())
    }

    /// Case-insensitive substring search over available items. Blank text
    /// short-circuits to an empty list. Results carry comments but no
    /// booking info.
    pub async fn search_items(
        &self,
        text: &str,
        from: i64,
        size: Option<i64>,
    ) -> ItemResult<Vec<ItemResponse>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items = pagination::fetch_all(from, size, |page| {
            let repository = Arc::clone(&self.repository);
            let text = text.to_string();
            async move { repository.search(&text, page).await }
        })
        .await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.enrich(item, false).await?);
        }
        Ok(responses)
    }

    /// Leave a comment on an item. Only allowed for a user whose approved
    /// booking of the item has already ended.
    pub async fn add_comment(
        &self,
        item_id: i64,
        author_id: i64,
        input: CreateComment,
    ) -> ItemResult<CommentResponse> {
        let author = self.require_user(author_id).await?;
        let item = self.require_item(item_id).await?;

        let now = Utc::now().naive_utc();
        if self
            .bookings
            .finished_booking(item.id, author.id, now)
            .await?
            .is_none()
        {
            return Err(ItemError::Validation(
                "the item has not been booked by this user".to_string(),
            ));
        }

        let comment = self
            .repository
            .add_comment(NewComment {
                text: input.text,
                item_id: item.id,
                author_id: author.id,
                author_name: author.name,
                created: now,
            })
            .await?;

        Ok(comment.into())
    }
}

#[async_trait]
impl<R: ItemRepository> ItemLookup for ItemService<R> {
    async fn item_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        self.repository.get_by_id(id).await
    }

    async fn items_by_request(&self, request_id: i64) -> ItemResult<Vec<Item>> {
        self.repository.by_request(request_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryItemRepository;
    use domain_users::{User, UserResult};

    /// Lookup that knows users 1 and 2.
    struct TwoUsers;

    #[async_trait]
    impl UserLookup for TwoUsers {
        async fn user_by_id(&self, id: i64) -> UserResult<Option<User>> {
            Ok((id == 1 || id == 2).then(|| User {
                id,
                name: format!("user-{id}"),
                email: format!("user{id}@example.com"),
            }))
        }
    }

    /// History that reports a finished booking of item 1 by user 2 only.
    struct FixedHistory;

    #[async_trait]
    impl BookingHistory for FixedHistory {
        async fn last_for_item(
            &self,
            item_id: i64,
            _now: NaiveDateTime,
        ) -> ItemResult<Option<BookingBrief>> {
            Ok((item_id == 1).then_some(BookingBrief {
                id: 10,
                booker_id: 2,
            }))
        }

        async fn next_for_item(
            &self,
            _item_id: i64,
            _now: NaiveDateTime,
        ) -> ItemResult<Option<BookingBrief>> {
            Ok(None)
        }

        async fn finished_booking(
            &self,
            item_id: i64,
            booker_id: i64,
            _now: NaiveDateTime,
        ) -> ItemResult<Option<BookingBrief>> {
            Ok((item_id == 1 && booker_id == 2).then_some(BookingBrief {
                id: 10,
                booker_id,
            }))
        }
    }

    fn service() -> ItemService<InMemoryItemRepository> {
        ItemService::new(
            InMemoryItemRepository::new(),
            Arc::new(TwoUsers),
            Arc::new(FixedHistory),
        )
    }

    fn drill() -> CreateItem {
        CreateItem {
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            request_id: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner() {
        let err = service().create_item(99, drill()).await.unwrap_err();
        assert!(matches!(err, ItemError::UserNotFound(99)));
    }

    #[tokio::test]
    async fn owner_sees_bookings_on_read() {
        let service = service();
        let item = service.create_item(1, drill()).await.unwrap();

        let owner_view = service.get_item(item.id, 1).await.unwrap();
        assert_eq!(
            owner_view.last_booking,
            Some(BookingBrief {
                id: 10,
                booker_id: 2
            })
        );

        let other_view = service.get_item(item.id, 2).await.unwrap();
        assert_eq!(other_view.last_booking, None);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let service = service();
        let item = service.create_item(1, drill()).await.unwrap();

        let err = service
            .update_item(item.id, 2, UpdateItem::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn update_rejects_blank_name_but_preserves_absent_fields() {
        let service = service();
        let item = service.create_item(1, drill()).await.unwrap();

        let err = service
            .update_item(
                item.id,
                1,
                UpdateItem {
                    name: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name cannot be blank");

        let updated = service
            .update_item(
                item.id,
                1,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Drill");
        assert!(!updated.available);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_skips_unavailable() {
        let service = service();
        service.create_item(1, drill()).await.unwrap();
        service
            .create_item(
                1,
                CreateItem {
                    name: "Broken dRiLl".to_string(),
                    description: "Do not rent".to_string(),
                    available: false,
                    request_id: None,
                },
            )
            .await
            .unwrap();

        let found = service.search_items("DRILL", 0, None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Drill");

        let blank = service.search_items("   ", 0, None).await.unwrap();
        assert!(blank.is_empty());
    }

    #[tokio::test]
    async fn comment_requires_finished_booking() {
        let service = service();
        let item = service.create_item(1, drill()).await.unwrap();

        let err = service
            .add_comment(
                item.id,
                1,
                CreateComment {
                    text: "mine anyway".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Validation(_)));

        let comment = service
            .add_comment(
                item.id,
                2,
                CreateComment {
                    text: "worked great".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(comment.author_name, "user-2");
    }
}
