use async_trait::async_trait;
use pagination::PageRequest;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ItemResult;
use crate::models::{Comment, CreateItem, Item, NewComment};

/// Repository trait for items and their comments. Comments never outlive
/// their item, so they share the aggregate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Persist an already merged item.
    async fn save(&self, item: Item) -> ItemResult<Item>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> ItemResult<bool>;

    /// One page of an owner's items, id ascending.
    async fn by_owner(&self, owner_id: i64, page: PageRequest) -> ItemResult<Vec<Item>>;

    /// One page of available items whose name or description contains `text`,
    /// case-insensitive, id ascending.
    async fn search(&self, text: &str, page: PageRequest) -> ItemResult<Vec<Item>>;

    /// Items created in response to a request, id descending.
    async fn by_request(&self, request_id: i64) -> ItemResult<Vec<Item>>;

    async fn add_comment(&self, comment: NewComment) -> ItemResult<Comment>;

    /// Comments for an item, oldest first.
    async fn comments_for_item(&self, item_id: i64) -> ItemResult<Vec<Comment>>;
}

/// In-memory implementation used by tests and local development.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    next_item_id: i64,
    next_comment_id: i64,
    items: HashMap<i64, Item>,
    comments: Vec<Comment>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_slice<T: Clone>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect()
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;
        store.next_item_id += 1;
        let item = Item {
            id: store.next_item_id,
            name: input.name,
            description: input.description,
            available: input.available,
            owner_id,
            request_id: input.request_id,
        };
        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, owner_id, "created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn save(&self, item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;
        store.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let mut store = self.store.write().await;
        store.comments.retain(|c| c.item_id != id);
        Ok(store.items.remove(&id).is_some())
    }

    async fn by_owner(&self, owner_id: i64, page: PageRequest) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(page_slice(items, page))
    }

    async fn search(&self, text: &str, page: PageRequest) -> ItemResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let store = self.store.read().await;
        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(page_slice(items, page))
    }

    async fn by_request(&self, request_id: i64) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        let mut items: Vec<Item> = store
            .items
            .values()
            .filter(|i| i.request_id == Some(request_id))
            .cloned()
            .collect();
        items.sort_by_key(|i| std::cmp::Reverse(i.id));
        Ok(items)
    }

    async fn add_comment(&self, comment: NewComment) -> ItemResult<Comment> {
        let mut store = self.store.write().await;
        store.next_comment_id += 1;
        let comment = Comment {
            id: store.next_comment_id,
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            author_name: comment.author_name,
            created: comment.created,
        };
        store.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_for_item(&self, item_id: i64) -> ItemResult<Vec<Comment>> {
        let store = self.store.read().await;
        let mut comments: Vec<Comment> = store
            .comments
            .iter()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created);
        Ok(comments)
    }
}
