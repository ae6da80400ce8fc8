use async_trait::async_trait;
use pagination::PageRequest;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    entity::{comment, item},
    error::ItemResult,
    models::{Comment, CreateItem, Item, NewComment},
    repository::ItemRepository,
};

/// PostgreSQL-backed implementation of [`ItemRepository`].
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        let model = item::new_item(owner_id, input).insert(&self.db).await?;

        tracing::info!(item_id = model.id, owner_id, "created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, item: Item) -> ItemResult<Item> {
        let active: item::ActiveModel = item.into();
        let model = active.update(&self.db).await?;
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let result = item::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn by_owner(&self, owner_id: i64, page: PageRequest) -> ItemResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id)
            .paginate(&self.db, page.size)
            .fetch_page(page.index)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search(&self, text: &str, page: PageRequest) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());
        let models = item::Entity::find()
            .filter(item::Column::IsAvailable.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            item::Entity,
                            item::Column::Name,
                        ))))
                        .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            item::Entity,
                            item::Column::Description,
                        ))))
                        .like(&pattern),
                    ),
            )
            .order_by_asc(item::Column::Id)
            .paginate(&self.db, page.size)
            .fetch_page(page.index)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn by_request(&self, request_id: i64) -> ItemResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::RequestId.eq(request_id))
            .order_by_desc(item::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_comment(&self, new_comment: NewComment) -> ItemResult<Comment> {
        let active: comment::ActiveModel = new_comment.into();
        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn comments_for_item(&self, item_id: i64) -> ItemResult<Vec<Comment>> {
        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_asc(comment::Column::Created)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
