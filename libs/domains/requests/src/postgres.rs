use async_trait::async_trait;
use chrono::NaiveDateTime;
use pagination::PageRequest;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::RequestResult,
    models::ItemRequest,
    repository::RequestRepository,
};

/// PostgreSQL-backed implementation of [`RequestRepository`].
#[derive(Clone)]
pub struct PgRequestRepository {
    db: DatabaseConnection,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(
        &self,
        requester_id: i64,
        description: String,
        created: NaiveDateTime,
    ) -> RequestResult<ItemRequest> {
        let model = entity::new_request(requester_id, description, created)
            .insert(&self.db)
            .await?;

        tracing::info!(request_id = model.id, requester_id, "created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> RequestResult<Option<ItemRequest>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn by_requester(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.eq(requester_id))
            .order_by_desc(entity::Column::Created)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn by_others(
        &self,
        requester_id: i64,
        page: PageRequest,
    ) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.ne(requester_id))
            .order_by_desc(entity::Column::Created)
            .paginate(&self.db, page.size)
            .fetch_page(page.index)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn by_others_all(&self, requester_id: i64) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.ne(requester_id))
            .order_by_desc(entity::Column::Created)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
