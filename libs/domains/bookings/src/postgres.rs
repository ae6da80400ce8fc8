use async_trait::async_trait;
use chrono::NaiveDateTime;
use pagination::PageRequest;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use domain_items::{entity::item, BookingBrief, ItemError, ItemResult};

use crate::{
    entity,
    error::{BookingError, BookingResult},
    models::{Booking, BookingState, BookingStatus, NewBooking},
    repository::BookingRepository,
};

/// PostgreSQL-backed implementation of [`BookingRepository`].
#[derive(Clone)]
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_state(
    query: Select<entity::Entity>,
    state: BookingState,
    now: NaiveDateTime,
) -> Select<entity::Entity> {
    match state {
        BookingState::All => query,
        BookingState::Current => query
            .filter(entity::Column::StartDate.lte(now))
            .filter(entity::Column::EndDate.gte(now)),
        BookingState::Past => query.filter(entity::Column::EndDate.lt(now)),
        BookingState::Future => query.filter(entity::Column::StartDate.gt(now)),
        BookingState::Waiting => query.filter(entity::Column::Status.eq(BookingStatus::Waiting)),
        BookingState::Rejected => query.filter(entity::Column::Status.eq(BookingStatus::Rejected)),
    }
}

async fn fetch_page(
    db: &DatabaseConnection,
    query: Select<entity::Entity>,
    page: PageRequest,
) -> BookingResult<Vec<Booking>> {
    let models = query
        .order_by_desc(entity::Column::StartDate)
        .paginate(db, page.size)
        .fetch_page(page.index)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, input: NewBooking) -> BookingResult<Booking> {
        let active: entity::ActiveModel = input.into();
        let model = active.insert(&self.db).await?;

        tracing::info!(booking_id = model.id, item_id = model.item_id, "created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn set_status(&self, id: i64, status: BookingStatus) -> BookingResult<Booking> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BookingError::NotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        active.status = Set(status);
        let model = active.update(&self.db).await?;
        Ok(model.into())
    }

    async fn by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        let query = apply_state(
            entity::Entity::find().filter(entity::Column::BookerId.eq(booker_id)),
            state,
            now,
        );
        fetch_page(&self.db, query, page).await
    }

    async fn by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        now: NaiveDateTime,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        let query = apply_state(
            entity::Entity::find()
                .inner_join(item::Entity)
                .filter(item::Column::OwnerId.eq(owner_id)),
            state,
            now,
        );
        fetch_page(&self.db, query, page).await
    }
}

fn brief(model: entity::Model) -> BookingBrief {
    BookingBrief {
        id: model.id,
        booker_id: model.booker_id,
    }
}

#[async_trait]
impl domain_items::BookingHistory for PgBookingRepository {
    async fn last_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
            .filter(entity::Column::StartDate.lt(now))
            .order_by_desc(entity::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?;
        Ok(model.map(brief))
    }

    async fn next_for_item(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
            .filter(entity::Column::StartDate.gt(now))
            .order_by_asc(entity::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?;
        Ok(model.map(brief))
    }

    async fn finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::BookerId.eq(booker_id))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
            .filter(entity::Column::EndDate.lt(now))
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?;
        Ok(model.map(brief))
    }
}
