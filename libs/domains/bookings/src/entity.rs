use crate::models::BookingStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

/// Sea-ORM entity for the bookings table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_items::entity::item::Entity",
        from = "Column::ItemId",
        to = "domain_items::entity::item::Column::Id"
    )]
    Item,
}

impl Related<domain_items::entity::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            booker_id: model.booker_id,
            start: model.start_date,
            end: model.end_date,
            status: model.status,
        }
    }
}

impl From<crate::models::NewBooking> for ActiveModel {
    fn from(input: crate::models::NewBooking) -> Self {
        ActiveModel {
            id: NotSet,
            start_date: Set(input.start),
            end_date: Set(input.end),
            item_id: Set(input.item_id),
            booker_id: Set(input.booker_id),
            status: Set(BookingStatus::Waiting),
        }
    }
}
