use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

/// Sea-ORM entity for the requests table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub requester_id: i64,
    pub created: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requester_id: model.requester_id,
            created: model.created,
        }
    }
}

/// ActiveModel for an insert; the id stays unset.
pub fn new_request(
    requester_id: i64,
    description: String,
    created: chrono::NaiveDateTime,
) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        description: Set(description),
        requester_id: Set(requester_id),
        created: Set(created),
    }
}
