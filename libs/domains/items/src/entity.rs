//! Sea-ORM entities for the items and comments tables.

pub mod item {
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::{NotSet, Set};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub is_available: bool,
        pub owner_id: i64,
        pub request_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::comment::Entity")]
        Comment,
    }

    impl Related<super::comment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Comment.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Item {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                description: model.description,
                available: model.is_available,
                owner_id: model.owner_id,
                request_id: model.request_id,
            }
        }
    }

    impl From<crate::models::Item> for ActiveModel {
        fn from(item: crate::models::Item) -> Self {
            ActiveModel {
                id: Set(item.id),
                name: Set(item.name),
                description: Set(item.description),
                is_available: Set(item.available),
                owner_id: Set(item.owner_id),
                request_id: Set(item.request_id),
            }
        }
    }

    /// ActiveModel for an insert; the id stays unset.
    pub fn new_item(owner_id: i64, input: crate::models::CreateItem) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            is_available: Set(input.available),
            owner_id: Set(owner_id),
            request_id: Set(input.request_id),
        }
    }
}

pub mod comment {
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::{NotSet, Set};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(column_type = "Text")]
        pub text: String,
        pub item_id: i64,
        pub author_id: i64,
        pub author_name: String,
        pub created: DateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::item::Entity",
            from = "Column::ItemId",
            to = "super::item::Column::Id"
        )]
        Item,
    }

    impl Related<super::item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Item.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Comment {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                text: model.text,
                item_id: model.item_id,
                author_id: model.author_id,
                author_name: model.author_name,
                created: model.created,
            }
        }
    }

    impl From<crate::models::NewComment> for ActiveModel {
        fn from(input: crate::models::NewComment) -> Self {
            ActiveModel {
                id: NotSet,
                text: Set(input.text),
                item_id: Set(input.item_id),
                author_id: Set(input.author_id),
                author_name: Set(input.author_name),
                created: Set(input.created),
            }
        }
    }
}
