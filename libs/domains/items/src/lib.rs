//! Items domain: listed items, their comments, and the `ItemLookup` and
//! `BookingHistory` ports tying items to bookings without a crate cycle.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingBrief, Comment, CommentResponse, CreateComment, CreateItem, Item, ItemResponse,
    NewComment, UpdateItem,
};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::{BookingHistory, ItemLookup, ItemService};
