//! Item requests domain: wishes for items not yet listed, enriched on read
//! with the items that were created in response.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateRequest, ItemRequest, RequestItem, RequestResponse};
pub use postgres::PgRequestRepository;
pub use repository::{InMemoryRequestRepository, RequestRepository};
pub use service::RequestService;
