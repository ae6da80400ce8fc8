pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

pub use errors::{ApiError, ErrorResponse};
pub use extractors::{SharerId, ValidatedJson};
