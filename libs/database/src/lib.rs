//! PostgreSQL connectivity for the ShareIt services.
//!
//! Wraps SeaORM connection setup, migrations and retry policy behind a
//! small module so the binaries only deal with `PostgresConfig`.

pub mod common;
pub mod postgres;

pub use common::{retry_with_backoff, RetryConfig};
pub use postgres::{connect_from_config, connect_with_retry, ping, run_migrations, PostgresConfig};
