mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_with_retry, ping, run_migrations};
