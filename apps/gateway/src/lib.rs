//! Validating pass-through in front of the ShareIt server.
//!
//! The gateway re-exposes the server's HTTP surface, rejects malformed
//! input early and forwards everything else unchanged.

pub mod client;
pub mod config;
pub mod routes;

pub use client::ServerClient;
pub use config::Config;
