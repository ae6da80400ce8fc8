//! Configuration for the ShareIt gateway.

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub upstream_url: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let upstream_url = env_or_default("SHAREIT_SERVER_URL", "http://localhost:9090");

        Ok(Self {
            app: app_info!(),
            server,
            upstream_url,
            environment,
        })
    }
}
