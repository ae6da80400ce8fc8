//! ShareIt gateway - validating pass-through in front of the server.

use axum_helpers::health::health_router;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

use shareit_gateway::routes;
use shareit_gateway::{Config, ServerClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let client = ServerClient::new(config.upstream_url.clone());
    let app = routes::routes(client).merge(health_router(config.app.clone()));

    info!(
        "starting {} on port {}, forwarding to {}",
        config.app.name, config.server.port, config.upstream_url
    );

    axum_helpers::server::serve(app, &config.server).await?;

    info!("{} shutdown complete", config.app.name);
    Ok(())
}
