//! ShareIt server - business logic and persistence behind the gateway.

use std::sync::Arc;

use axum_helpers::health::health_router;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_bookings::{BookingService, PgBookingRepository};
use domain_items::{BookingHistory, ItemLookup, ItemService, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::{PgUserRepository, UserLookup, UserService};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::connect_with_retry(config.postgres.clone(), None).await?;
    database::run_migrations::<migration::Migrator>(&db, &config.app.name).await?;

    let user_service = UserService::new(PgUserRepository::new(db.clone()));
    let users: Arc<dyn UserLookup> = Arc::new(user_service.clone());

    // The booking repository doubles as the booking history port so the
    // items crate never depends on the bookings crate.
    let booking_repository = PgBookingRepository::new(db.clone());
    let history: Arc<dyn BookingHistory> = Arc::new(booking_repository.clone());

    let item_service = ItemService::new(PgItemRepository::new(db.clone()), users.clone(), history);
    let items: Arc<dyn ItemLookup> = Arc::new(item_service.clone());

    let booking_service = BookingService::new(booking_repository, users.clone(), items.clone());
    let request_service = RequestService::new(
        PgRequestRepository::new(db.clone()),
        users.clone(),
        items.clone(),
    );

    let app = api::routes(user_service, item_service, booking_service, request_service)
        .merge(health_router(config.app.clone()))
        .merge(api::ready::router(db));

    info!("starting {} on port {}", config.app.name, config.server.port);

    axum_helpers::server::serve(app, &config.server).await?;

    info!("{} shutdown complete", config.app.name);
    Ok(())
}
