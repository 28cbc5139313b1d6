//! PadelClub Server - padel court booking and club management
//!
//! REST API for the admin panel and the public booking flow.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padelclub_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("padelclub_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PadelClub Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let config = Arc::new(config);
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.clone());

    // Create application state
    let state = AppState {
        config,
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public reservations are throttled per client IP: one token every two
    // minutes with a burst of 30, roughly 30 reservations per hour.
    let governor_config = Box::new(
        GovernorConfigBuilder::default()
            .per_second(120)
            .burst_size(30)
            .finish()
            .expect("Invalid rate limit configuration"),
    );
    let throttle = GovernorLayer {
        config: Box::leak(governor_config),
    };

    let public_routes = Router::new()
        .route("/public/courts", get(api::public::courts))
        .route("/public/configuration", get(api::public::configuration))
        .route("/public/available-slots", get(api::public::available_slots))
        .route(
            "/public/bookings",
            post(api::public::create_booking).route_layer(throttle),
        )
        .route("/public/bookings/search", get(api::public::search_bookings))
        .route("/public/bookings/verify", get(api::public::verify_token))
        .route("/public/bookings/cancel", post(api::public::cancel_by_token))
        .route("/public/bookings/cancel-by-id", post(api::public::cancel_by_id));

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me).patch(api::auth::update_profile))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/calendar", get(api::bookings::calendar))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", patch(api::bookings::update_booking))
        .route("/bookings/:id/cancel", patch(api::bookings::cancel_booking))
        .route("/bookings/:id/close", post(api::bookings::close_booking))
        .route("/bookings/:id/closure", get(api::bookings::get_closure))
        // Courts
        .route("/courts", get(api::courts::list_courts))
        .route("/courts", post(api::courts::create_court))
        .route("/courts/:id", get(api::courts::get_court))
        .route("/courts/:id", put(api::courts::update_court))
        .route("/courts/:id/toggle_active", patch(api::courts::toggle_court_active))
        // Products
        .route("/products", get(api::products::list_products))
        .route("/products", post(api::products::create_product))
        .route("/products/:id", get(api::products::get_product))
        .route("/products/:id", put(api::products::update_product))
        .route("/products/:id", delete(api::products::delete_product))
        // Consumptions
        .route("/consumptions", get(api::consumptions::list_consumptions))
        .route("/consumptions", post(api::consumptions::create_consumption))
        .route("/consumptions/:id", delete(api::consumptions::delete_consumption))
        // Notifications
        .route("/notifications", get(api::notifications::list_notifications))
        .route("/notifications/unread-count", get(api::notifications::unread_count))
        .route("/notifications/:id/read", patch(api::notifications::mark_read))
        .route("/notifications/mark-all-read", post(api::notifications::mark_all_read))
        // Reports
        .route("/reports/daily-summary", get(api::reports::daily_summary))
        .route("/reports/history", get(api::reports::history))
        // Configuration
        .route(
            "/config",
            get(api::schedule::get_schedule)
                .patch(api::schedule::update_schedule)
                .put(api::schedule::update_schedule),
        )
        .route("/config/courts", get(api::courts::list_config_courts))
        .route(
            "/config/courts/:id/price",
            patch(api::courts::update_court_price),
        )
        // Public booking flow
        .merge(public_routes)
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
