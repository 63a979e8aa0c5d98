use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod events;
mod matching;
mod models;
mod routes;
mod schema;
mod services;
mod stores;

use config::AppConfig;
use ember_shared::clients::db::{create_pool, DbPool};
use ember_shared::clients::rabbitmq::RabbitMQClient;
use services::discovery_service::DiscoveryService;
use services::match_service::MatchService;
use services::profile_service::ProfileService;
use stores::pg::{PgLikeStore, PgMatchStore, PgProfileStore, PgUserStore};

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub rabbitmq: RabbitMQClient,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub profiles: ProfileService,
    pub discovery: DiscoveryService,
    pub matching: MatchService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ember_shared::middleware::init_tracing("ember-match");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.db_pool_size)?;
    let rabbitmq = RabbitMQClient::connect(&config.rabbitmq_url).await?;
    let metrics_handle = ember_shared::middleware::init_metrics();

    let users = Arc::new(PgUserStore::new(db.clone()));
    let profile_store = Arc::new(PgProfileStore::new(db.clone()));
    let like_store = Arc::new(PgLikeStore::new(db.clone()));
    let match_store = Arc::new(PgMatchStore::new(db.clone()));

    let state = Arc::new(AppState {
        profiles: ProfileService::new(users, profile_store.clone()),
        discovery: DiscoveryService::new(
            profile_store.clone(),
            like_store.clone(),
            match_store.clone(),
            config.require_verified,
        ),
        matching: MatchService::new(profile_store, like_store, match_store),
        db,
        config,
        rabbitmq,
        metrics_handle,
    });

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route(
            "/me",
            get(routes::profile::get_profile)
                .post(routes::profile::create_profile)
                .patch(routes::profile::update_profile)
                .delete(routes::profile::delete_profile),
        )
        .route("/profiles/discover", get(routes::discovery::discover_profiles))
        .route("/profile/:user_id", get(routes::profile::get_public_profile))
        .route(
            "/profile/:user_id/like",
            axum::routing::post(routes::likes::send_like).delete(routes::likes::remove_like),
        )
        .route("/matches", get(routes::matches::list_matches))
        .route("/likes", get(routes::likes::list_likes))
        .layer(axum::middleware::from_fn(
            ember_shared::middleware::metrics_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "ember-match starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
