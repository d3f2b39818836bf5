//! Chainsight Gateway server binary.
//!
//! Wires the configuration, PostgreSQL pool, identity provider adapter,
//! role lookup client, and HTTP routers together, then serves until a
//! shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use chainsight_gateway::adapters::auth::{GoTrueConfig, GoTrueIdentityProvider};
use chainsight_gateway::adapters::http::{
    admin_router, auth_router, system_router, AdminAppState, AuthAppState, SystemAppState,
};
use chainsight_gateway::adapters::postgres::{PostgresAuditTrail, PostgresRoleStore};
use chainsight_gateway::adapters::roles::HttpRoleLookup;
use chainsight_gateway::application::{RedirectResolver, RoleDirectory};
use chainsight_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("database connected, migrations applied");

    // Identity provider: one adapter serves both identity ports.
    let provider = Arc::new(GoTrueIdentityProvider::new(
        GoTrueConfig::new(
            config.identity.authority.clone(),
            config.identity.audience.clone(),
            config.identity.api_key.clone(),
        )
        .with_jwks_cache_ttl(config.identity.jwks_cache_ttl()),
    ));

    let role_lookup = Arc::new(HttpRoleLookup::new(
        config.role_api.base_url.clone(),
        config.role_api.request_timeout(),
    )?);
    tracing::info!(endpoint = role_lookup.endpoint(), "role lookup configured");

    let paths = config.redirects.paths();
    let resolver = Arc::new(RedirectResolver::new(
        provider.clone(),
        provider,
        role_lookup,
        paths.clone(),
    ));

    let store = Arc::new(PostgresRoleStore::new(pool.clone()));
    let audit = Arc::new(PostgresAuditTrail::new(pool));
    let directory = Arc::new(RoleDirectory::new(store.clone(), audit, paths));

    let app = Router::new()
        .merge(system_router().with_state(SystemAppState { store }))
        .nest("/auth", auth_router().with_state(AuthAppState { resolver }))
        .nest(
            "/api/admin",
            admin_router().with_state(AdminAppState { directory }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "chainsight gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-admin-user-id"),
            HeaderName::from_static("x-admin-email"),
        ])
        .allow_credentials(true);

    if !origins.is_empty() {
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }
    cors
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
