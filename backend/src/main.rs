//! Amplify Site Backend
//!
//! Bilingual marketing site with a session-authenticated content and user admin,
//! persisted in SQLite.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod pages;

use std::sync::Arc;

use axum::{
    handler::Handler,
    http::Method,
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    init_tracing(&config);

    tracing::info!("Starting Amplify site backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Store problems at startup are logged; requests report them as 500s.
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool.clone()));
    db::prepare(&repo, &config).await;

    let session_store = SqliteStore::new(pool);
    if let Err(e) = session_store.migrate().await {
        tracing::error!("Session table setup failed: {}", e);
    }

    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state, auth::session_layer(session_store, &config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);
    tracing::info!("Admin panel: http://{}/admin/login", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState, sessions: SessionManagerLayer<SqliteStore>) -> Router {
    // The content API is readable from any origin; writes stay same-origin.
    let content_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let content_routes = Router::new()
        .route(
            "/content",
            get(api::get_content).post(
                api::update_content.layer(middleware::from_fn(auth::require_api_login)),
            ),
        )
        .layer(content_cors);

    let user_routes = Router::new()
        .route("/users", get(api::list_users).post(api::create_user))
        .route("/users/{id}", put(api::update_user).delete(api::delete_user))
        .route_layer(middleware::from_fn(auth::require_api_admin));

    let panel_routes = Router::new()
        .route("/admin", get(pages::admin_panel))
        .route_layer(middleware::from_fn(auth::require_page_login));

    let user_admin_routes = Router::new()
        .route("/admin/users", get(pages::admin_users))
        .route_layer(middleware::from_fn(auth::require_page_admin));

    let public_routes = Router::new()
        .route("/", get(pages::home))
        .route("/admin/login", get(pages::login_page).post(pages::login))
        .route("/admin/logout", get(pages::logout))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", content_routes.merge(user_routes))
        .merge(panel_routes)
        .merge(user_admin_routes)
        .merge(public_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(sessions),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
