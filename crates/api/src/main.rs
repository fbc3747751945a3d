use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use masthead_api::config::ServerConfig;
use masthead_api::notifications::Notifier;
use masthead_api::router::build_app_router;
use masthead_api::state::AppState;
use masthead_core::editorial::EditorialService;
use masthead_core::settings::SettingsCache;
use masthead_db::PgEditorialStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masthead_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = masthead_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    masthead_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    masthead_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let notifier = Arc::new(Notifier::new());
    let service = Arc::new(EditorialService::new(
        PgEditorialStore::new(pool.clone()),
        notifier.clone(),
    ));
    let settings_cache = Arc::new(SettingsCache::new(Duration::from_secs(
        config.settings_cache_ttl_secs,
    )));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        service,
        settings_cache,
        notifier,
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
