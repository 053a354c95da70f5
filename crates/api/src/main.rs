use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pixgrid_core::actions::ActionService;
use pixgrid_core::cache::ResponseCache;
use pixgrid_core::mock::MockPhotoSource;
use pixgrid_core::service::PhotoService;
use pixgrid_core::source::PhotoSource;
use pixgrid_db::PgActionStore;
use pixgrid_unsplash::{UnsplashClient, UnsplashConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixgrid_api::background;
use pixgrid_api::config::ServerConfig;
use pixgrid_api::router::build_app_router;
use pixgrid_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixgrid_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        app_env = ?config.app_env,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pixgrid_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pixgrid_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pixgrid_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Photo source ---
    let source = build_photo_source(&config);
    tracing::info!(source = source.name(), "Photo source selected");

    // --- Services ---
    let cache = Arc::new(match config.cache_max_entries {
        Some(max) => ResponseCache::bounded(max),
        None => ResponseCache::new(),
    });
    let photos = Arc::new(PhotoService::new(Arc::clone(&source), Arc::clone(&cache)));
    let actions = Arc::new(ActionService::new(
        Arc::new(PgActionStore::new(pool.clone())),
        Arc::clone(&source),
    ));

    // --- Cache sweeper ---
    let sweep_cancel = CancellationToken::new();
    let sweep_handle = config.cache_sweep_secs.map(|secs| {
        tokio::spawn(background::cache_sweeper::run(
            Arc::clone(&cache),
            photos.ttl(),
            Duration::from_secs(secs),
            sweep_cancel.clone(),
        ))
    });

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        photos,
        actions,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    if let Some(handle) = sweep_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Photo cache sweeper stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Pick the photo source for this deployment mode.
///
/// Development never talks to the provider. Production requires an access
/// key and fails fast without one.
fn build_photo_source(config: &ServerConfig) -> Arc<dyn PhotoSource> {
    if config.app_env.is_development() {
        return Arc::new(MockPhotoSource);
    }

    let unsplash = UnsplashConfig::from_env();
    assert!(
        !unsplash.access_key.is_empty(),
        "UNSPLASH_ACCESS_KEY must be set outside development"
    );
    tracing::info!(
        base_url = %unsplash.base_url,
        timeout_secs = unsplash.timeout.as_secs(),
        "Unsplash client configured"
    );

    Arc::new(UnsplashClient::new(&unsplash).expect("Failed to build Unsplash HTTP client"))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
