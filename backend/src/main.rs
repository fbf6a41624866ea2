use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use talky_backend::config::{Config, LoggingConfig};
use talky_backend::services::{
    FavoriteService, GeminiClient, KakaoPlacesClient, LocationResolver, RecommendationService,
    TriggerStore,
};
use talky_backend::{AppState, create_router, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    let _guard = init_tracing(&config.logging);

    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
    db::init_schema(&pool).await?;

    let places = Arc::new(KakaoPlacesClient::new(&config.kakao));
    let triggers = Arc::new(TriggerStore::new(pool.clone()));
    let resolver = LocationResolver::new(places, triggers);
    let generator = Arc::new(GeminiClient::new(&config.google_ai));

    let state = Arc::new(AppState {
        recommendation_service: RecommendationService::new(resolver, generator),
        favorite_service: FavoriteService::new(pool),
        config: config.clone(),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Talky backend listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing; returns the appender guard that must stay alive
/// for the lifetime of the process when logging to a file.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            None
        },
    }
}
