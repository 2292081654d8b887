mod config;
mod errors;
mod paths;
mod redirect;
mod routes;
mod storage;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use config::AppConfig;
use paths::PathGuard;
use redirect::RedirectResolver;
use storage::DirectoryStore;

#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<PathGuard>,
    pub store: Arc<DirectoryStore>,
    pub redirects: Arc<RedirectResolver>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "imagedepot_server=debug,tower_http=debug".parse().unwrap()
            }),
        )
        .init();

    let config = AppConfig::load();

    let store = DirectoryStore::open(&config.storage.root)
        .await
        .expect("Failed to prepare storage root");
    let root = store.root().to_path_buf();

    let state = AppState {
        guard: Arc::new(PathGuard::new(root.clone())),
        store: Arc::new(store),
        redirects: Arc::new(RedirectResolver::new(root.clone())),
    };

    let app = routes::upload_routes::router(config.storage.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Image depot gateway listening on http://{addr}, storing under {}",
        root.display()
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
