use sea_orm::Database;
use tracing::info;

use nutrilife_api::config::ApiConfig;
use nutrilife_api::infra::uploads::FsAttachmentStore;
use nutrilife_api::router::build_router;
use nutrilife_api::state::AppState;

#[tokio::main]
async fn main() {
    nutrilife_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let attachments = FsAttachmentStore::new(config.uploads_dir.clone());
    attachments
        .ensure_dirs()
        .await
        .expect("failed to create uploads directories");

    let state = AppState { db, attachments };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
