use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "townbell=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path > TOWNBELL_CONFIG env > ~/.townbell/townbell.toml
    let config_path = std::env::var("TOWNBELL_CONFIG").ok();
    let config =
        townbell_core::config::TownbellConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            townbell_core::config::TownbellConfig::default()
        });

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    // one-time bootstrap: both clients are built exactly once and shared;
    // pipeline runs hold no state of their own
    let store: Arc<dyn townbell_store::RecordStore> =
        Arc::new(townbell_store::FirestoreStore::new(&config.store));
    let transport: Arc<dyn townbell_push::PushTransport> =
        Arc::new(townbell_push::FcmTransport::new(&config.push));
    info!(
        project = %config.store.project_id,
        "record store and push transport initialized"
    );

    let pipeline = townbell_pipeline::NotifyPipeline::new(store, transport);

    let state = Arc::new(app::AppState::new(config, pipeline));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Townbell gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
