use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use videoshare_server::db::DocumentStore;
use videoshare_server::queue::QueueClient;
use videoshare_server::speech::AzureSpeechClient;
use videoshare_server::storage::BlobStore;
use videoshare_server::{open_store, queue, router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "videoshare_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VideoShare Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    // Open the document store (documents + queue share one database file)
    let db = open_store(&config.database_path)?;

    let store = DocumentStore::new(db.clone());
    let blobs = BlobStore::new(&config.blob_dir, &config.public_base_url)?;
    let queue_client = QueueClient::new(db);

    if config.speech_key.is_none() || config.speech_region.is_none() {
        tracing::warn!(
            "SPEECH_KEY/SPEECH_REGION not set; transcription will run in degraded demo mode"
        );
    }
    let speech = Arc::new(AzureSpeechClient::new(
        config.speech_key.clone(),
        config.speech_region.clone(),
    ));

    let state = AppState {
        store,
        blobs,
        queue: queue_client,
        speech,
        config: config.clone(),
    };

    // Background queue worker (Web-Queue-Worker pattern)
    tokio::spawn(queue::worker::run(state.clone()));

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
