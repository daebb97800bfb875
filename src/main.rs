use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use panic_intake::config::PanicConfig;
use panic_intake::intake::handlers::handle_create_panic;
use panic_intake::intake::service::IntakeService;
use panic_intake::lookup::handlers::handle_get_panic;
use panic_intake::lookup::service::LookupService;
use panic_intake::queue::memory::MemoryQueue;
use panic_intake::store::memory::MemoryStore;
use panic_intake::worker::consumer::QueueConsumer;
use panic_intake::worker::processor::PanicProcessor;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:8080".parse()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Configuration: both endpoints must resolve before requests can
    // succeed. The process still boots without them so the services can
    // surface the internal-error contract instead of silently dying.
    let config = PanicConfig::from_env();
    match (&config.table_name, &config.queue_url) {
        (Some(table), Some(queue_url)) => {
            tracing::info!("Record store table: {}", table);
            tracing::info!("Queue destination: {}", queue_url);
        }
        _ => {
            tracing::error!(
                "Missing configuration ({} / {}), requests will be answered with internal errors",
                panic_intake::config::TABLE_NAME_VAR,
                panic_intake::config::QUEUE_URL_VAR
            );
        }
    }

    // 2. Shared resources:
    let store = MemoryStore::new(config.table_name.as_deref().unwrap_or("PanicEventsTable"));
    let queue = MemoryQueue::new(
        config
            .queue_url
            .as_deref()
            .unwrap_or("memory://PanicProcessingQueue"),
    );

    // 3. Services:
    let intake = IntakeService::new(store.clone(), queue.clone(), config.clone());
    let lookup = LookupService::new(store.clone(), config.clone());
    let processor = PanicProcessor::new(store.clone(), config.clone());

    // 4. Start the queue consumer:
    let consumer = QueueConsumer::new(queue.clone(), processor);
    let _consumer_task = consumer.start();

    // 5. HTTP Router:
    let app = Router::new()
        .route("/panic", post(handle_create_panic::<MemoryStore, MemoryQueue>))
        .route("/panic/:id", get(handle_get_panic::<MemoryStore>))
        .layer(Extension(intake))
        .layer(Extension(lookup));

    // 6. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
