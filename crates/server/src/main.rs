use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use vizbroker::{InMemoryDocumentSource, MockStream, Settings, SessionManager, VisualizationStream};
use vizbroker_server::routes;
use vizbroker_server::state::AppState;

#[derive(Parser)]
#[command(name = "vizbroker-server", about = "Visualization-streaming broker HTTP surface")]
struct Args {
    /// Bind address (host:port); overrides BACKEND_IP/BACKEND_PORT when given.
    #[arg(long, short)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let settings = match Settings::load() {
        Ok(settings) => Arc::new(settings),
        Err(err) => {
            tracing::error!(error = %err, "failed to load settings");
            std::process::exit(1);
        }
    };

    let bind = args
        .bind
        .unwrap_or_else(|| format!("{}:{}", settings.backend_ip, settings.backend_port));

    let document_source = Arc::new(InMemoryDocumentSource::new());
    let stream_factory: vizbroker::manager::StreamFactory =
        Arc::new(|| Arc::new(MockStream::new()) as Arc<dyn VisualizationStream>);
    let manager = SessionManager::new(document_source, stream_factory, Arc::clone(&settings));

    let state = AppState { manager, settings };
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, bind = %bind, "failed to bind HTTP listener");
            std::process::exit(1);
        }
    };
    tracing::info!(bind = %bind, "vizbroker-server listening");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server exited with error");
    }
}
