use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_server::network::Network;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = AppState::new(Network::new());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Metro network server listening on http://{addr}");
    info!("  POST   /stations             - register a station");
    info!("  GET    /stations             - list stations");
    info!("  DELETE /stations/:id         - delete a station");
    info!("  POST   /lines                - register a line with its first section");
    info!("  GET    /lines                - list lines");
    info!("  POST   /lines/:id/sections   - add a section to a line");
    info!("  DELETE /lines/:id/sections   - remove a station from a line");
    info!("  GET    /paths                - shortest path between two stations");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}
