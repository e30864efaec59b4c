pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod state;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server address: {e}"))?;

    let state = state::AppState::from_config(config)?;
    let app = routes::configure_routes(state).layer(middleware::from_fn(
        system::middleware::request_logger::request_logger,
    ));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Catalog API listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
