use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Искусственная задержка ответа (эмуляция сети)
///
/// Подключается только при `server.simulated_latency_ms > 0`.
pub async fn simulate_latency(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let delay = state.config.server.simulated_latency_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    next.run(req).await
}
