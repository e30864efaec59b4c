use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::{format_elapsed, format_number};

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время, длительность, размер ответа,
/// статус, метод и путь; та же строка уходит в tracing (файл лога).
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Читаем тело ответа, чтобы узнать реальный размер
    let (bytes, size) = match to_bytes(body, usize::MAX).await {
        Ok(b) => {
            let size = format_number(b.len());
            (Some(b), size)
        }
        Err(_) => (None, "error".to_string()),
    };

    let elapsed = format_elapsed(start.elapsed());
    // Голубой для 2xx, коричневый для остальных
    let color_code = if parts.status.is_success() { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>7} | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        elapsed,
        size,
        status,
        method,
        path
    );
    tracing::debug!(%method, %path, status, size = %size, elapsed = %elapsed, "request");

    match bytes {
        Some(b) => Response::from_parts(parts, Body::from(b)),
        None => Response::from_parts(parts, Body::default()),
    }
}
