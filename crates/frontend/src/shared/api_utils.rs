//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and query strings.

use contracts::system::auth::ApiError;
use serde::Serialize;

use super::config::ClientConfig;

/// Get the base URL for API requests
///
/// Относительный `api_base_url` (например `/api`) разрешается
/// от origin текущей страницы.
pub fn api_base(config: &ClientConfig) -> String {
    let base = config.api_base_url.trim_end_matches('/');
    if base.starts_with('/') {
        format!("{}{}", page_origin(), base)
    } else {
        base.to_string()
    }
}

/// Build a full API URL from an endpoint like `products/1`
pub fn api_url(config: &ClientConfig, endpoint: &str) -> String {
    join_url(&api_base(config), endpoint)
}

/// Склеить базовый URL и endpoint ровно одним `/`
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Query string из типизированных параметров; поля `None` опускаются
pub fn query_string<Q: Serialize>(params: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(params)
        .map_err(|e| ApiError::client(format!("Failed to serialize query: {}", e)))
}

/// URL с query string (без `?`, если параметров нет)
pub fn with_query<Q: Serialize>(url: &str, params: &Q) -> Result<String, ApiError> {
    let query = query_string(params)?;
    if query.is_empty() {
        Ok(url.to_string())
    } else {
        Ok(format!("{}?{}", url, query))
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}
