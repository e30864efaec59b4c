use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;
use crate::system::auth::middleware::{require_admin, require_auth};
use crate::system::middleware::latency::simulate_latency;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    // ========================================
    // AUTH ROUTES (PUBLIC)
    // ========================================
    let public = Router::new()
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/register", post(system::handlers::auth::register))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        .route("/api/auth/refresh", post(system::handlers::auth::refresh))
        .route(
            "/api/auth/forgot-password",
            post(system::handlers::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(system::handlers::auth::reset_password),
        );

    // ========================================
    // CATALOG ROUTES (AUTHENTICATED)
    // ========================================
    let protected = Router::new()
        .route("/api/auth/me", get(system::handlers::auth::current_user))
        // A001 Category handlers
        .route(
            "/api/categories",
            get(handlers::a001_category::list_all).post(handlers::a001_category::create),
        )
        .route(
            "/api/categories/options",
            get(handlers::a001_category::options),
        )
        .route(
            "/api/categories/:id",
            get(handlers::a001_category::get_by_id)
                .put(handlers::a001_category::update)
                .delete(handlers::a001_category::delete),
        )
        .route(
            "/api/categories/:id/products",
            get(handlers::a001_category::list_products),
        )
        // A002 Product handlers
        .route(
            "/api/products",
            get(handlers::a002_product::list).post(handlers::a002_product::create),
        )
        .route("/api/products/stats", get(handlers::a002_product::stats))
        .route(
            "/api/products/:id",
            get(handlers::a002_product::get_by_id)
                .put(handlers::a002_product::update)
                .delete(handlers::a002_product::delete),
        )
        .route("/api/uploads", post(handlers::upload::upload))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Users management (admin only)
    let admin = Router::new()
        .route("/api/users", get(system::handlers::auth::list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(public)
        .merge(protected)
        .merge(admin)
        .with_state(state.clone());

    if state.config.server.simulated_latency_ms > 0 {
        tracing::info!(
            "Simulated latency enabled: {}ms",
            state.config.server.simulated_latency_ms
        );
        app = app.layer(middleware::from_fn_with_state(state, simulate_latency));
    }

    app.layer(cors)
}
