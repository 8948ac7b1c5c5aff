//! REST APIハンドラー
//!
//! `/api/dashboard/*` の読み取り専用クエリと `/api/system` を提供する。
//! ハンドラーはストアのスナップショットを返すだけで、プローブは
//! 一切発行しない。

pub mod dashboard;
pub mod error;
pub mod system;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// APIルーターを構築する
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/dashboard/integrations",
            get(dashboard::list_integrations),
        )
        .route(
            "/api/dashboard/integrations/:name",
            get(dashboard::get_integration),
        )
        .route("/api/dashboard/summary", get(dashboard::get_summary))
        .route("/api/system", get(system::get_system))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
