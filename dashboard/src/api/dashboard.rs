//! ダッシュボードAPIハンドラー
//!
//! `/api/dashboard/*` 系のエンドポイントを提供し、監視対象の最新
//! ヘルス状態およびフリート集計を返却する。

use super::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use integration_dashboard_common::error::DashboardError;
use integration_dashboard_common::types::{FleetSummary, IntegrationStatus};

/// GET /api/dashboard/integrations
///
/// 全監視対象の最新ステータスを名前順で返す。
pub async fn list_integrations(State(state): State<AppState>) -> Json<Vec<IntegrationStatus>> {
    Json(state.store.list().await)
}

/// GET /api/dashboard/integrations/:name
///
/// 単一対象の最新ステータスを返す。未登録の名前は404。
pub async fn get_integration(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<IntegrationStatus>, AppError> {
    let status = state
        .store
        .get(&name)
        .await
        .ok_or_else(|| DashboardError::TargetNotFound(name))?;

    Ok(Json(status))
}

/// GET /api/dashboard/summary
///
/// フリート全体のサマリーを返す。
pub async fn get_summary(State(state): State<AppState>) -> Json<FleetSummary> {
    Json(state.store.summary().await)
}
