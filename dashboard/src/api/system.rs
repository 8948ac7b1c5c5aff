//! System API (service info / monitor statistics).

use crate::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// システム情報レスポンス
#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    /// サービスバージョン
    pub version: String,
    /// 稼働秒数
    pub uptime_seconds: i64,
    /// 監視対象数
    pub target_count: usize,
    /// 完了したポーリングサイクル数
    pub cycles_completed: u64,
    /// スキップされたティック数（前サイクル未完了による）
    pub cycles_skipped: u64,
    /// 直近のサイクル開始時刻
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cycle_started_at: Option<DateTime<Utc>>,
}

/// GET /api/system
pub async fn get_system(State(state): State<AppState>) -> Json<SystemInfoResponse> {
    Json(SystemInfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        target_count: state.registry.len(),
        cycles_completed: state.stats.cycles_completed(),
        cycles_skipped: state.stats.cycles_skipped(),
        last_cycle_started_at: state.stats.last_cycle_started_at(),
    })
}
