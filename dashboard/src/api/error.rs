//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use integration_dashboard_common::error::DashboardError;
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub DashboardError);

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            DashboardError::TargetNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Config(_) | DashboardError::DuplicateTarget(_) => {
                // 設定エラーは本来起動時に落ちるため、ここに届くのは異常
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DashboardError::Io(_) | DashboardError::Yaml(_) | DashboardError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let payload = json!({
            "error": self.0.to_string()
        });

        (status, Json(payload)).into_response()
    }
}
