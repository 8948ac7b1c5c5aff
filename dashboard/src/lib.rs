//! Integration Dashboard Server
//!
//! 多数の独立デプロイされたサービスを定期的にプローブし、
//! フリート全体のヘルス状態を集約・提供する監視サーバー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ヘルスチェック監視
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 監視対象レジストリ
pub mod registry;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// Cooperative shutdown controller
pub mod shutdown;

/// ステータスストア
pub mod store;

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 監視対象レジストリ（起動後は読み取り専用）
    pub registry: Arc<registry::TargetRegistry>,
    /// 最新ヘルス状態のストア
    pub store: store::StatusStore,
    /// 監視エンジンの統計（サイクル完了数・スキップ数）
    pub stats: health::MonitorStats,
    /// シャットダウンコントローラー
    pub shutdown: shutdown::ShutdownController,
    /// プロセス起動時刻
    pub started_at: DateTime<Utc>,
}
