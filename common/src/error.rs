//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブの失敗はエラーではなく `ProbeResult` のデータとして扱うため、
//! ここに現れるのは設定時の違反と読み取りAPI側の失敗のみ。

use thiserror::Error;

/// Integration Dashboard error type
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration error (startup-fatal)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Duplicate target name in configuration (startup-fatal)
    #[error("Duplicate target name: {0}")]
    DuplicateTarget(String),

    /// Target not registered
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target list parse error
    #[error("Target list parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
