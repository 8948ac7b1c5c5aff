//! 共通型定義
//!
//! Target, IntegrationStatus, ProbeResult等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 監視対象サービスの稼働状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 稼働中
    Up,
    /// 停止中（到達不能・エラー応答・タイムアウト）
    Down,
    /// 未確認（初回チェック前、またはチェック不能な設定）
    #[default]
    Unknown,
}

impl HealthStatus {
    /// HealthStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }

    /// 集計時の深刻度（Down > Unknown > Up）
    pub fn severity(&self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Unknown => 1,
            Self::Down => 2,
        }
    }
}

impl FromStr for HealthStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 監視対象
///
/// 監視するサービスエンドポイントを表す不変のディスクリプタ。
/// 起動時に設定から生成され、プロセス稼働中は追加・削除されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// 表示名（フリート内で一意なキー）
    pub name: String,
    /// カテゴリ（例: "Security", "Database", "Observability"）
    pub category: String,
    /// ヘルスチェックURL（例: `http://localhost:8200/v1/sys/health`）
    ///
    /// 未設定の場合は `port` へのTCP接続チェックにフォールバックする。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ポート番号（URLがないサービスのTCP接続チェック用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Target {
    /// 新しい監視対象を作成
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            url: None,
            port: None,
        }
    }

    /// ヘルスチェックURLを設定
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// TCPチェック用ポートを設定
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

/// 1回のプローブの結果
///
/// プローブはいかなる失敗も呼び出し元へ伝播させず、
/// 常にこの型へ分類して返す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    /// 分類結果
    pub status: HealthStatus,
    /// 詳細メッセージ（エラーテキスト等）
    pub message: String,
    /// 応答時間（ミリ秒、プローブが完了しなかった場合は欠損）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ProbeResult {
    /// 成功（UP）の結果を作成
    pub fn up(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Up,
            message: message.into(),
            response_time_ms: Some(response_time_ms),
        }
    }

    /// 失敗（DOWN）の結果を作成
    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Down,
            message: message.into(),
            response_time_ms: None,
        }
    }

    /// 応答は得られたが失敗を示した場合（DOWN、応答時間あり）
    pub fn down_with_latency(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Down,
            message: message.into(),
            response_time_ms: Some(response_time_ms),
        }
    }

    /// 判定不能（UNKNOWN）の結果を作成
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unknown,
            message: message.into(),
            response_time_ms: None,
        }
    }
}

/// 監視対象ごとの最新ヘルス記録
///
/// Status Storeが対象名ごとに1件だけ保持し、サイクル完了ごとに
/// 丸ごと置き換える。`last_checked` は対象ごとに単調非減少。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrationStatus {
    /// 対象名
    pub name: String,
    /// カテゴリ
    pub category: String,
    /// ヘルスチェックURL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// ポート番号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// 稼働状態
    pub status: HealthStatus,
    /// 詳細メッセージ
    pub message: String,
    /// 最後に完了したプローブのサイクル開始時刻
    pub last_checked: DateTime<Utc>,
    /// 応答時間（ミリ秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl IntegrationStatus {
    /// 初回チェック前のレコードを作成（状態はUNKNOWN）
    pub fn awaiting(target: &Target, at: DateTime<Utc>) -> Self {
        Self {
            name: target.name.clone(),
            category: target.category.clone(),
            url: target.url.clone(),
            port: target.port,
            status: HealthStatus::Unknown,
            message: "awaiting first probe".to_string(),
            last_checked: at,
            response_time_ms: None,
        }
    }

    /// プローブ結果からレコードを作成
    ///
    /// `checked_at` にはサイクルの開始時刻を渡す。
    pub fn from_probe(target: &Target, result: ProbeResult, checked_at: DateTime<Utc>) -> Self {
        Self {
            name: target.name.clone(),
            category: target.category.clone(),
            url: target.url.clone(),
            port: target.port,
            status: result.status,
            message: result.message,
            last_checked: checked_at,
            response_time_ms: result.response_time_ms,
        }
    }
}

/// フリート全体の集計サマリー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FleetSummary {
    /// 監視対象総数
    pub total: usize,
    /// UPの数
    pub up: usize,
    /// DOWNの数
    pub down: usize,
    /// UNKNOWNの数
    pub unknown: usize,
    /// 最悪の状態（DOWN > UNKNOWN > UP）
    pub worst_status: HealthStatus,
    /// 最も古い `last_checked`（対象が1件もない場合はなし）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_last_checked: Option<DateTime<Utc>>,
}
