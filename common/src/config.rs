//! 設定管理
//!
//! DashboardConfig, MonitorConfig等の設定構造体と監視対象リストの読み込み

use crate::error::DashboardError;
use crate::types::Target;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// ダッシュボードサーバー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8095)
    #[serde(default = "default_port")]
    pub port: u16,

    /// 監視対象リストのファイルパス (デフォルト: "targets.yaml")
    #[serde(default = "default_targets_file")]
    pub targets_file: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8095
}

fn default_targets_file() -> String {
    "targets.yaml".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            targets_file: default_targets_file(),
        }
    }
}

/// 監視エンジン設定
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// ポーリングサイクル間隔（秒）(デフォルト: 30)
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// プローブ1回あたりのタイムアウト（秒）(デフォルト: 5)
    ///
    /// サイクル間隔より厳密に短くなければならない。
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// サイクル締め切りの猶予（秒）(デフォルト: 2)
    ///
    /// サイクル全体の完了期限は `probe_timeout + grace`。
    #[serde(default = "default_cycle_grace")]
    pub cycle_grace_secs: u64,
}

fn default_check_interval() -> u64 {
    30
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_cycle_grace() -> u64 {
    2
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
            probe_timeout_secs: default_probe_timeout(),
            cycle_grace_secs: default_cycle_grace(),
        }
    }
}

impl MonitorConfig {
    /// サイクル間隔
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// プローブタイムアウト
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// サイクル全体の完了期限（probe_timeout + grace）
    pub fn cycle_deadline(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs + self.cycle_grace_secs)
    }

    /// 設定値の妥当性を検証する
    ///
    /// プローブタイムアウトがサイクル間隔以上だと、1サイクルが次の
    /// ティックまでに完了する保証が失われるため起動時に拒否する。
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.check_interval_secs == 0 {
            return Err(DashboardError::Config(
                "check_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(DashboardError::Config(
                "probe_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout_secs >= self.check_interval_secs {
            return Err(DashboardError::Config(format!(
                "probe_timeout_secs ({}) must be strictly shorter than check_interval_secs ({})",
                self.probe_timeout_secs, self.check_interval_secs
            )));
        }
        Ok(())
    }
}

/// 監視対象リストファイル
///
/// ```yaml
/// targets:
///   - name: HashiCorp Vault
///     category: Security
///     url: http://localhost:8200/v1/sys/health
///   - name: PostgreSQL
///     category: Database
///     port: 5432
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsFile {
    /// 監視対象の一覧（設定順を保持）
    pub targets: Vec<Target>,
}

/// 監視対象リストをYAMLファイルから読み込む
///
/// パース不能なファイルや空の対象名は起動時エラーとする。
/// 名前の重複チェックはレジストリ構築時に行われる。
pub fn load_targets(path: impl AsRef<Path>) -> Result<Vec<Target>, DashboardError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let file: TargetsFile = serde_yaml::from_str(&raw)?;

    for target in &file.targets {
        if target.name.trim().is_empty() {
            return Err(DashboardError::Config(
                "target name must not be empty".to_string(),
            ));
        }
    }

    Ok(file.targets)
}
