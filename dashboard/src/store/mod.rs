//! ステータスストア
//!
//! 監視対象ごとの最新 `IntegrationStatus` をメモリ内で管理する。
//! 書き込みは監視エンジン、読み取りはクエリAPIから行われる。

use chrono::{DateTime, Utc};
use integration_dashboard_common::types::{FleetSummary, HealthStatus, IntegrationStatus, Target};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// ステータスストア
///
/// 対象名ごとに最新のヘルス記録を1件だけ保持する。各エントリは
/// 独立しており、丸ごと置き換えられるため部分更新は観測されない。
/// ロックはマップ操作の間のみ保持し、ネットワークI/Oをまたいで
/// 保持してはならない。
#[derive(Clone, Default)]
pub struct StatusStore {
    statuses: Arc<RwLock<HashMap<String, IntegrationStatus>>>,
}

impl StatusStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 全対象に初期レコード（UNKNOWN）を登録する
    ///
    /// 最初のサイクルが完了する前でも、全対象がクエリ可能になる。
    pub async fn seed(&self, targets: &[Target], at: DateTime<Utc>) {
        let mut statuses = self.statuses.write().await;
        for target in targets {
            statuses.insert(target.name.clone(), IntegrationStatus::awaiting(target, at));
        }
    }

    /// 対象の最新レコードを置き換える
    ///
    /// `last_checked` が既存レコードより古い書き込みは破棄して
    /// `false` を返す。破棄されたサイクルの遅延結果が、より新しい
    /// サイクルの結果を上書きすることはない。
    pub async fn upsert(&self, status: IntegrationStatus) -> bool {
        let mut statuses = self.statuses.write().await;

        if let Some(existing) = statuses.get(&status.name) {
            if status.last_checked < existing.last_checked {
                debug!(
                    target_name = %status.name,
                    incoming = %status.last_checked,
                    stored = %existing.last_checked,
                    "Discarding stale status write"
                );
                return false;
            }
        }

        statuses.insert(status.name.clone(), status);
        true
    }

    /// 対象の最新レコードを取得
    pub async fn get(&self, name: &str) -> Option<IntegrationStatus> {
        self.statuses.read().await.get(name).cloned()
    }

    /// 全対象の最新レコードを名前順で取得
    pub async fn list(&self) -> Vec<IntegrationStatus> {
        let mut all: Vec<_> = self.statuses.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// 保持しているレコード数
    pub async fn len(&self) -> usize {
        self.statuses.read().await.len()
    }

    /// レコードが1件もないか
    pub async fn is_empty(&self) -> bool {
        self.statuses.read().await.is_empty()
    }

    /// フリート全体のサマリーを計算する
    ///
    /// 再プローブせず、現在のスナップショットだけから集計する。
    /// 最悪状態の順序は DOWN > UNKNOWN > UP。
    pub async fn summary(&self) -> FleetSummary {
        let statuses = self.statuses.read().await;

        let mut up = 0;
        let mut down = 0;
        let mut unknown = 0;
        let mut worst = HealthStatus::Up;
        let mut oldest: Option<DateTime<Utc>> = None;

        for status in statuses.values() {
            match status.status {
                HealthStatus::Up => up += 1,
                HealthStatus::Down => down += 1,
                HealthStatus::Unknown => unknown += 1,
            }
            if status.status.severity() > worst.severity() {
                worst = status.status;
            }
            if oldest.map_or(true, |current| status.last_checked < current) {
                oldest = Some(status.last_checked);
            }
        }

        FleetSummary {
            total: statuses.len(),
            up,
            down,
            unknown,
            worst_status: worst,
            oldest_last_checked: oldest,
        }
    }
}
