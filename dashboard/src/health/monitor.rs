//! ポーリングスケジューラー
//!
//! 固定間隔で全監視対象への並行プローブを1巡（=1サイクル）実行し、
//! 結果をステータスストアへ反映する。
//!
//! - サイクルは重複実行しない。前サイクルが未完了のままティックが
//!   発火した場合、そのティックは破棄され、スキップとして計数される。
//! - 個々のプローブはプローブタイムアウトで、サイクル全体は
//!   `probe_timeout + grace` の締め切りで打ち切られるため、
//!   到達不能な対象が何件あってもサイクルの所要時間は一定の上限に収まる。

use super::prober::Prober;
use crate::registry::TargetRegistry;
use crate::shutdown::ShutdownController;
use crate::store::StatusStore;
use chrono::{DateTime, Utc};
use integration_dashboard_common::config::MonitorConfig;
use integration_dashboard_common::types::{HealthStatus, IntegrationStatus, ProbeResult, Target};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info, warn};

/// サイクルの多重実行を防ぐゲート
///
/// ティック発火時に前サイクルが実行中なら、新しいサイクルは
/// 開始しない（キューイングもしない）。
#[derive(Clone, Default)]
struct CycleGate {
    running: Arc<AtomicBool>,
}

impl CycleGate {
    /// サイクルの開始を試みる。既に実行中なら `None`
    fn try_acquire(&self) -> Option<CycleGuard> {
        if self.running.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(CycleGuard { gate: self.clone() })
        }
    }
}

/// 実行中サイクルの解放ガード
///
/// サイクルタスクが中断された場合もDropで確実に解放される。
struct CycleGuard {
    gate: CycleGate,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.gate.running.store(false, Ordering::SeqCst);
    }
}

/// 監視エンジンの統計
///
/// スケジューラーが更新し、システムAPIとテストから参照される。
#[derive(Clone, Default)]
pub struct MonitorStats {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    cycles_completed: AtomicU64,
    cycles_skipped: AtomicU64,
    last_cycle_started_at: Mutex<Option<DateTime<Utc>>>,
}

impl MonitorStats {
    /// 完了したサイクル数
    pub fn cycles_completed(&self) -> u64 {
        self.inner.cycles_completed.load(Ordering::Relaxed)
    }

    /// スキップされたティック数
    pub fn cycles_skipped(&self) -> u64 {
        self.inner.cycles_skipped.load(Ordering::Relaxed)
    }

    /// 直近のサイクル開始時刻
    pub fn last_cycle_started_at(&self) -> Option<DateTime<Utc>> {
        *self
            .inner
            .last_cycle_started_at
            .lock()
            .expect("stats lock poisoned")
    }

    fn record_skip(&self) -> u64 {
        self.inner.cycles_skipped.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_cycle_start(&self, at: DateTime<Utc>) {
        *self
            .inner
            .last_cycle_started_at
            .lock()
            .expect("stats lock poisoned") = Some(at);
    }

    fn record_cycle_complete(&self) {
        self.inner.cycles_completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// ヘルスモニター
///
/// 監視対象レジストリのスナップショットに対して定期的にプローブを
/// ファンアウトし、結果をストアへファンインする。
#[derive(Clone)]
pub struct HealthMonitor {
    /// 監視対象レジストリ
    registry: Arc<TargetRegistry>,
    /// ステータスストア（書き込み側）
    store: StatusStore,
    /// プローバー
    prober: Prober,
    /// 監視設定
    config: MonitorConfig,
    /// 統計
    stats: MonitorStats,
    /// サイクル多重実行ゲート
    gate: CycleGate,
}

impl HealthMonitor {
    /// 新しいヘルスモニターを作成
    pub fn new(registry: Arc<TargetRegistry>, store: StatusStore, config: MonitorConfig) -> Self {
        Self {
            registry,
            store,
            prober: Prober::new(),
            config,
            stats: MonitorStats::default(),
            gate: CycleGate::default(),
        }
    }

    /// 統計へのハンドルを取得
    pub fn stats(&self) -> MonitorStats {
        self.stats.clone()
    }

    /// バックグラウンドで監視を開始
    pub fn start(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(shutdown).await;
        })
    }

    /// 監視ループ
    async fn run(&self, shutdown: ShutdownController) {
        let mut timer = interval(self.config.interval());

        info!(
            interval_secs = self.config.check_interval_secs,
            probe_timeout_secs = self.config.probe_timeout_secs,
            target_count = self.registry.len(),
            "Health monitor started"
        );

        let mut in_flight: Option<JoinHandle<()>> = None;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    // `interval()` ticks immediately on the first call, so the
                    // first polling cycle runs right at startup.
                    let Some(guard) = self.gate.try_acquire() else {
                        let total_skipped = self.stats.record_skip();
                        warn!(
                            total_skipped,
                            "Previous polling cycle still running, skipping tick"
                        );
                        continue;
                    };

                    let monitor = self.clone();
                    in_flight = Some(tokio::spawn(async move {
                        monitor.run_cycle().await;
                        drop(guard);
                    }));
                }
                _ = shutdown.wait() => {
                    // 実行中のサイクルを中断する。各対象のエントリは丸ごと
                    // 置き換えのみなので、中断しても不整合な状態は残らない
                    if let Some(handle) = in_flight.take() {
                        handle.abort();
                    }
                    info!("Health monitor stopped");
                    return;
                }
            }
        }
    }

    /// ポーリングサイクルを1巡実行する
    ///
    /// 全対象へ並行にプローブを発行し、サイクル締め切り
    /// （`probe_timeout + grace`）までに完了しなかったプローブは
    /// DOWN扱いで打ち切る。遅延して届いた結果は破棄され、
    /// 後からサイクル結果が書き換わることはない。
    pub async fn run_cycle(&self) {
        let cycle_started_at = Utc::now();
        let started = Instant::now();
        let deadline = started + self.config.cycle_deadline();

        self.stats.record_cycle_start(cycle_started_at);

        let targets = self.registry.list().to_vec();
        debug!(target_count = targets.len(), "Polling cycle started");

        let mut handles: Vec<(Target, JoinHandle<ProbeResult>)> =
            Vec::with_capacity(targets.len());

        for target in targets {
            let prober = self.prober.clone();
            let probe_timeout = self.config.probe_timeout();
            let task_target = target.clone();
            let handle =
                tokio::spawn(async move { prober.probe(&task_target, probe_timeout).await });
            handles.push((target, handle));
        }

        let mut up = 0usize;
        let mut down = 0usize;
        let mut unknown = 0usize;

        for (target, mut handle) in handles {
            // 締め切りは全プローブで共有の絶対時刻。先頭の遅い対象が
            // 後続の待ち時間予算を食い潰すことはない
            let result = match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => {
                    error!(
                        target_name = %target.name,
                        error = %join_err,
                        "Probe task failed"
                    );
                    ProbeResult::down(format!("probe task failed: {join_err}"))
                }
                Err(_) => {
                    handle.abort();
                    ProbeResult::down(format!(
                        "timeout: probe still outstanding after {}ms cycle deadline",
                        self.config.cycle_deadline().as_millis()
                    ))
                }
            };

            match result.status {
                HealthStatus::Up => {
                    up += 1;
                    debug!(
                        target_name = %target.name,
                        latency_ms = ?result.response_time_ms,
                        "Probe succeeded"
                    );
                }
                HealthStatus::Down => {
                    down += 1;
                    warn!(
                        target_name = %target.name,
                        message = %result.message,
                        "Probe failed"
                    );
                }
                HealthStatus::Unknown => {
                    unknown += 1;
                }
            }

            let status = IntegrationStatus::from_probe(&target, result, cycle_started_at);
            if !self.store.upsert(status).await {
                debug!(target_name = %target.name, "Stale probe result discarded");
            }
        }

        self.stats.record_cycle_complete();

        info!(
            up,
            down,
            unknown,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Polling cycle completed"
        );
    }
}
