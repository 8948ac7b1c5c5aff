use std::sync::Arc;

use chrono::Utc;
use integration_dashboard::health::HealthMonitor;
use integration_dashboard::registry::TargetRegistry;
use integration_dashboard::shutdown::ShutdownController;
use integration_dashboard::store::StatusStore;
use integration_dashboard::AppState;
use integration_dashboard_common::config::MonitorConfig;
use integration_dashboard_common::types::Target;

/// テスト用の監視設定（短いタイムアウトで高速に回す）
#[allow(dead_code)]
pub fn test_monitor_config() -> MonitorConfig {
    MonitorConfig {
        check_interval_secs: 30,
        probe_timeout_secs: 1,
        cycle_grace_secs: 1,
    }
}

/// テスト用のAppStateとモニターを構築する
///
/// ストアはシード済み。モニターは起動していないため、テスト側で
/// `run_cycle()` を明示的に呼んで決定的にサイクルを進める。
pub async fn test_state(targets: Vec<Target>) -> (AppState, HealthMonitor) {
    test_state_with_config(targets, test_monitor_config()).await
}

/// 監視設定を指定してテスト用のAppStateとモニターを構築する
pub async fn test_state_with_config(
    targets: Vec<Target>,
    config: MonitorConfig,
) -> (AppState, HealthMonitor) {
    let registry =
        Arc::new(TargetRegistry::from_configs(targets).expect("invalid test target list"));

    let store = StatusStore::new();
    store.seed(registry.list(), Utc::now()).await;

    let monitor = HealthMonitor::new(registry.clone(), store.clone(), config);

    let state = AppState {
        registry,
        store,
        stats: monitor.stats(),
        shutdown: ShutdownController::default(),
        started_at: Utc::now(),
    };

    (state, monitor)
}
