//! Integration Test: サイクル所要時間の上限
//!
//! 到達不能・ハングする対象が何件あっても、サイクルの所要時間は
//! `probe_timeout + grace` の締め切りを大きく超えない。

use std::time::{Duration, Instant};

use integration_dashboard_common::types::{HealthStatus, Target};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::app::{test_state, test_state_with_config};
use integration_dashboard_common::config::MonitorConfig;

/// 全対象がハングしてもサイクルは締め切りまでに完了する
#[tokio::test]
async fn test_cycle_completes_when_all_targets_hang() {
    let hanging = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&hanging)
        .await;

    // probe_timeout 1秒 + grace 1秒 → サイクル締め切り2秒
    let targets: Vec<_> = ["vault", "kafka", "rabbitmq", "zipkin"]
        .iter()
        .map(|name| Target::new(*name, "Infrastructure").with_url(hanging.uri()))
        .collect();

    let (state, monitor) = test_state(targets).await;

    let started = Instant::now();
    monitor.run_cycle().await;
    let elapsed = started.elapsed();

    // 4対象 × 1秒タイムアウトでも直列合計（4秒）にはならず、
    // 締め切り＋スケジューリング余裕の範囲に収まる
    assert!(
        elapsed < Duration::from_secs(4),
        "cycle took {elapsed:?}, expected bounded completion"
    );

    for name in ["vault", "kafka", "rabbitmq", "zipkin"] {
        let status = state.store.get(name).await.unwrap();
        assert_eq!(status.status, HealthStatus::Down);
        assert!(status.message.contains("timeout"));
        assert!(status.response_time_ms.is_none());
    }

    assert_eq!(state.store.summary().await.worst_status, HealthStatus::Down);
}

/// ハングする対象が混在しても、正常な対象の結果は影響を受けない
#[tokio::test]
async fn test_hanging_target_does_not_delay_healthy_results() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let hanging = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&hanging)
        .await;

    let config = MonitorConfig {
        check_interval_secs: 30,
        probe_timeout_secs: 1,
        cycle_grace_secs: 1,
    };
    let (state, monitor) = test_state_with_config(
        vec![
            Target::new("auth", "core").with_url(healthy.uri()),
            Target::new("billing", "core").with_url(hanging.uri()),
        ],
        config,
    )
    .await;

    monitor.run_cycle().await;

    assert_eq!(
        state.store.get("auth").await.unwrap().status,
        HealthStatus::Up
    );
    assert_eq!(
        state.store.get("billing").await.unwrap().status,
        HealthStatus::Down
    );
}
