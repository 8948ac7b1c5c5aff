//! Integration Test: ポーリングサイクルと結果分類
//!
//! 応答するサービスとハングするサービスが混在するフリートを1サイクル
//! ポーリングし、分類・集計・タイムスタンプの性質を確認する。

use std::time::Duration;

use chrono::Utc;
use integration_dashboard_common::types::{HealthStatus, Target};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::app::test_state;

/// 200応答の対象はUP、ハングする対象はDOWN（timeout）に分類される
#[tokio::test]
async fn test_cycle_classifies_mixed_fleet() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "UP"}))
                .set_delay(Duration::from_millis(10)),
        )
        .mount(&healthy)
        .await;

    // プローブタイムアウト（1秒）より長く遅延させてハングを再現する
    let hanging = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&hanging)
        .await;

    let process_start = Utc::now();
    let (state, monitor) = test_state(vec![
        Target::new("auth", "core").with_url(format!("{}/actuator/health", healthy.uri())),
        Target::new("billing", "core").with_url(format!("{}/actuator/health", hanging.uri())),
    ])
    .await;

    monitor.run_cycle().await;

    let auth = state.store.get("auth").await.unwrap();
    assert_eq!(auth.status, HealthStatus::Up);
    assert_eq!(auth.message, "OK");
    assert!(auth.response_time_ms.is_some());
    assert!(auth.last_checked >= process_start);

    let billing = state.store.get("billing").await.unwrap();
    assert_eq!(billing.status, HealthStatus::Down);
    assert!(billing.message.contains("timeout"));
    assert!(billing.response_time_ms.is_none());

    let summary = state.store.summary().await;
    assert_eq!(summary.total, 2);
    assert_eq!(summary.up, 1);
    assert_eq!(summary.down, 1);
    assert_eq!(summary.unknown, 0);
    assert_eq!(summary.worst_status, HealthStatus::Down);
}

/// エラー応答（5xx）はDOWNに分類され、ステータスコードが記録される
#[tokio::test]
async fn test_cycle_classifies_error_response_as_down() {
    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let (state, monitor) = test_state(vec![
        Target::new("camel", "Integration").with_url(format!("{}/actuator/health", failing.uri())),
    ])
    .await;

    monitor.run_cycle().await;

    let camel = state.store.get("camel").await.unwrap();
    assert_eq!(camel.status, HealthStatus::Down);
    assert!(camel.message.contains("503"));
}

/// `last_checked` は連続するサイクルをまたいで単調非減少
#[tokio::test]
async fn test_last_checked_is_monotonic_across_cycles() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let (state, monitor) = test_state(vec![
        Target::new("auth", "core").with_url(format!("{}/health", healthy.uri())),
    ])
    .await;

    monitor.run_cycle().await;
    let first = state.store.get("auth").await.unwrap().last_checked;

    monitor.run_cycle().await;
    let second = state.store.get("auth").await.unwrap().last_checked;

    assert!(second >= first);
}

/// サービスが復旧するとDOWN→UPへ遷移する
#[tokio::test]
async fn test_target_recovers_between_cycles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (state, monitor) = test_state(vec![
        Target::new("crm", "Business").with_url(format!("{}/health", server.uri())),
    ])
    .await;

    monitor.run_cycle().await;
    assert_eq!(
        state.store.get("crm").await.unwrap().status,
        HealthStatus::Down
    );

    monitor.run_cycle().await;
    assert_eq!(
        state.store.get("crm").await.unwrap().status,
        HealthStatus::Up
    );
}
