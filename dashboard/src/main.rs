//! Integration Dashboard Server Entry Point

use chrono::Utc;
use clap::Parser;
use integration_dashboard::cli::Cli;
use integration_dashboard::config::{dashboard_config_from_env, monitor_config_from_env};
use integration_dashboard::{health, logging, registry, server, shutdown, store, AppState};
use integration_dashboard_common::config::load_targets;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // Parse CLI (only -h/--help and -V/--version)
    let _cli = Cli::parse();

    logging::init().expect("failed to initialize logging");
    run_server().await;
}

async fn run_server() {
    info!("Integration Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = dashboard_config_from_env();
    let monitor_config = monitor_config_from_env();

    // 設定違反（タイムアウト >= 間隔など）は起動時に中止する
    monitor_config
        .validate()
        .expect("Invalid monitor configuration");

    let targets = load_targets(&config.targets_file).unwrap_or_else(|e| {
        panic!(
            "Failed to load target list from {}: {}",
            config.targets_file, e
        )
    });

    // 名前の重複は曖昧なキーとして起動を拒否する
    let registry = Arc::new(
        registry::TargetRegistry::from_configs(targets).expect("Invalid target configuration"),
    );

    let store = store::StatusStore::new();
    store.seed(registry.list(), Utc::now()).await;

    let shutdown = shutdown::ShutdownController::default();

    let monitor = health::HealthMonitor::new(registry.clone(), store.clone(), monitor_config);
    let stats = monitor.stats();
    monitor.start(shutdown.clone());

    let state = AppState {
        registry,
        store,
        stats,
        shutdown,
        started_at: Utc::now(),
    };

    let bind_addr = format!("{}:{}", config.host, config.port);

    server::run(state, &bind_addr).await;
}
