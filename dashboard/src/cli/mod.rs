//! CLI module for integration-dashboard
//!
//! Provides command-line interface for the dashboard server.
//! All runtime configuration is supplied via environment variables.

use clap::Parser;

/// Integration Dashboard - Aggregated health monitoring for a service fleet
#[derive(Parser, Debug)]
#[command(name = "integration-dashboard")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DASHBOARD_HOST                    Bind address (default: 0.0.0.0)
    DASHBOARD_PORT                    Listen port (default: 8095)
    DASHBOARD_TARGETS_FILE            Target list YAML path (default: targets.yaml)
    DASHBOARD_CHECK_INTERVAL_SECS     Polling cycle interval (default: 30)
    DASHBOARD_PROBE_TIMEOUT_SECS      Per-probe timeout (default: 5)
    DASHBOARD_CYCLE_GRACE_SECS        Cycle deadline grace (default: 2)
    DASHBOARD_LOG_LEVEL               Log level (default: info)
"#)]
pub struct Cli;
