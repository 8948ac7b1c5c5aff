//! Configuration management via environment variables
//!
//! Provides helper functions for reading `DASHBOARD_*` environment
//! variables on top of the defaults defined in the common crate.

use integration_dashboard_common::config::{DashboardConfig, MonitorConfig};

/// Get an environment variable, returning a default when unset
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// Returns the default when the variable is unset or fails to parse.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Load server configuration from environment variables
///
/// `DASHBOARD_HOST`, `DASHBOARD_PORT`, `DASHBOARD_TARGETS_FILE`.
pub fn dashboard_config_from_env() -> DashboardConfig {
    let defaults = DashboardConfig::default();
    DashboardConfig {
        host: get_env_or("DASHBOARD_HOST", &defaults.host),
        port: get_env_parse("DASHBOARD_PORT", defaults.port),
        targets_file: get_env_or("DASHBOARD_TARGETS_FILE", &defaults.targets_file),
    }
}

/// Load monitor configuration from environment variables
///
/// `DASHBOARD_CHECK_INTERVAL_SECS`, `DASHBOARD_PROBE_TIMEOUT_SECS`,
/// `DASHBOARD_CYCLE_GRACE_SECS`. Validation happens at startup via
/// [`MonitorConfig::validate`].
pub fn monitor_config_from_env() -> MonitorConfig {
    let defaults = MonitorConfig::default();
    MonitorConfig {
        check_interval_secs: get_env_parse(
            "DASHBOARD_CHECK_INTERVAL_SECS",
            defaults.check_interval_secs,
        ),
        probe_timeout_secs: get_env_parse(
            "DASHBOARD_PROBE_TIMEOUT_SECS",
            defaults.probe_timeout_secs,
        ),
        cycle_grace_secs: get_env_parse("DASHBOARD_CYCLE_GRACE_SECS", defaults.cycle_grace_secs),
    }
}
