//! ヘルスチェック監視
//!
//! プル型ヘルスチェックで監視対象フリートの稼働状況を監視する。
//! 1サイクル = 全対象への並行プローブ1巡。個々のプローブは
//! 個別のデッドラインを持ち、サイクル全体の完了時間も上限で抑える。

pub mod monitor;
pub mod prober;

pub use monitor::{HealthMonitor, MonitorStats};
pub use prober::Prober;
