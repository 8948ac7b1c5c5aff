//! プローブ実行
//!
//! 監視対象1件に対する単発のヘルスチェックと結果の分類。
//! URLが設定されていればHTTP GET、なければポートへのTCP接続で確認する。

use integration_dashboard_common::types::{ProbeResult, Target};
use reqwest::Client;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::warn;

/// ポートチェックの接続先ホスト
///
/// ポートのみ設定された対象は同一ホスト上のインフラ
/// （DB・メッセージブローカー等）を想定している。
const PORT_CHECK_HOST: [u8; 4] = [127, 0, 0, 1];

/// プローバー
///
/// いかなる結果も `ProbeResult` へ分類して返し、呼び出し元へ
/// エラーを伝播させない。1対象の異常が他対象のプローブや
/// スケジューラーの稼働に影響してはならない。
#[derive(Clone)]
pub struct Prober {
    /// HTTPクライアント（接続プーリング有効）
    ///
    /// タイムアウトはクライアント全体ではなくリクエスト単位で指定する。
    client: Client,
}

impl Prober {
    /// 新しいプローバーを作成
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// 監視対象1件をプローブし、結果を分類して返す
    pub async fn probe(&self, target: &Target, timeout: Duration) -> ProbeResult {
        if let Some(ref url) = target.url {
            self.probe_http(target, url, timeout).await
        } else if let Some(port) = target.port {
            self.probe_port(port, timeout).await
        } else {
            // プローブ先が設定されていない対象は判定不能（設定の警告として記録）
            warn!(
                target_name = %target.name,
                "Target has neither url nor port, cannot probe"
            );
            ProbeResult::unknown("no probe address configured")
        }
    }

    /// HTTP GETによるヘルスチェック
    async fn probe_http(&self, target: &Target, url: &str, timeout: Duration) -> ProbeResult {
        let parsed = match reqwest::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    target_name = %target.name,
                    url = %url,
                    error = %e,
                    "Target has a malformed url, cannot probe"
                );
                return ProbeResult::unknown(format!("malformed url: {e}"));
            }
        };

        let start = Instant::now();
        let result = self.client.get(parsed).timeout(timeout).send().await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => ProbeResult::up("OK", elapsed_ms),
            Ok(response) => {
                ProbeResult::down_with_latency(format!("HTTP {}", response.status()), elapsed_ms)
            }
            Err(e) if e.is_timeout() => {
                ProbeResult::down(format!("timeout after {}ms", timeout.as_millis()))
            }
            Err(e) => ProbeResult::down(e.to_string()),
        }
    }

    /// TCP接続によるヘルスチェック（URLを持たない対象向け）
    async fn probe_port(&self, port: u16, timeout: Duration) -> ProbeResult {
        let addr = SocketAddr::from((PORT_CHECK_HOST, port));

        let start = Instant::now();
        match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                ProbeResult::up("Port check", elapsed_ms)
            }
            Ok(Err(e)) => ProbeResult::down(format!("Port check: {e}")),
            Err(_) => ProbeResult::down(format!(
                "Port check: timeout after {}ms",
                timeout.as_millis()
            )),
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}
