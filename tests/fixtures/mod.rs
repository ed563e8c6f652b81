//! Integration test fixtures.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use chat_relay::ServerConfig;

/// A relay server running in a background task for the duration of a test
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Default bot delay used by test servers; kept short so tests stay fast
    pub const BOT_DELAY: Duration = Duration::from_millis(300);

    /// Start a server on the given port and wait until it answers health
    /// checks. Each test uses its own port so tests can run in parallel.
    pub async fn start(port: u16) -> Self {
        Self::start_with(port, |_| {}).await
    }

    /// Start a server with test defaults adjusted by `tweak`
    pub async fn start_with(port: u16, tweak: impl FnOnce(&mut ServerConfig)) -> Self {
        let mut config = ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            bot_delay: Self::BOT_DELAY,
            idle_timeout: Duration::from_secs(30),
            ..ServerConfig::default()
        };
        tweak(&mut config);

        tokio::spawn(async move {
            if let Err(e) = chat_relay::run_server(config).await {
                panic!("test server failed: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws/chat/", self.port)
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/health", self.base_url());
        for _ in 0..100 {
            if let Ok(response) = client.get(&url).send().await
                && response.status() == 200
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server did not become ready on port {}", self.port);
    }
}
