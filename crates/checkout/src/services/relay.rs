//! Hand-off link relay service.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::RelayError;

/// The external relay that turns a persisted order ID into a ready
/// WhatsApp hand-off link.
#[async_trait]
pub trait HandoffRelay: Send + Sync {
    /// Returns the hand-off link for a remotely persisted order.
    async fn link_for(&self, order_id: &str) -> Result<String, RelayError>;
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    ok: bool,
    url: Option<String>,
    error: Option<String>,
}

/// Relay client talking to the real service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHandoffRelay {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHandoffRelay {
    /// Creates a relay client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, order_id: &str) -> String {
        format!(
            "{}/api/whatsapp-link/{}",
            self.base_url.trim_end_matches('/'),
            order_id
        )
    }
}

#[async_trait]
impl HandoffRelay for HttpHandoffRelay {
    async fn link_for(&self, order_id: &str) -> Result<String, RelayError> {
        let response = self.client.get(self.url(order_id)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }

        let body: RelayResponse = response
            .json()
            .await
            .map_err(|err| RelayError::MalformedResponse(err.to_string()))?;

        match (body.ok, body.url) {
            (true, Some(url)) => Ok(url),
            _ => Err(RelayError::Refused(
                body.error.unwrap_or_else(|| "no link returned".to_string()),
            )),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryRelayState {
    requests: Vec<String>,
    fail_on_link: bool,
}

/// In-memory relay for tests. Returns a deterministic link derived
/// from the order ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandoffRelay {
    state: Arc<RwLock<InMemoryRelayState>>,
}

impl InMemoryHandoffRelay {
    /// Creates a new in-memory relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the relay to fail every link call.
    pub fn set_fail_on_link(&self, fail: bool) {
        self.state.write().unwrap().fail_on_link = fail;
    }

    /// Returns the order IDs the relay was asked about.
    pub fn requests(&self) -> Vec<String> {
        self.state.read().unwrap().requests.clone()
    }
}

#[async_trait]
impl HandoffRelay for InMemoryHandoffRelay {
    async fn link_for(&self, order_id: &str) -> Result<String, RelayError> {
        let mut state = self.state.write().unwrap();
        state.requests.push(order_id.to_string());

        if state.fail_on_link {
            return Err(RelayError::Status(502));
        }

        Ok(format!("https://wa.me/relay/order/{order_id}"))
    }
}
