//! Remote order persistence service.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use order::Order;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// The remote order backend: persists an order durably and returns
/// the identifier it assigned.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Submits the order for remote persistence.
    ///
    /// On success returns the backend-assigned order ID.
    async fn submit_order(&self, order: &Order) -> Result<String, BackendError>;
}

/// Wire shape of `POST /api/orders`.
#[derive(Debug, Serialize)]
struct OrderPayload<'a> {
    customer_name: &'a str,
    customer_phone: &'a str,
    items: Vec<ItemPayload<'a>>,
    total: f64,
    adresse: &'a str,
    instructions: &'a str,
    payment_method: &'a str,
}

#[derive(Debug, Serialize)]
struct ItemPayload<'a> {
    id: &'a str,
    name: &'a str,
    price: f64,
    qty: u32,
    category: &'a str,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    ok: bool,
    id: Option<String>,
    error: Option<String>,
}

impl<'a> OrderPayload<'a> {
    fn from_order(order: &'a Order) -> Self {
        Self {
            customer_name: &order.customer_name,
            customer_phone: &order.customer_phone,
            items: order
                .lines
                .iter()
                .map(|line| ItemPayload {
                    id: line.id.as_str(),
                    name: &line.name,
                    price: line.unit_price.as_franc_value(),
                    qty: line.quantity,
                    category: line.category.as_str(),
                })
                .collect(),
            total: order.total.as_franc_value(),
            adresse: &order.address,
            instructions: &order.instructions,
            payment_method: order.payment_method.as_str(),
        }
    }
}

/// Order backend talking to the real service over HTTP.
///
/// The client carries a bounded timeout so a hung backend cannot hold
/// the coordinator's `Submitting` state indefinitely.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderBackend {
    /// Creates a backend client for the given base URL
    /// (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/api/orders", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    async fn submit_order(&self, order: &Order) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.url())
            .json(&OrderPayload::from_order(order))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let body: OrderResponse = response
            .json()
            .await
            .map_err(|err| BackendError::MalformedResponse(err.to_string()))?;

        match (body.ok, body.id) {
            (true, Some(id)) => Ok(id),
            _ => Err(BackendError::Rejected(
                body.error.unwrap_or_else(|| "no order id returned".to_string()),
            )),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    orders: Vec<(String, Order)>,
    next_id: u32,
    fail_on_submit: bool,
}

/// In-memory order backend for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl InMemoryOrderBackend {
    /// Creates a new in-memory order backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to fail every submit call.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_submit = fail;
    }

    /// Adds an artificial delay before each submit resolves, to
    /// simulate an in-flight network call.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    /// Returns the number of persisted orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns the persisted order with the given ID.
    pub fn get_order(&self, id: &str) -> Option<Order> {
        self.state
            .read()
            .unwrap()
            .orders
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, order)| order.clone())
    }
}

#[async_trait]
impl OrderBackend for InMemoryOrderBackend {
    async fn submit_order(&self, order: &Order) -> Result<String, BackendError> {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_submit {
            return Err(BackendError::Status(503));
        }

        state.next_id += 1;
        let id = state.next_id.to_string();
        state.orders.push((id.clone(), order.clone()));
        Ok(id)
    }
}
