//! The submission coordinator.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use order::Order;
use storage::{ArchiveRecord, KeyValueStore, OrderArchive};

use crate::error::CheckoutError;
use crate::handoff;
use crate::services::{HandoffRelay, OrderBackend};
use crate::state::SubmissionState;

/// How the hand-off payload of a submission was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Remote persistence and the relay both succeeded.
    Remote,

    /// Remote persistence succeeded but the relay failed; the link was
    /// reconstructed locally even though a remote ID exists.
    RelayFallback,

    /// Remote persistence failed; everything was constructed locally.
    LocalFallback,
}

/// The result of one submission attempt.
///
/// Exactly one hand-off link is produced per attempt. The caller is
/// responsible for presenting it and for clearing the cart only after
/// this value is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Backend-assigned order ID, present only if remote persistence
    /// succeeded.
    pub remote_id: Option<String>,

    /// The WhatsApp hand-off link, remote or locally constructed.
    pub handoff_url: String,

    /// Local reference: `CMD{remote_id}` when persisted remotely,
    /// otherwise `TEMP{unix_millis}`.
    pub reference: String,

    /// Which path produced the hand-off link.
    pub outcome: SubmissionOutcome,
}

/// Drives the checkout hand-off for one shopper session.
///
/// At most one submission is in flight at a time: a second `submit`
/// while one is outstanding is rejected immediately, so a double
/// click can never produce a duplicate order. Remote failures are
/// absorbed and downgrade the flow to local hand-off construction;
/// the shopper always receives a complete link.
pub struct SubmissionCoordinator<B, R, S> {
    backend: B,
    relay: R,
    archive: OrderArchive<S>,
    whatsapp_number: String,
    state: Arc<Mutex<SubmissionState>>,
}

/// Returns the coordinator to `Idle` when an attempt ends, on every
/// path out of `submit`, including panics.
struct IdleOnDrop {
    state: Arc<Mutex<SubmissionState>>,
}

impl Drop for IdleOnDrop {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            *state = SubmissionState::Idle;
        }
    }
}

impl<B, R, S> SubmissionCoordinator<B, R, S>
where
    B: OrderBackend,
    R: HandoffRelay,
    S: KeyValueStore,
{
    /// Creates a coordinator over the given services and archive.
    pub fn new(backend: B, relay: R, archive: OrderArchive<S>) -> Self {
        Self::with_contact(backend, relay, archive, crate::WHATSAPP_NUMBER)
    }

    /// Creates a coordinator with a non-default WhatsApp contact.
    pub fn with_contact(
        backend: B,
        relay: R,
        archive: OrderArchive<S>,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            relay,
            archive,
            whatsapp_number: whatsapp_number.into(),
            state: Arc::new(Mutex::new(SubmissionState::Idle)),
        }
    }

    /// Returns the current coordinator state.
    pub fn state(&self) -> SubmissionState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(SubmissionState::Idle)
    }

    /// Submits a composed order.
    ///
    /// Tries remote persistence, then the relay link, falling back to
    /// local construction on any failure; archives the attempt
    /// unconditionally. The only error is
    /// [`CheckoutError::AlreadyInProgress`] — every network outcome
    /// still produces a [`SubmissionResult`].
    #[tracing::instrument(skip(self, order), fields(total = %order.total))]
    pub async fn submit(&self, order: &Order) -> Result<SubmissionResult, CheckoutError> {
        // Guard: only one attempt in flight per session.
        {
            let mut state = self.state.lock().map_err(|_| CheckoutError::AlreadyInProgress)?;
            if !state.can_begin() {
                tracing::warn!("submission already in progress, rejecting");
                return Err(CheckoutError::AlreadyInProgress);
            }
            *state = SubmissionState::Submitting;
        }
        let _reset = IdleOnDrop {
            state: Arc::clone(&self.state),
        };

        metrics::counter!("checkout_submissions_total").increment(1);
        let started = std::time::Instant::now();

        // Step 1: remote persistence, one shot, no retry.
        let remote_id = match self.backend.submit_order(order).await {
            Ok(id) => {
                tracing::info!(remote_id = %id, "order persisted remotely");
                Some(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote persistence failed, using local fallback");
                None
            }
        };

        // Step 2: hand-off link, remote when possible, local otherwise.
        let (handoff_url, outcome) = match &remote_id {
            Some(id) => match self.relay.link_for(id).await {
                Ok(url) => (url, SubmissionOutcome::Remote),
                Err(err) => {
                    tracing::warn!(
                        remote_id = %id,
                        error = %err,
                        "relay failed, reconstructing hand-off link locally"
                    );
                    (
                        handoff::local_handoff_link(&self.whatsapp_number, order),
                        SubmissionOutcome::RelayFallback,
                    )
                }
            },
            None => (
                handoff::local_handoff_link(&self.whatsapp_number, order),
                SubmissionOutcome::LocalFallback,
            ),
        };

        if outcome != SubmissionOutcome::Remote {
            metrics::counter!("checkout_fallbacks_total").increment(1);
        }

        // Step 3: local reference and unconditional archival.
        let submitted_at = Utc::now();
        let reference = match &remote_id {
            Some(id) => format!("CMD{id}"),
            None => format!("TEMP{}", submitted_at.timestamp_millis()),
        };

        let record = ArchiveRecord {
            reference: reference.clone(),
            order: order.clone(),
            submitted_at,
        };
        if let Err(err) = self.archive.append(record) {
            // The hand-off must not be blocked by a local storage
            // fault; the link is still handed to the shopper.
            tracing::error!(error = %err, %reference, "failed to archive submission");
        }

        // Hand-off produced and archived: the attempt succeeded from
        // the shopper's perspective even on the fallback path.
        {
            if let Ok(mut state) = self.state.lock() {
                *state = if remote_id.is_some() {
                    SubmissionState::Succeeded
                } else {
                    SubmissionState::FailedFallback
                };
            }
        }

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(%reference, ?outcome, "submission complete");

        Ok(SubmissionResult {
            remote_id,
            handoff_url,
            reference,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{InMemoryHandoffRelay, InMemoryOrderBackend};
    use chrono::Utc;
    use common::{Category, Money};
    use order::{OrderLine, PaymentMethod};
    use std::time::Duration;
    use storage::InMemoryKvStore;

    type TestCoordinator =
        SubmissionCoordinator<InMemoryOrderBackend, InMemoryHandoffRelay, InMemoryKvStore>;

    fn setup() -> (
        TestCoordinator,
        InMemoryOrderBackend,
        InMemoryHandoffRelay,
        OrderArchive<InMemoryKvStore>,
    ) {
        let backend = InMemoryOrderBackend::new();
        let relay = InMemoryHandoffRelay::new();
        let store = InMemoryKvStore::new();
        let archive = OrderArchive::new(store.clone());

        let coordinator =
            SubmissionCoordinator::new(backend.clone(), relay.clone(), OrderArchive::new(store));
        (coordinator, backend, relay, archive)
    }

    fn sample_order() -> Order {
        Order {
            customer_name: "Awa Diop".to_string(),
            customer_phone: "771234567".to_string(),
            lines: vec![OrderLine {
                id: "b2".into(),
                name: "Pain de Campagne".to_string(),
                unit_price: Money::from_francs(1200),
                quantity: 2,
                category: Category::Boulangerie,
            }],
            total: Money::from_francs(2400),
            address: "Dakar".to_string(),
            instructions: String::new(),
            payment_method: PaymentMethod::Wave,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_happy_path_uses_remote_link() {
        let (coordinator, backend, relay, archive) = setup();

        let result = coordinator.submit(&sample_order()).await.unwrap();

        assert_eq!(result.remote_id.as_deref(), Some("1"));
        assert_eq!(result.reference, "CMD1");
        assert_eq!(result.handoff_url, "https://wa.me/relay/order/1");
        assert_eq!(result.outcome, SubmissionOutcome::Remote);

        assert_eq!(backend.order_count(), 1);
        assert_eq!(relay.requests(), vec!["1".to_string()]);
        assert_eq!(archive.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_locally() {
        let (coordinator, backend, relay, archive) = setup();
        backend.set_fail_on_submit(true);

        let order = sample_order();
        let result = coordinator.submit(&order).await.unwrap();

        assert_eq!(result.remote_id, None);
        assert!(result.reference.starts_with("TEMP"));
        assert!(!result.reference.starts_with("CMD"));
        assert_eq!(result.outcome, SubmissionOutcome::LocalFallback);

        // The locally constructed link still carries the whole order.
        assert!(result.handoff_url.starts_with("https://wa.me/221763034401?text="));
        assert!(result.handoff_url.contains("2400.00"));
        assert!(result.handoff_url.contains("Awa"));

        // The relay is never consulted without a remote ID.
        assert!(relay.requests().is_empty());
        assert_eq!(archive.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_relay_failure_keeps_remote_reference() {
        let (coordinator, backend, relay, archive) = setup();
        relay.set_fail_on_link(true);

        let result = coordinator.submit(&sample_order()).await.unwrap();

        // Persisted remotely, but the link had to be rebuilt locally.
        assert_eq!(result.remote_id.as_deref(), Some("1"));
        assert_eq!(result.reference, "CMD1");
        assert_eq!(result.outcome, SubmissionOutcome::RelayFallback);
        assert!(result.handoff_url.starts_with("https://wa.me/221763034401?text="));

        assert_eq!(backend.order_count(), 1);
        assert_eq!(archive.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let (coordinator, backend, _, archive) = setup();
        backend.set_delay(Duration::from_millis(100));

        let coordinator = Arc::new(coordinator);
        let order = sample_order();

        let first = {
            let coordinator = Arc::clone(&coordinator);
            let order = order.clone();
            tokio::spawn(async move { coordinator.submit(&order).await })
        };

        // Let the first call reach the backend before the second one.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(coordinator.state().is_submitting());

        let second = coordinator.submit(&order).await;
        assert!(matches!(second, Err(CheckoutError::AlreadyInProgress)));

        // The first attempt is unaffected by the rejected one.
        let result = first.await.unwrap().unwrap();
        assert_eq!(result.reference, "CMD1");
        assert_eq!(backend.order_count(), 1);
        assert_eq!(archive.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_coordinator_returns_to_idle_after_each_attempt() {
        let (coordinator, backend, _, _) = setup();

        coordinator.submit(&sample_order()).await.unwrap();
        assert_eq!(coordinator.state(), SubmissionState::Idle);

        backend.set_fail_on_submit(true);
        coordinator.submit(&sample_order()).await.unwrap();
        assert_eq!(coordinator.state(), SubmissionState::Idle);

        // A later legitimate submission is never blocked.
        backend.set_fail_on_submit(false);
        let result = coordinator.submit(&sample_order()).await.unwrap();
        assert_eq!(result.reference, "CMD2");
    }

    #[tokio::test]
    async fn test_every_attempt_archives_exactly_one_record() {
        let (coordinator, backend, _, archive) = setup();

        let order = sample_order();
        coordinator.submit(&order).await.unwrap();
        assert_eq!(archive.len().unwrap(), 1);

        backend.set_fail_on_submit(true);
        coordinator.submit(&order).await.unwrap();
        let records = archive.list().unwrap();
        assert_eq!(records.len(), 2);

        // Archived orders match the submitted order by value.
        assert_eq!(records[0].order, order);
        assert_eq!(records[1].order, order);
        assert_eq!(records[0].reference, "CMD1");
        assert!(records[1].reference.starts_with("TEMP"));
    }
}
