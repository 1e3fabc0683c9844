//! Order submission coordination.
//!
//! This crate drives the checkout hand-off:
//! 1. Try to persist the order on the remote backend.
//! 2. If that produced an order ID, ask the relay for a WhatsApp link.
//! 3. Whenever either call fails, build an equivalent link locally.
//! 4. Archive the attempt on the client, always.
//!
//! Remote failures never block the shopper: the coordinator absorbs
//! them and degrades to the local hand-off path. The only errors a
//! caller sees are a second submission while one is in flight, and
//! validation failures raised earlier by the order composer.
//!
//! Table reservations ([`reservation`]) have no remote leg at all:
//! they always hand off through the same WhatsApp contact.

mod coordinator;
mod error;
pub mod handoff;
pub mod reservation;
mod state;

pub mod services;

pub use coordinator::{SubmissionCoordinator, SubmissionOutcome, SubmissionResult};
pub use error::{BackendError, CheckoutError, RelayError, ReservationError};
pub use reservation::ReservationForm;
pub use services::{
    HandoffRelay, HttpHandoffRelay, HttpOrderBackend, InMemoryHandoffRelay, InMemoryOrderBackend,
    OrderBackend,
};
pub use state::SubmissionState;

/// The fixed WhatsApp contact the storefront hands orders to.
pub const WHATSAPP_NUMBER: &str = "221763034401";
