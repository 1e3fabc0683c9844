//! Order composition and validation.
//!
//! This crate turns the transient checkout form plus the current cart
//! into a canonical, immutable [`Order`] record. Validation happens
//! here, at the boundary: downstream code (submission, archival,
//! hand-off rendering) can trust every field of a composed order.

mod composer;
mod form;
mod record;

pub use composer::{compose, compose_at};
pub use form::{OrderForm, PaymentMethod};
pub use record::{Order, OrderLine};

use thiserror::Error;

/// Reasons an order could not be composed.
///
/// These are the only submission failures ever surfaced to the
/// shopper; they must be corrected before retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more required form fields are empty.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Names of the empty required fields.
        fields: Vec<&'static str>,
    },
}
