//! Shared value objects for the storefront.

mod types;

pub use types::{Category, Money, ProductId};
