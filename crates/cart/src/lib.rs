//! In-memory shopping cart state.
//!
//! The cart is a pure state container: shopper-facing code mutates it
//! through the operations on [`Cart`], and derived values (the total,
//! the badge count) are recomputed on every read so they can never go
//! stale.

mod item;
mod store;

pub use item::{CartItem, CatalogItem};
pub use store::Cart;
