//! External service traits and their HTTP and in-memory
//! implementations.

pub mod backend;
pub mod relay;

pub use backend::{HttpOrderBackend, InMemoryOrderBackend, OrderBackend};
pub use relay::{HandoffRelay, HttpHandoffRelay, InMemoryHandoffRelay};
