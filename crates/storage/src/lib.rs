//! Client-side key-value persistence and the order archive.
//!
//! Storage here plays the role a browser's local storage plays for the
//! storefront: a small string-keyed store holding the serialized order
//! archive, the cached user, and the session token. Two backends are
//! provided behind the [`KeyValueStore`] trait: an in-memory store for
//! tests and a JSON-file store for real runs.
//!
//! All operations are synchronous; persistence is a cache, never a
//! suspension point.

mod archive;
mod error;
mod kv;

pub use archive::{ArchiveRecord, OrderArchive};
pub use error::StorageError;
pub use kv::{FileKvStore, InMemoryKvStore, KeyValueStore};

/// Key holding the serialized list of archived orders.
pub const ORDERS_KEY: &str = "ma_creme_orders";

/// Key holding the serialized authenticated user.
pub const USER_KEY: &str = "sdcreme_user";

/// Key holding the session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
