//! Session guard and the authentication delegate it wraps.
//!
//! Credential exchange is the backend's business; this crate only
//! caches the resulting identity and gates checkout-initiating
//! actions. Callers hitting [`SessionError::Unauthenticated`] must
//! send the shopper to the sign-in flow instead of proceeding to
//! order composition.

mod backend;
mod error;
mod guard;
mod user;

pub use backend::{AuthBackend, AuthSession, HttpAuthBackend, InMemoryAuthBackend};
pub use error::SessionError;
pub use guard::SessionGuard;
pub use user::{Role, User};
