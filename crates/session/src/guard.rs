//! The session guard: caches the identity, gates checkout.

use std::sync::RwLock;

use storage::{AUTH_TOKEN_KEY, KeyValueStore, USER_KEY};

use crate::backend::{AuthBackend, AuthSession};
use crate::error::SessionError;
use crate::user::User;

/// Wraps the auth delegate and answers "who is signed in?".
///
/// The guard persists the token and the serialized user in the
/// client-side store so a session survives restarts, and re-verifies
/// the token against the backend on [`SessionGuard::restore`].
pub struct SessionGuard<B, S> {
    backend: B,
    store: S,
    current: RwLock<Option<User>>,
}

impl<B: AuthBackend, S: KeyValueStore> SessionGuard<B, S> {
    /// Creates a guard over the given delegate and store.
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            current: RwLock::new(None),
        }
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.current.read().ok().and_then(|user| user.clone())
    }

    /// Returns true if a shopper is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Returns the signed-in user, or [`SessionError::Unauthenticated`].
    ///
    /// Checkout-initiating actions call this first; on error the
    /// caller must redirect to sign-in and must not compose an order.
    pub fn require_authenticated(&self) -> Result<User, SessionError> {
        self.current_user().ok_or(SessionError::Unauthenticated)
    }

    /// Signs in with email and password and persists the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let session = self.backend.login(email, password).await?;
        self.remember(&session)?;
        Ok(session.user)
    }

    /// Registers a new account and persists its first session.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, SessionError> {
        let session = self.backend.register(email, password, name, phone).await?;
        self.remember(&session)?;
        Ok(session.user)
    }

    /// Signs out and clears the persisted session.
    pub fn logout(&self) -> Result<(), SessionError> {
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }

    /// Restores a persisted session at startup.
    ///
    /// Re-verifies the stored token with the backend. A rejected token
    /// clears the persisted session; an unreachable backend keeps the
    /// cached user so the shopper is not signed out by an outage.
    pub async fn restore(&self) -> Result<Option<User>, SessionError> {
        let token = self.store.get(AUTH_TOKEN_KEY)?;
        let cached = self.store.get(USER_KEY)?;

        let (Some(token), Some(cached)) = (token, cached) else {
            return Ok(None);
        };

        match self.backend.verify(&token).await {
            Ok(user) => {
                self.set_current(user.clone());
                Ok(Some(user))
            }
            Err(SessionError::Rejected(reason)) => {
                tracing::info!(%reason, "stored session rejected, clearing");
                self.store.remove(AUTH_TOKEN_KEY)?;
                self.store.remove(USER_KEY)?;
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(error = %err, "auth backend unreachable, keeping cached user");
                let user: User = serde_json::from_str(&cached)?;
                self.set_current(user.clone());
                Ok(Some(user))
            }
        }
    }

    fn remember(&self, session: &AuthSession) -> Result<(), SessionError> {
        self.store.set(AUTH_TOKEN_KEY, &session.token)?;
        self.store
            .set(USER_KEY, &serde_json::to_string(&session.user)?)?;
        self.set_current(session.user.clone());
        Ok(())
    }

    fn set_current(&self, user: User) {
        if let Ok(mut current) = self.current.write() {
            *current = Some(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryAuthBackend;
    use storage::InMemoryKvStore;

    async fn guard_with_account() -> SessionGuard<InMemoryAuthBackend, InMemoryKvStore> {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", Some("771234567"))
            .await
            .unwrap();
        SessionGuard::new(backend, InMemoryKvStore::new())
    }

    #[tokio::test]
    async fn test_unauthenticated_by_default() {
        let guard = guard_with_account().await;
        assert!(!guard.is_authenticated());
        assert!(matches!(
            guard.require_authenticated(),
            Err(SessionError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_login_persists_token_and_user() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();
        let store = InMemoryKvStore::new();
        let guard = SessionGuard::new(backend, store.clone());

        let user = guard.login("awa@example.sn", "secret").await.unwrap();
        assert_eq!(user.name, "Awa Diop");
        assert_eq!(guard.require_authenticated().unwrap().name, "Awa Diop");
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_some());
        assert!(store.get(USER_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();
        let store = InMemoryKvStore::new();
        let guard = SessionGuard::new(backend, store.clone());

        guard.login("awa@example.sn", "secret").await.unwrap();
        guard.logout().unwrap();

        assert!(!guard.is_authenticated());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_verifies_stored_token() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();
        let store = InMemoryKvStore::new();

        {
            let guard = SessionGuard::new(backend.clone(), store.clone());
            guard.login("awa@example.sn", "secret").await.unwrap();
        }

        // Fresh guard over the same store: a restart.
        let guard = SessionGuard::new(backend, store);
        let restored = guard.restore().await.unwrap();
        assert_eq!(restored.unwrap().name, "Awa Diop");
        assert!(guard.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_rejected_token_clears_session() {
        let backend = InMemoryAuthBackend::new();
        let store = InMemoryKvStore::new();
        store.set(AUTH_TOKEN_KEY, "TOK-9999").unwrap();
        store
            .set(USER_KEY, r#"{"id":"u1","email":"x@x","name":"X"}"#)
            .unwrap();

        let guard = SessionGuard::new(backend, store.clone());
        let restored = guard.restore().await.unwrap();

        assert!(restored.is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_outage_keeps_cached_user() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();
        let store = InMemoryKvStore::new();

        {
            let guard = SessionGuard::new(backend.clone(), store.clone());
            guard.login("awa@example.sn", "secret").await.unwrap();
        }

        backend.set_unreachable(true);
        let guard = SessionGuard::new(backend, store.clone());
        let restored = guard.restore().await.unwrap();

        assert_eq!(restored.unwrap().name, "Awa Diop");
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_restore_with_nothing_stored() {
        let guard = SessionGuard::new(InMemoryAuthBackend::new(), InMemoryKvStore::new());
        assert!(guard.restore().await.unwrap().is_none());
    }
}
