//! Authentication backend trait and its implementations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::SessionError;
use crate::user::User;

/// A successfully established session: the identity plus the bearer
/// token the backend issued for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent verification.
    pub token: String,
}

/// Credential exchange with the external auth service.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchanges email and password for a session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, SessionError>;

    /// Creates an account and returns its first session.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<AuthSession, SessionError>;

    /// Verifies a previously issued token and returns its user.
    async fn verify(&self, token: &str) -> Result<User, SessionError>;
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: Option<User>,
    token: Option<String>,
    error: Option<String>,
}

/// Auth backend talking to the real service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    /// Creates a backend client for the given base URL
    /// (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn into_session(response: AuthResponse) -> Result<AuthSession, SessionError> {
        match (response.user, response.token) {
            (Some(user), Some(token)) => Ok(AuthSession { user, token }),
            _ => Err(SessionError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "missing user or token in response".to_string()),
            )),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, SessionError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body: AuthResponse = response.json().await?;
        if !status.is_success() {
            return Err(SessionError::Rejected(
                body.error.unwrap_or_else(|| status.to_string()),
            ));
        }
        Self::into_session(body)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<AuthSession, SessionError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "email": email,
                "password": password,
                "name": name,
                "phone": phone,
            }))
            .send()
            .await?;

        let status = response.status();
        let body: AuthResponse = response.json().await?;
        if !status.is_success() {
            return Err(SessionError::Rejected(
                body.error.unwrap_or_else(|| status.to_string()),
            ));
        }
        Self::into_session(body)
    }

    async fn verify(&self, token: &str) -> Result<User, SessionError> {
        let response = self
            .client
            .post(self.url("/api/auth/verify"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SessionError::Rejected(response.status().to_string()));
        }

        let body: AuthResponse = response.json().await?;
        body.user
            .ok_or_else(|| SessionError::Rejected("missing user in response".to_string()))
    }
}

#[derive(Debug, Default)]
struct InMemoryAuthState {
    accounts: HashMap<String, (String, User)>,
    tokens: HashMap<String, String>,
    next_id: u32,
    unreachable: bool,
}

/// In-memory auth backend for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthBackend {
    state: Arc<RwLock<InMemoryAuthState>>,
}

impl InMemoryAuthBackend {
    /// Creates a new in-memory auth backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend being unreachable.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.write().unwrap().unreachable = unreachable;
    }

    /// Returns the number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.read().unwrap().accounts.len()
    }

    fn check_reachable(&self) -> Result<(), SessionError> {
        if self.state.read().unwrap().unreachable {
            return Err(SessionError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for InMemoryAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, SessionError> {
        self.check_reachable()?;
        let mut state = self.state.write().unwrap();

        let user = match state.accounts.get(email) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => return Err(SessionError::Rejected("invalid credentials".to_string())),
        };

        state.next_id += 1;
        let token = format!("TOK-{:04}", state.next_id);
        state.tokens.insert(token.clone(), email.to_string());
        Ok(AuthSession { user, token })
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<AuthSession, SessionError> {
        self.check_reachable()?;
        let mut state = self.state.write().unwrap();

        if state.accounts.contains_key(email) {
            return Err(SessionError::Rejected("account already exists".to_string()));
        }

        state.next_id += 1;
        let user = User {
            id: format!("u{}", state.next_id),
            email: email.to_string(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            loyalty_points: 0,
            role: crate::user::Role::Customer,
        };
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));

        state.next_id += 1;
        let token = format!("TOK-{:04}", state.next_id);
        state.tokens.insert(token.clone(), email.to_string());
        Ok(AuthSession { user, token })
    }

    async fn verify(&self, token: &str) -> Result<User, SessionError> {
        self.check_reachable()?;
        let state = self.state.read().unwrap();

        let email = state
            .tokens
            .get(token)
            .ok_or_else(|| SessionError::Rejected("unknown token".to_string()))?;
        let (_, user) = state
            .accounts
            .get(email)
            .ok_or_else(|| SessionError::Rejected("account gone".to_string()))?;
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login() {
        let backend = InMemoryAuthBackend::new();
        let session = backend
            .register("awa@example.sn", "secret", "Awa Diop", Some("771234567"))
            .await
            .unwrap();
        assert_eq!(session.user.name, "Awa Diop");
        assert_eq!(backend.account_count(), 1);

        let again = backend.login("awa@example.sn", "secret").await.unwrap();
        assert_eq!(again.user.email, "awa@example.sn");
        assert_ne!(again.token, session.token);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();

        let result = backend.login("awa@example.sn", "nope").await;
        assert!(matches!(result, Err(SessionError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_verify_issued_token() {
        let backend = InMemoryAuthBackend::new();
        let session = backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();

        let user = backend.verify(&session.token).await.unwrap();
        assert_eq!(user.email, "awa@example.sn");

        let unknown = backend.verify("TOK-9999").await;
        assert!(matches!(unknown, Err(SessionError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let backend = InMemoryAuthBackend::new();
        backend
            .register("awa@example.sn", "secret", "Awa Diop", None)
            .await
            .unwrap();

        let result = backend
            .register("awa@example.sn", "other", "Someone Else", None)
            .await;
        assert!(matches!(result, Err(SessionError::Rejected(_))));
        assert_eq!(backend.account_count(), 1);
    }
}
