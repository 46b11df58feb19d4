//! Holds the signed-in user's id token for outbound requests.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// Supplies the bearer token attached to REST calls.
pub trait AuthClient: Send + Sync {
    /// The current id token, if any.
    fn id_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.id_token().is_some()
    }
}

#[derive(Debug, Clone)]
struct Session {
    id_token: String,
    expires_at: DateTime<Utc>,
}

/// Session state fed by the identity provider's login callback.
#[derive(Debug, Default)]
pub struct SessionAuth {
    session: RwLock<Option<Session>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token returned by the identity provider; it expires `expires_in` from now.
    pub fn set_session(&self, id_token: impl Into<String>, expires_in: Duration) {
        let session = Session {
            id_token: id_token.into(),
            expires_at: Utc::now() + expires_in,
        };
        info!("Session established, expires at {}", session.expires_at);
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
    }

    pub fn logout(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.expires_at))
    }
}

impl AuthClient for SessionAuth {
    /// Expired tokens are not handed out.
    fn id_token(&self) -> Option<String> {
        let guard = self.session.read().ok()?;
        guard
            .as_ref()
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.id_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unauthenticated() {
        let auth = SessionAuth::new();
        assert!(!auth.is_authenticated());
        assert!(auth.id_token().is_none());
    }

    #[test]
    fn test_session_lifecycle() {
        let auth = SessionAuth::new();
        auth.set_session("token-1", Duration::hours(1));
        assert!(auth.is_authenticated());
        assert_eq!(auth.id_token().as_deref(), Some("token-1"));

        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(auth.expires_at().is_none());
    }

    #[test]
    fn test_expired_session_is_unauthenticated() {
        let auth = SessionAuth::new();
        auth.set_session("token-1", Duration::seconds(-1));
        assert!(!auth.is_authenticated());
    }
}
