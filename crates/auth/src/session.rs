//! Admin session lifecycle: `init` / `login` / `logout`.

use std::future::Future;
use std::sync::{Arc, RwLock};

use eventsite_core::ServerMessage;
use thiserror::Error;

use crate::store::TokenStore;
use crate::token::BearerToken;

/// Shown when the server rejects a login without saying why.
const LOGIN_FALLBACK_MESSAGE: &str = "Invalid password";

/// Exchanges an admin password for a bearer token.
pub trait Authenticator {
    type Error: ServerMessage + core::fmt::Display;

    fn authenticate(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<BearerToken, Self::Error>> + Send;
}

/// Human-readable login failure, ready for the login form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: String,
}

/// Explicit auth state shared by the HTTP client and the views.
///
/// Cheap to clone; all clones observe the same token.
#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    token: Arc<RwLock<Option<BearerToken>>>,
}

impl AuthSession {
    /// Seed the session from the persisted credential, if any.
    ///
    /// An unreadable store is treated as logged out.
    pub fn init(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("failed to load persisted admin token: {err}");
                None
            }
        };

        tracing::debug!(is_admin = token.is_some(), "auth session initialized");

        Self {
            store,
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    /// Token to attach to outgoing requests, if logged in.
    pub fn token(&self) -> Option<BearerToken> {
        self.token.read().map(|t| t.clone()).unwrap_or_default()
    }

    /// Persist a freshly issued token and switch to admin.
    ///
    /// A persistence failure keeps the in-memory session and is only logged:
    /// the admin stays logged in until the process exits.
    pub fn establish(&self, token: BearerToken) {
        if let Err(err) = self.store.save(&token) {
            tracing::error!("failed to persist admin token: {err}");
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    /// Submit the password; on success the token is persisted and the session
    /// becomes admin.
    pub async fn login<A>(&self, authenticator: &A, password: &str) -> Result<(), LoginFailure>
    where
        A: Authenticator,
    {
        match authenticator.authenticate(password).await {
            Ok(token) => {
                self.establish(token);
                tracing::info!("admin login succeeded");
                Ok(())
            }
            Err(err) => {
                tracing::error!("admin login failed: {err}");
                Err(LoginFailure {
                    message: err
                        .server_message()
                        .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                        .to_string(),
                })
            }
        }
    }

    /// Forget the credential, both in memory and in the store.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            tracing::error!("failed to clear persisted admin token: {err}");
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        tracing::info!("admin logged out");
    }
}

impl core::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthSession")
            .field("is_admin", &self.is_admin())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;

    #[derive(Debug)]
    struct Rejected(Option<&'static str>);

    impl core::fmt::Display for Rejected {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("rejected")
        }
    }

    impl ServerMessage for Rejected {
        fn server_message(&self) -> Option<&str> {
            self.0
        }
    }

    struct FixedAuthenticator(Result<&'static str, Option<&'static str>>);

    impl Authenticator for FixedAuthenticator {
        type Error = Rejected;

        async fn authenticate(&self, _password: &str) -> Result<BearerToken, Rejected> {
            self.0.map(BearerToken::new).map_err(Rejected)
        }
    }

    #[test]
    fn init_seeds_admin_flag_from_store() {
        let empty = AuthSession::init(Arc::new(MemoryTokenStore::new()));
        assert!(!empty.is_admin());

        let stored = AuthSession::init(Arc::new(MemoryTokenStore::with_token(BearerToken::new("t"))));
        assert!(stored.is_admin());
        assert_eq!(stored.token(), Some(BearerToken::new("t")));
    }

    #[tokio::test]
    async fn login_persists_token() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = AuthSession::init(store.clone());

        session
            .login(&FixedAuthenticator(Ok("jwt")), "admin123")
            .await
            .unwrap();

        assert!(session.is_admin());
        assert_eq!(store.load().unwrap(), Some(BearerToken::new("jwt")));
    }

    #[tokio::test]
    async fn login_failure_uses_server_message_or_fallback() {
        let session = AuthSession::init(Arc::new(MemoryTokenStore::new()));

        let err = session
            .login(&FixedAuthenticator(Err(Some("Invalid password\n"))), "x")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid password\n");

        let err = session
            .login(&FixedAuthenticator(Err(None)), "x")
            .await
            .unwrap_err();
        assert_eq!(err.message, LOGIN_FALLBACK_MESSAGE);
        assert!(!session.is_admin());
    }

    #[test]
    fn logout_clears_every_clone() {
        let store = Arc::new(MemoryTokenStore::with_token(BearerToken::new("t")));
        let session = AuthSession::init(store.clone());
        let view_copy = session.clone();

        session.logout();

        assert!(!view_copy.is_admin());
        assert!(view_copy.token().is_none());
        assert!(store.load().unwrap().is_none());
    }
}
