//! Session
//!
//! Holds the bearer token used by every authenticated request.
//!
//! The [`Session`] handle is passed explicitly into each fetch instead of
//! being looked up from ambient state. Expiry is never tracked locally: the
//! dashboard discovers it when the API answers `401`.

mod error;
mod store;

pub use error::{SessionError, SessionResult};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::api::{AnalyticsApi, ApiError, Credentials};
use std::sync::Arc;

/// Shared handle over a [`TokenStore`]
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Current token; store failures are logged and read as absent
    pub fn token(&self) -> Option<String> {
        match self.store.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> SessionResult<()> {
        self.store.set(token)
    }

    /// Drop the token; failures are logged since the caller is already
    /// on its way to a re-login
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear session token");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Exchange credentials for a token and store it
pub async fn login(
    api: &dyn AnalyticsApi,
    session: &Session,
    credentials: &Credentials,
) -> Result<(), ApiError> {
    let token = api.login(credentials).await?;
    session.set_token(&token)?;

    tracing::info!(email = %credentials.email, "Logged in");
    Ok(())
}

/// Forget the stored token
pub fn logout(session: &Session) {
    session.clear();
    tracing::info!("Logged out");
}
