//! Session state machine: Guest or Authenticated.
//!
//! The session manager owns the auth token and the hydrated profile, and is
//! the single authority the controller consults when routing cart operations
//! between the local store and the remote gateway.

use std::sync::Arc;

use secrecy::SecretString;

use kiosk_core::{Credentials, User};

use crate::api::ApiClient;
use crate::error::{AppError, Result};
use crate::storage::{KeyValueStore, keys};

/// Which login surface the user came through.
///
/// The admin entry point deliberately rejects non-admin accounts even when
/// the credentials are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginEntry {
    Storefront,
    Admin,
}

/// Current session state.
pub enum Session {
    Guest,
    Authenticated { token: SecretString, user: User },
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => f.write_str("Guest"),
            Self::Authenticated { user, .. } => f
                .debug_struct("Authenticated")
                .field("token", &"[REDACTED]")
                .field("user", user)
                .finish(),
        }
    }
}

/// Owns the session and its durable token slot.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    session: Session,
}

impl SessionManager {
    /// Start as Guest. Call [`hydrate`](Self::hydrate) to pick up a stored
    /// token.
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            api,
            store,
            session: Session::Guest,
        }
    }

    /// Reconstruct the session from a previously stored token, if any.
    ///
    /// A rejected or unreachable token is discarded and the session stays
    /// Guest; hydration never fails toward the caller.
    pub async fn hydrate(&mut self) {
        let Some(raw) = self.store.get(keys::TOKEN) else {
            return;
        };
        let token = SecretString::from(raw);

        match self.api.me(&token).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "session hydrated from stored token");
                self.session = Session::Authenticated { token, user };
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token rejected, discarding");
                if let Err(e) = self.store.delete(keys::TOKEN) {
                    tracing::warn!(error = %e, "failed to remove stale token");
                }
                self.session = Session::Guest;
            }
        }
    }

    /// Log in and hydrate the profile.
    ///
    /// The token is persisted durably before the profile fetch. When the
    /// admin entry point is used with a non-admin account, the session
    /// reverts to Guest, the token is discarded, and `AppError::NotAdmin`
    /// is returned.
    ///
    /// # Errors
    ///
    /// Propagates backend rejections and storage failures; the session is
    /// left Guest in every error case.
    pub async fn login(&mut self, credentials: &Credentials, entry: LoginEntry) -> Result<User> {
        let token = self.api.login(credentials).await?;
        self.store.put(keys::TOKEN, &token.access_token)?;
        let token = SecretString::from(token.access_token);

        let user = match self.api.me(&token).await {
            Ok(user) => user,
            Err(e) => {
                self.discard_token();
                return Err(e.into());
            }
        };

        if entry == LoginEntry::Admin && !user.is_admin {
            tracing::warn!(username = %user.username, "non-admin account on admin entry point");
            self.discard_token();
            return Err(AppError::NotAdmin);
        }

        tracing::info!(username = %user.username, is_admin = user.is_admin, "signed in");
        self.session = Session::Authenticated {
            token,
            user: user.clone(),
        };
        Ok(user)
    }

    /// Log out: discard the token (memory and storage) and return to Guest.
    /// No backend call is made; the local cart is untouched.
    pub fn logout(&mut self) {
        self.discard_token();
        tracing::info!("signed out");
    }

    fn discard_token(&mut self) {
        if let Err(e) = self.store.delete(keys::TOKEN) {
            tracing::warn!(error = %e, "failed to remove stored token");
        }
        self.session = Session::Guest;
    }

    #[must_use]
    pub fn current(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            &self.session,
            Session::Authenticated { user, .. } if user.is_admin
        )
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.session {
            Session::Authenticated { user, .. } => Some(user),
            Session::Guest => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        match &self.session {
            Session::Authenticated { token, .. } => Some(token),
            Session::Guest => None,
        }
    }
}
