//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the dashboard route guard and every identity-dependent view. The
//! user store is the only writer of the persisted session token: whatever
//! [`UserStore::set_user`] stores is what the next request carries.
//!
//! DESIGN
//! ======
//! `settled` flips to true once the first current-user check finishes,
//! successfully or not. Redirects are suppressed until then so a page load
//! with a valid token does not bounce through `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::session::SessionToken;
use crate::net::types::{ForgotParams, LoginParams, MagicLinkParams, RegisterParams, ResetParams, User};
use crate::notify::Notifier;
use crate::resources::auth::AuthApi;
use crate::util::auth::{HOME_PATH, Navigator, apply_route_guard};

/// Authentication state tracking the current user and whether the initial
/// check has completed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub settled: bool,
}

/// Result of a magic-link request. Returned on both paths so the caller can
/// always run its follow-up (close a dialog, re-enable a form).
#[derive(Debug)]
pub enum MagicLinkOutcome {
    Sent,
    Failed(ClientError),
}

impl MagicLinkOutcome {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// # Errors
    ///
    /// Returns the request error for [`MagicLinkOutcome::Failed`].
    pub fn into_result(self) -> Result<(), ClientError> {
        match self {
            Self::Sent => Ok(()),
            Self::Failed(e) => Err(e),
        }
    }
}

pub struct UserStore {
    api: AuthApi,
    session: SessionToken,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<AuthState>,
}

impl UserStore {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session: client.session().clone(),
            api: AuthApi::new(client, notifier),
            navigator,
            state: watch::Sender::new(AuthState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// # Errors
    ///
    /// See [`UserStore::fetch_current_user`].
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.fetch_current_user().await
    }

    /// Resolve the stored token to a user. Any failure signs the user out
    /// and clears the token. Either way the store becomes settled.
    ///
    /// # Errors
    ///
    /// Propagates the request error after signing out.
    pub async fn fetch_current_user(&self) -> Result<(), ClientError> {
        match self.api.current().await {
            Ok(user) => {
                self.commit(|s| {
                    s.user = Some(user);
                    s.settled = true;
                });
                Ok(())
            }
            Err(e) => {
                tracing::info!(error = %e, "current user unavailable; signing out");
                if let Err(storage) = self.session.clear() {
                    tracing::warn!(error = %storage, "failed to clear session token");
                }
                self.commit(|s| {
                    s.user = None;
                    s.settled = true;
                });
                Err(e)
            }
        }
    }

    /// Replace the current user and persist its token (`None` clears both).
    ///
    /// The in-memory user is updated even when persisting the token fails.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the token cannot be persisted.
    pub fn set_user(&self, user: Option<User>) -> Result<(), ClientError> {
        let token = user.as_ref().map_or("", |u| u.token.as_str());
        let stored = self.session.set(token);
        self.commit(|s| s.user = user);
        stored
    }

    /// # Errors
    ///
    /// Propagates the request or storage error.
    pub async fn login(&self, params: &LoginParams) -> Result<User, ClientError> {
        let user = self.api.login(params).await?;
        self.set_user(Some(user.clone()))?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Propagates the request or storage error.
    pub async fn register(&self, params: &RegisterParams) -> Result<User, ClientError> {
        let user = self.api.register(params).await?;
        self.set_user(Some(user.clone()))?;
        Ok(user)
    }

    pub async fn request_magic_link(&self, params: &MagicLinkParams) -> MagicLinkOutcome {
        match self.api.request_magic_link(params).await {
            Ok(()) => MagicLinkOutcome::Sent,
            Err(e) => MagicLinkOutcome::Failed(e),
        }
    }

    /// Sign in with a magic-link token. On failure the visitor is sent home.
    ///
    /// # Errors
    ///
    /// Propagates the request or storage error.
    pub async fn verify_magic_link(&self, token: &str) -> Result<User, ClientError> {
        match self.api.verify_magic_link(token).await {
            Ok(user) => {
                self.set_user(Some(user.clone()))?;
                Ok(user)
            }
            Err(e) => {
                self.navigator.push(HOME_PATH);
                Err(e)
            }
        }
    }

    /// Sign out. Local state is cleared even when the server call fails.
    ///
    /// # Errors
    ///
    /// Propagates the request error, or the storage error if the request
    /// succeeded.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let remote = self.api.logout().await;
        let local = self.set_user(None);
        remote.and(local)
    }

    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn request_password_reset(&self, params: &ForgotParams) -> Result<(), ClientError> {
        self.api.forgot(params).await
    }

    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn change_password(&self, params: &ResetParams) -> Result<(), ClientError> {
        self.api.reset(params).await
    }

    fn commit(&self, modify: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(modify);
        let state = self.state.borrow().clone();
        apply_route_guard(&state, self.navigator.as_ref());
    }
}
