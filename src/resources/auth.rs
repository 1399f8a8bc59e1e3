//! Session endpoints under `/api/auth`.
//!
//! ERROR HANDLING
//! ==============
//! `current` is a silent probe: a missing or expired session is the normal
//! signed-out state, so it only logs. Every other call toasts on failure and
//! on success.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use serde::de::IgnoredAny;

use super::{report_failure, report_success};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{ForgotParams, LoginParams, MagicLinkParams, RegisterParams, ResetParams, User};
use crate::notify::Notifier;

pub(crate) const CURRENT_ENDPOINT: &str = "/api/auth/current";
pub(crate) const REGISTER_ENDPOINT: &str = "/api/auth/register";
pub(crate) const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub(crate) const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub(crate) const MAGIC_LINK_ENDPOINT: &str = "/api/auth/magic-link";
pub(crate) const FORGOT_ENDPOINT: &str = "/api/auth/forgot";
pub(crate) const RESET_ENDPOINT: &str = "/api/auth/reset";

pub(crate) fn verify_magic_link_endpoint(token: &str) -> String {
    format!("{MAGIC_LINK_ENDPOINT}/{token}")
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl AuthApi {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// The user owning the stored token.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`]; nothing is toasted.
    pub async fn current(&self) -> Result<User, ClientError> {
        self.client
            .get(CURRENT_ENDPOINT)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "no current user"))
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn register(&self, params: &RegisterParams) -> Result<User, ClientError> {
        let user: User = self.client.post(REGISTER_ENDPOINT, params).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error sending registering!", "Please try again later.", e)
        })?;
        report_success(self.notifier.as_ref(), "Account created!", Some(user.email.as_str()));
        Ok(user)
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn login(&self, params: &LoginParams) -> Result<User, ClientError> {
        let user: User = self.client.post(LOGIN_ENDPOINT, params).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error logging in!", "Check your email and password.", e)
        })?;
        report_success(self.notifier.as_ref(), "Signed in!", Some(user.email.as_str()));
        Ok(user)
    }

    /// Invalidate the session server-side. Sent as a GET.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.client
            .get::<IgnoredAny>(LOGOUT_ENDPOINT)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), "Error logging out!", "Please try again.", e))?;
        report_success(self.notifier.as_ref(), "Signed out!", None);
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn request_magic_link(&self, params: &MagicLinkParams) -> Result<(), ClientError> {
        self.client
            .post::<IgnoredAny, _>(MAGIC_LINK_ENDPOINT, params)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), "Error sending magic link!", "Please try again.", e))?;
        report_success(self.notifier.as_ref(), "Magic link sent!", Some("Check your inbox."));
        Ok(())
    }

    /// Exchange a magic-link token for a signed-in user.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn verify_magic_link(&self, token: &str) -> Result<User, ClientError> {
        let user: User = self
            .client
            .get(&verify_magic_link_endpoint(token))
            .await
            .map_err(|e| {
                report_failure(self.notifier.as_ref(), "Error verifying magic link!", "Please try again.", e)
            })?;
        report_success(self.notifier.as_ref(), "Signed in!", Some(user.email.as_str()));
        Ok(user)
    }

    /// Ask for a password reset email.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn forgot(&self, params: &ForgotParams) -> Result<(), ClientError> {
        self.client.post::<IgnoredAny, _>(FORGOT_ENDPOINT, params).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error sending password reset email!", "Please try again.", e)
        })?;
        report_success(self.notifier.as_ref(), "Password reset email sent!", None);
        Ok(())
    }

    /// Set a new password using the emailed reset token.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn reset(&self, params: &ResetParams) -> Result<(), ClientError> {
        self.client
            .post::<IgnoredAny, _>(RESET_ENDPOINT, params)
            .await
            .map_err(|e| report_failure(self.notifier.as_ref(), "Error changing password!", "Please try again.", e))?;
        report_success(self.notifier.as_ref(), "Password changed!", None);
        Ok(())
    }
}
