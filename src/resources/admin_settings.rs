//! Singleton admin settings at `/api/admin_settings`.

#[cfg(test)]
#[path = "admin_settings_test.rs"]
mod admin_settings_test;

use std::sync::Arc;

use super::{report_failure, report_success};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{AdminSettings, AdminSettingsParams};
use crate::notify::Notifier;

pub(crate) const ADMIN_SETTINGS_ENDPOINT: &str = "/api/admin_settings";

#[derive(Clone)]
pub struct AdminSettingsApi {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl AdminSettingsApi {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn fetch(&self) -> Result<AdminSettings, ClientError> {
        self.client.get(ADMIN_SETTINGS_ENDPOINT).await.map_err(|e| {
            report_failure(
                self.notifier.as_ref(),
                "Error fetching admin settings.",
                "Failed to load admin settings. Please try again.",
                e,
            )
        })
    }

    /// Apply a partial update. Only the fields set in `params` are sent.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn update(&self, params: &AdminSettingsParams) -> Result<AdminSettings, ClientError> {
        let settings = self.client.put(ADMIN_SETTINGS_ENDPOINT, params).await.map_err(|e| {
            report_failure(
                self.notifier.as_ref(),
                "Error updating admin settings",
                "Failed to update admin settings. Please try again.",
                e,
            )
        })?;
        report_success(self.notifier.as_ref(), "Success", Some("Admin settings updated successfully"));
        Ok(settings)
    }
}
