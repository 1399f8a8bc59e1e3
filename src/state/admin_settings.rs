//! Admin settings singleton cache.

#[cfg(test)]
#[path = "admin_settings_test.rs"]
mod admin_settings_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::{Loading, LoadingGuard};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{AdminSettings, AdminSettingsParams};
use crate::notify::Notifier;
use crate::resources::admin_settings::AdminSettingsApi;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminSettingsState {
    pub settings: Option<AdminSettings>,
    pub loading: bool,
}

impl Loading for AdminSettingsState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

pub struct AdminSettingsStore {
    api: AdminSettingsApi,
    state: watch::Sender<AdminSettingsState>,
}

impl AdminSettingsStore {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: AdminSettingsApi::new(client, notifier),
            state: watch::Sender::new(AdminSettingsState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> AdminSettingsState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AdminSettingsState> {
        self.state.subscribe()
    }

    /// # Errors
    ///
    /// See [`AdminSettingsStore::fetch`].
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.fetch().await
    }

    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn fetch(&self) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let settings = self.api.fetch().await?;
        self.state.send_modify(|s| s.settings = Some(settings));
        Ok(())
    }

    /// Send a partial update; the response replaces the cache wholesale.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn update(&self, params: &AdminSettingsParams) -> Result<AdminSettings, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let settings = self.api.update(params).await?;
        self.state.send_modify(|s| s.settings = Some(settings.clone()));
        Ok(settings)
    }
}
