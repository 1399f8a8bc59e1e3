//! The signed-in user's weekly availability, grouped by weekday.
//!
//! Create and update answer with a single window, so the week is re-fetched
//! afterwards and the success toast waits for that re-fetch. Delete answers with the remaining week, which replaces the
//! cache directly.

#[cfg(test)]
#[path = "weekly_availability_test.rs"]
mod weekly_availability_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::{Loading, LoadingGuard};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{WeeklyAvailability, WeeklyAvailabilityByWeekday, WeeklyAvailabilityParams};
use crate::notify::Notifier;
use crate::resources::report_success;
use crate::resources::weekly_availabilities::{WINDOW_CREATED, WINDOW_UPDATED, WeeklyAvailabilitiesApi};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeeklyAvailabilityState {
    /// `None` until the first successful fetch.
    pub availability: Option<WeeklyAvailabilityByWeekday>,
    pub loading: bool,
}

impl Loading for WeeklyAvailabilityState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

pub struct WeeklyAvailabilityStore {
    api: WeeklyAvailabilitiesApi,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<WeeklyAvailabilityState>,
}

impl WeeklyAvailabilityStore {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: WeeklyAvailabilitiesApi::new(client, notifier.clone()),
            notifier,
            state: watch::Sender::new(WeeklyAvailabilityState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> WeeklyAvailabilityState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WeeklyAvailabilityState> {
        self.state.subscribe()
    }

    /// # Errors
    ///
    /// See [`WeeklyAvailabilityStore::fetch`].
    pub async fn mount(&self) -> Result<(), ClientError> {
        self.fetch().await
    }

    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn fetch(&self) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        self.refresh().await
    }

    /// Create a window, then re-fetch the week.
    ///
    /// # Errors
    ///
    /// Propagates the create or re-fetch error. A failed create skips the
    /// re-fetch; a failed re-fetch skips the success toast.
    pub async fn create(&self, params: &WeeklyAvailabilityParams) -> Result<WeeklyAvailability, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let window = self.api.create_window(params).await?;
        self.refresh().await?;
        report_success(self.notifier.as_ref(), WINDOW_CREATED, None);
        Ok(window)
    }

    /// Update a window, then re-fetch the week.
    ///
    /// # Errors
    ///
    /// Propagates the update or re-fetch error.
    pub async fn update(&self, id: i32, params: &WeeklyAvailabilityParams) -> Result<WeeklyAvailability, ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let window = self.api.update_window(id, params).await?;
        self.refresh().await?;
        report_success(self.notifier.as_ref(), WINDOW_UPDATED, None);
        Ok(window)
    }

    /// Delete a window; the response replaces the cached week.
    ///
    /// # Errors
    ///
    /// Propagates the resource error; the cache is left unchanged.
    pub async fn remove(&self, id: i32) -> Result<(), ClientError> {
        let _loading = LoadingGuard::begin(&self.state);
        let week = self.api.destroy(id).await?;
        self.state.send_modify(|s| s.availability = Some(week));
        Ok(())
    }

    async fn refresh(&self) -> Result<(), ClientError> {
        let week = self.api.fetch().await?;
        tracing::debug!(windows = week.window_count(), "weekly availability loaded");
        self.state.send_modify(|s| s.availability = Some(week));
        Ok(())
    }
}
