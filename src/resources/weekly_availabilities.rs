//! Weekly availability windows at `/api/weekly_availabilities`.
//!
//! The collection is always read as a [`WeeklyAvailabilityByWeekday`]. Create
//! and update answer with the single stored window; delete answers with the
//! whole remaining week.

#[cfg(test)]
#[path = "weekly_availabilities_test.rs"]
mod weekly_availabilities_test;

use std::sync::Arc;

use super::{report_failure, report_success};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{WeeklyAvailability, WeeklyAvailabilityByWeekday, WeeklyAvailabilityParams};
use crate::notify::Notifier;

pub(crate) const WEEKLY_AVAILABILITIES_ENDPOINT: &str = "/api/weekly_availabilities";

pub(crate) const WINDOW_CREATED: &str = "Time window created!";
pub(crate) const WINDOW_UPDATED: &str = "Time window updated!";

pub(crate) fn weekly_availability_endpoint(id: i32) -> String {
    format!("{WEEKLY_AVAILABILITIES_ENDPOINT}/{id}")
}

#[derive(Clone)]
pub struct WeeklyAvailabilitiesApi {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl WeeklyAvailabilitiesApi {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn fetch(&self) -> Result<WeeklyAvailabilityByWeekday, ClientError> {
        self.client.get(WEEKLY_AVAILABILITIES_ENDPOINT).await.map_err(|e| {
            report_failure(
                self.notifier.as_ref(),
                "Error fetching availability!",
                "Failed to load your weekly availability.",
                e,
            )
        })
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn create(&self, params: &WeeklyAvailabilityParams) -> Result<WeeklyAvailability, ClientError> {
        let window = self.create_window(params).await?;
        report_success(self.notifier.as_ref(), WINDOW_CREATED, None);
        Ok(window)
    }

    /// [`Self::create`] without the success toast, for callers that confirm
    /// only after follow-up work.
    pub(crate) async fn create_window(&self, params: &WeeklyAvailabilityParams) -> Result<WeeklyAvailability, ClientError> {
        self.client.post(WEEKLY_AVAILABILITIES_ENDPOINT, params).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error creating time window!", "Please try again.", e)
        })
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn update(&self, id: i32, params: &WeeklyAvailabilityParams) -> Result<WeeklyAvailability, ClientError> {
        let window = self.update_window(id, params).await?;
        report_success(self.notifier.as_ref(), WINDOW_UPDATED, None);
        Ok(window)
    }

    pub(crate) async fn update_window(
        &self,
        id: i32,
        params: &WeeklyAvailabilityParams,
    ) -> Result<WeeklyAvailability, ClientError> {
        self.client.put(&weekly_availability_endpoint(id), params).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error updating time window!", "Please try again.", e)
        })
    }

    /// Delete a window and return the remaining week.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn destroy(&self, id: i32) -> Result<WeeklyAvailabilityByWeekday, ClientError> {
        let week = self.client.delete(&weekly_availability_endpoint(id)).await.map_err(|e| {
            report_failure(self.notifier.as_ref(), "Error deleting time window!", "Please try again.", e)
        })?;
        report_success(self.notifier.as_ref(), "Time window deleted!", None);
        Ok(week)
    }
}
