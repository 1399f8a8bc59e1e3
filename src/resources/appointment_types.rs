//! Appointment type CRUD against `/api/appointment_types`.

#[cfg(test)]
#[path = "appointment_types_test.rs"]
mod appointment_types_test;

use std::sync::Arc;

use serde::de::IgnoredAny;

use super::{report_failure, report_success};
use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::{AppointmentType, CreateAppointmentTypeParams, UpdateAppointmentTypeParams};
use crate::notify::Notifier;

pub(crate) const APPOINTMENT_TYPES_ENDPOINT: &str = "/api/appointment_types";

pub(crate) fn appointment_type_endpoint(id: i32) -> String {
    format!("{APPOINTMENT_TYPES_ENDPOINT}/{id}")
}

#[derive(Clone)]
pub struct AppointmentTypesApi {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl AppointmentTypesApi {
    #[must_use]
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// List the signed-in user's appointment types.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn fetch_all(&self) -> Result<Vec<AppointmentType>, ClientError> {
        self.client
            .get(APPOINTMENT_TYPES_ENDPOINT)
            .await
            .map_err(|e| {
                report_failure(
                    self.notifier.as_ref(),
                    "Error fetching appointment types",
                    "Failed to load appointment types. Please try again.",
                    e,
                )
            })
    }

    /// Fetch one appointment type by id.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn fetch_one(&self, id: i32) -> Result<AppointmentType, ClientError> {
        self.client
            .get(&appointment_type_endpoint(id))
            .await
            .map_err(|e| {
                report_failure(
                    self.notifier.as_ref(),
                    "Error fetching appointment type",
                    "Failed to load appointment type details.",
                    e,
                )
            })
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn create(&self, params: &CreateAppointmentTypeParams) -> Result<AppointmentType, ClientError> {
        let created = self
            .client
            .post(APPOINTMENT_TYPES_ENDPOINT, params)
            .await
            .map_err(|e| {
                report_failure(
                    self.notifier.as_ref(),
                    "Error creating appointment type",
                    "Failed to create appointment type. Please try again.",
                    e,
                )
            })?;
        report_success(self.notifier.as_ref(), "Success", Some("Appointment type created successfully"));
        Ok(created)
    }

    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn update(&self, id: i32, params: &UpdateAppointmentTypeParams) -> Result<AppointmentType, ClientError> {
        let updated = self
            .client
            .put(&appointment_type_endpoint(id), params)
            .await
            .map_err(|e| {
                report_failure(
                    self.notifier.as_ref(),
                    "Error updating appointment type",
                    "Failed to update appointment type. Please try again.",
                    e,
                )
            })?;
        report_success(self.notifier.as_ref(), "Success", Some("Appointment type updated successfully"));
        Ok(updated)
    }

    /// Delete an appointment type. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] after emitting an error toast.
    pub async fn destroy(&self, id: i32) -> Result<(), ClientError> {
        self.client
            .delete::<IgnoredAny>(&appointment_type_endpoint(id))
            .await
            .map_err(|e| {
                report_failure(
                    self.notifier.as_ref(),
                    "Error deleting appointment type",
                    "Failed to delete appointment type. Please try again.",
                    e,
                )
            })?;
        report_success(self.notifier.as_ref(), "Success", Some("Appointment type deleted successfully"));
        Ok(())
    }
}
