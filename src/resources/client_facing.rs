//! Public, unauthenticated listings under `/api/client-facing`.

#[cfg(test)]
#[path = "client_facing_test.rs"]
mod client_facing_test;

use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::types::AppointmentType;

pub(crate) fn business_appointment_types_endpoint(business_id: i32) -> String {
    format!("/api/client-facing/appointment-types/{business_id}")
}

#[derive(Clone, Debug)]
pub struct ClientFacingApi {
    client: ApiClient,
}

impl ClientFacingApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Appointment types a business offers to the public booking page.
    ///
    /// Failures are logged, never toasted.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`].
    pub async fn appointment_types(&self, business_id: i32) -> Result<Vec<AppointmentType>, ClientError> {
        self.client
            .get(&business_appointment_types_endpoint(business_id))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, business_id, "client-facing appointment types failed"))
    }
}
