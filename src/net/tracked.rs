//! Observable request wrapper.
//!
//! DESIGN
//! ======
//! Components that render loading spinners or inline errors want a request
//! with flags they can watch rather than a bare future. [`TrackedRequest`]
//! publishes a [`RequestState`] through a `watch` channel and delegates the
//! actual call to [`ApiClient::request`], so headers and JSON handling are
//! identical to direct calls.

#[cfg(test)]
#[path = "tracked_test.rs"]
mod tracked_test;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use super::api::{ApiClient, RequestOptions};
use super::error::ClientError;

/// Snapshot of a tracked request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestState<T> {
    pub is_fetching: bool,
    /// Set once the first execution settles, success or not.
    pub is_finished: bool,
    /// Last successfully decoded body. Kept across later failures.
    pub data: Option<T>,
    pub error: Option<String>,
    /// HTTP status of the last rejected response.
    pub status_code: Option<u16>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self { is_fetching: false, is_finished: false, data: None, error: None, status_code: None }
    }
}

/// A reusable request whose progress can be observed.
pub struct TrackedRequest<T> {
    client: ApiClient,
    path: String,
    method: Method,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
    state: watch::Sender<RequestState<T>>,
}

impl ApiClient {
    /// Prepare a tracked request to `path`. Nothing is sent until
    /// [`TrackedRequest::execute`].
    #[must_use]
    pub fn tracked<T>(&self, method: Method, path: impl Into<String>) -> TrackedRequest<T> {
        let (state, _) = watch::channel(RequestState::default());
        TrackedRequest {
            client: self.clone(),
            path: path.into(),
            method,
            body: None,
            query: Vec::new(),
            state,
        }
    }
}

impl<T> TrackedRequest<T>
where
    T: DeserializeOwned + Clone,
{
    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] if `body` cannot be serialized.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Send the request, publishing progress before and after.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ApiClient::request`]; the message is
    /// also recorded in [`RequestState::error`].
    pub async fn execute(&self) -> Result<T, ClientError> {
        self.state.send_modify(|s| {
            s.is_fetching = true;
            s.error = None;
            s.status_code = None;
        });
        let _settle = SettleGuard { state: &self.state };

        let options = RequestOptions {
            method: self.method.clone(),
            body: self.body.as_ref(),
            query: self.query.clone(),
        };

        let result = self.client.request::<T, serde_json::Value>(&self.path, options).await;
        match &result {
            Ok(data) => self.state.send_modify(|s| s.data = Some(data.clone())),
            Err(e) => self.state.send_modify(|s| {
                s.error = Some(e.to_string());
                s.status_code = e.status();
            }),
        }
        result
    }
}

/// Clears `is_fetching` when the execution ends, including cancellation.
struct SettleGuard<'a, T> {
    state: &'a watch::Sender<RequestState<T>>,
}

impl<T> Drop for SettleGuard<'_, T> {
    fn drop(&mut self) {
        self.state.send_modify(|s| {
            s.is_fetching = false;
            s.is_finished = true;
        });
    }
}
