//! Authenticated REST client.
//!
//! Every call reads the session token fresh, serializes the optional body to
//! JSON, and attaches the bearer, content-type, and `timezone` headers before
//! handing the request to the configured [`Transport`].
//!
//! ERROR HANDLING
//! ==============
//! Any non-2xx status becomes [`ClientError::Status`] carrying the status
//! text. No retry, no structured error-body parsing. Resource modules decide
//! whether to notify; this layer only maps.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ClientError;
use super::session::SessionToken;
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::util::storage::FileStorage;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const TIMEZONE_HEADER: &str = "timezone";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Per-call options: verb, optional JSON body, optional query parameters.
#[derive(Debug)]
pub struct RequestOptions<'a, B: ?Sized = ()> {
    pub method: Method,
    pub body: Option<&'a B>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions<'static, ()> {
    /// Body-less `GET`.
    #[must_use]
    pub fn get() -> Self {
        Self::method(Method::GET)
    }

    /// Body-less request with the given verb.
    #[must_use]
    pub fn method(method: Method) -> Self {
        Self { method, body: None, query: Vec::new() }
    }
}

impl Default for RequestOptions<'static, ()> {
    fn default() -> Self {
        Self::get()
    }
}

impl<'a, B: ?Sized> RequestOptions<'a, B> {
    /// Attach a JSON body, keeping verb and query.
    #[must_use]
    pub fn with_body<'b, C: ?Sized>(self, body: &'b C) -> RequestOptions<'b, C> {
        RequestOptions { method: self.method, body: Some(body), query: self.query }
    }

    /// Append one query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Cheap-to-clone handle shared by every resource module and store.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    session: SessionToken,
    timezone: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        session: SessionToken,
        timezone: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { transport, base_url, session, timezone: timezone.into() }
    }

    /// Build a client with the `reqwest` transport and file-backed token
    /// storage described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.timeouts.request(), config.timeouts.connect())?;
        let session = SessionToken::new(Arc::new(FileStorage::new(config.storage_path.clone())));
        Ok(Self::new(Arc::new(transport), config.base_url.clone(), session, config.timezone.clone()))
    }

    #[must_use]
    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Send a request to `path` and decode the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response arrives,
    /// [`ClientError::Status`] for non-2xx responses, and
    /// [`ClientError::Decode`] when the body does not parse as `T`.
    pub async fn request<T, B>(&self, path: &str, options: RequestOptions<'_, B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.session.load().await;
        let request = self.build_request(path, &options, &token)?;
        let method = request.method.clone();
        let response = self.transport.send(request).await?;
        decode_response(&method, path, response)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(path, RequestOptions::get()).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::method(Method::POST).with_body(body))
            .await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::method(Method::PUT).with_body(body))
            .await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(path, RequestOptions::method(Method::DELETE))
            .await
    }

    pub(crate) fn build_request<B>(
        &self,
        path: &str,
        options: &RequestOptions<'_, B>,
        token: &str,
    ) -> Result<HttpRequest, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint_url(&self.base_url, path, &options.query)?;
        let body = options
            .body
            .map(|body| serde_json::to_string(body).map_err(ClientError::Encode))
            .transpose()?;
        let headers = vec![
            (AUTHORIZATION_HEADER.to_owned(), format!("Bearer {token}")),
            (CONTENT_TYPE_HEADER.to_owned(), JSON_CONTENT_TYPE.to_owned()),
            (TIMEZONE_HEADER.to_owned(), self.timezone.clone()),
        ];
        Ok(HttpRequest { method: options.method.clone(), url, headers, body })
    }
}

fn decode_response<T: DeserializeOwned>(method: &Method, path: &str, response: HttpResponse) -> Result<T, ClientError> {
    if !response.is_success() {
        tracing::debug!(%method, path, status = response.status, "api request rejected");
        return Err(ClientError::Status { status: response.status, status_text: response.status_text });
    }
    let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
    serde_json::from_str(body).map_err(ClientError::Decode)
}

/// Join `base_url` and `path`, appending URL-encoded `query` pairs.
pub(crate) fn endpoint_url(base_url: &str, path: &str, query: &[(String, String)]) -> Result<String, ClientError> {
    let joined = if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    };
    let url = if query.is_empty() {
        reqwest::Url::parse(&joined)
    } else {
        reqwest::Url::parse_with_params(&joined, query.iter())
    }
    .map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))?;
    Ok(url.into())
}
