//! Shared fixtures for unit tests: a scripted transport and JSON builders.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::Method;
use serde_json::{Value, json};

use crate::net::api::ApiClient;
use crate::net::error::ClientError;
use crate::net::session::SessionToken;
use crate::net::transport::{HttpRequest, HttpResponse, Transport};

pub(crate) const TEST_BASE_URL: &str = "http://booking.test";
pub(crate) const TEST_TIMEZONE: &str = "Europe/Berlin";

// =========================================================================
// MockTransport
// =========================================================================

enum Scripted {
    Respond { status: u16, body: String },
    Fail(String),
}

struct Route {
    method: Method,
    path: String,
    queue: VecDeque<Scripted>,
}

/// Transport answering from scripted responses keyed by verb and path.
///
/// Each route replays its responses in order; the last one repeats. Unknown
/// routes answer 404.
pub(crate) struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self { routes: Mutex::new(Vec::new()), requests: Mutex::new(Vec::new()) })
    }

    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Respond { status, body: body.to_string() });
    }

    pub(crate) fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Scripted::Respond { status, body: body.to_owned() });
    }

    pub(crate) fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Scripted::Fail(message.to_owned()));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub(crate) fn count(&self, method: &Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| &r.method == method && request_path(&r.url) == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        let mut routes = self.routes.lock().unwrap();
        if let Some(route) = routes.iter_mut().find(|r| r.method == method && r.path == path) {
            route.queue.push_back(scripted);
        } else {
            routes.push(Route { method, path: path.to_owned(), queue: VecDeque::from([scripted]) });
        }
    }
}

fn request_path(url: &str) -> &str {
    let rest = url.strip_prefix(TEST_BASE_URL).unwrap_or(url);
    rest.split('?').next().unwrap_or(rest)
}

fn status_text(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or_default()
        .to_owned()
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let path = request_path(&request.url).to_owned();
        let method = request.method.clone();
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let Some(route) = routes.iter_mut().find(|r| r.method == method && r.path == path) else {
            return Ok(HttpResponse { status: 404, status_text: status_text(404), body: String::new() });
        };
        let scripted = if route.queue.len() > 1 { route.queue.pop_front() } else { None };
        let scripted = scripted.as_ref().or(route.queue.front()).expect("route without responses");
        match scripted {
            Scripted::Respond { status, body } => {
                Ok(HttpResponse { status: *status, status_text: status_text(*status), body: body.clone() })
            }
            Scripted::Fail(message) => Err(ClientError::Transport(message.clone())),
        }
    }
}

pub(crate) fn api_client(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(transport.clone(), TEST_BASE_URL, SessionToken::in_memory(), TEST_TIMEZONE)
}

// =========================================================================
// JSON fixtures
// =========================================================================

pub(crate) fn user_json(token: &str) -> Value {
    json!({
        "token": token,
        "pid": "0d5c6f0e-8f1d-4d6b-9c3c-4f7e2a1b9d10",
        "name": "Ada Lovelace",
        "is_verified": true,
        "email": "ada@example.com",
        "role": "User"
    })
}

pub(crate) fn appointment_type_json(id: i32, display_name: &str, duration: i32) -> Value {
    json!({
        "id": id,
        "name": display_name.to_ascii_lowercase().replace(' ', "-"),
        "display_name": display_name,
        "duration_in_minutes": duration,
        "user_id": 1,
        "created_at": "2025-10-15T01:34:48+00:00",
        "updated_at": "2025-10-15T01:34:48+00:00"
    })
}

pub(crate) fn admin_settings_json(allow_new_registrations: bool) -> Value {
    json!({
        "id": 1,
        "allow_new_registrations": allow_new_registrations,
        "google_cloud_api_key": "********",
        "created_at": "2025-10-15T01:34:48+00:00",
        "updated_at": "2025-11-06T00:55:44+00:00"
    })
}

pub(crate) fn window_json(id: i32, weekday: i32, from: i32, to: i32) -> Value {
    json!({
        "normalized": { "from": from, "to": to },
        "model": {
            "id": id,
            "from": from + weekday * 1440,
            "to": to + weekday * 1440,
            "user_id": 1,
            "created_at": "2025-10-15T01:34:48+00:00",
            "updated_at": "2025-10-15T01:34:48+00:00"
        }
    })
}

/// Week with the given `(id, weekday, from, to)` windows.
pub(crate) fn week_json(windows: &[(i32, i32, i32, i32)]) -> Value {
    let names = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];
    let mut week = serde_json::Map::new();
    for (index, name) in names.iter().enumerate() {
        let day: Vec<Value> = windows
            .iter()
            .filter(|(_, weekday, _, _)| usize::try_from(*weekday).ok() == Some(index))
            .map(|(id, weekday, from, to)| window_json(*id, *weekday, *from, *to))
            .collect();
        week.insert((*name).to_owned(), Value::Array(day));
    }
    Value::Object(week)
}
