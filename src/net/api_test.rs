use super::*;
use crate::test_helpers::{MockTransport, TEST_BASE_URL, TEST_TIMEZONE, api_client, appointment_type_json};
use crate::net::types::{AppointmentType, CreateAppointmentTypeParams};

// =============================================================
// endpoint_url
// =============================================================

#[test]
fn endpoint_url_joins_base_and_path() {
    let url = endpoint_url("http://localhost:5150", "/api/appointment_types", &[]).unwrap();
    assert_eq!(url, "http://localhost:5150/api/appointment_types");
}

#[test]
fn endpoint_url_adds_missing_slash() {
    let url = endpoint_url("http://localhost:5150", "api/auth/current", &[]).unwrap();
    assert_eq!(url, "http://localhost:5150/api/auth/current");
}

#[test]
fn endpoint_url_encodes_query_params() {
    let query = vec![("from".to_owned(), "2025-01-01T00:00:00+01:00".to_owned()), ("q".to_owned(), "a b".to_owned())];
    let url = endpoint_url("http://localhost:5150", "/api/appointments", &query).unwrap();
    assert_eq!(url, "http://localhost:5150/api/appointments?from=2025-01-01T00%3A00%3A00%2B01%3A00&q=a+b");
}

#[test]
fn endpoint_url_rejects_garbage_base() {
    assert!(matches!(endpoint_url("not a url", "/api", &[]), Err(ClientError::InvalidUrl(_))));
}

// =============================================================
// build_request
// =============================================================

#[test]
fn build_request_attaches_three_headers() {
    let transport = MockTransport::new();
    let client = api_client(&transport);
    client.session().set("tok-123").unwrap();

    let request = client.build_request("/api/admin_settings", &RequestOptions::get(), &client.session().get()).unwrap();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, format!("{TEST_BASE_URL}/api/admin_settings"));
    assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("timezone"), Some(TEST_TIMEZONE));
    assert_eq!(request.body, None);
}

#[test]
fn build_request_with_empty_token_sends_bare_bearer() {
    let transport = MockTransport::new();
    let client = api_client(&transport);
    let request = client.build_request("/api/auth/current", &RequestOptions::get(), &client.session().get()).unwrap();
    assert_eq!(request.header("Authorization"), Some("Bearer "));
}

#[test]
fn build_request_serializes_body() {
    let transport = MockTransport::new();
    let client = api_client(&transport);
    let params = CreateAppointmentTypeParams { duration_in_minutes: 45, display_name: "Consult".into() };

    let options = RequestOptions::method(Method::POST).with_body(&params);
    let request = client.build_request("/api/appointment_types", &options, "").unwrap();
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "duration_in_minutes": 45, "display_name": "Consult" }));
}

// =============================================================
// request
// =============================================================

#[tokio::test]
async fn request_decodes_success_body() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, "/api/appointment_types/4", 200, appointment_type_json(4, "Consult", 45));
    let client = api_client(&transport);

    let item: AppointmentType = client.get("/api/appointment_types/4").await.unwrap();
    assert_eq!(item.id, 4);
    assert_eq!(item.duration_in_minutes, 45);
}

#[tokio::test]
async fn request_maps_non_success_to_status_text() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, "/api/admin_settings", 403, serde_json::json!({ "error": "nope" }));
    let client = api_client(&transport);

    let err = client.get::<serde_json::Value>("/api/admin_settings").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Forbidden");
}

#[tokio::test]
async fn request_reports_decode_failure() {
    let transport = MockTransport::new();
    transport.respond_raw(Method::GET, "/api/appointment_types", 200, "<html>");
    let client = api_client(&transport);

    let err = client.get::<Vec<AppointmentType>>("/api/appointment_types").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn request_passes_through_transport_failure() {
    let transport = MockTransport::new();
    transport.fail(Method::GET, "/api/auth/current", "connection refused");
    let client = api_client(&transport);

    let err = client.get::<serde_json::Value>("/api/auth/current").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(ref m) if m == "connection refused"));
}

#[tokio::test]
async fn empty_success_body_reads_as_null() {
    let transport = MockTransport::new();
    transport.respond_raw(Method::DELETE, "/api/appointment_types/2", 200, "");
    let client = api_client(&transport);

    let value: Option<serde_json::Value> = client.delete("/api/appointment_types/2").await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn token_is_read_at_call_time() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, "/api/auth/current", 200, serde_json::json!({}));
    let client = api_client(&transport);

    client.session().set("first").unwrap();
    let _: serde_json::Value = client.get("/api/auth/current").await.unwrap();
    client.session().set("second").unwrap();
    let _: serde_json::Value = client.get("/api/auth/current").await.unwrap();

    let seen: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.header("Authorization").unwrap_or_default().to_owned())
        .collect();
    assert_eq!(seen, vec!["Bearer first", "Bearer second"]);
}

#[tokio::test]
async fn query_params_reach_transport() {
    let transport = MockTransport::new();
    transport.respond(Method::GET, "/api/appointments", 200, serde_json::json!([]));
    let client = api_client(&transport);

    let options = RequestOptions::get().with_query("page", "2");
    let _: Vec<serde_json::Value> = client.request("/api/appointments", options).await.unwrap();
    assert_eq!(transport.last_request().url, format!("{TEST_BASE_URL}/api/appointments?page=2"));
}
