use super::*;
use crate::net::types::Weekday;
use crate::notify::{ToastKind, ToastQueue};
use crate::test_helpers::{MockTransport, api_client, week_json, window_json};
use reqwest::Method;

fn api(transport: &Arc<MockTransport>) -> (WeeklyAvailabilitiesApi, Arc<ToastQueue>) {
    let toasts = Arc::new(ToastQueue::new());
    (WeeklyAvailabilitiesApi::new(api_client(transport), toasts.clone()), toasts)
}

#[tokio::test]
async fn fetch_groups_windows_by_weekday() {
    let transport = MockTransport::new();
    transport.respond(
        Method::GET,
        WEEKLY_AVAILABILITIES_ENDPOINT,
        200,
        week_json(&[(1, 0, 540, 720), (2, 0, 780, 1020), (3, 4, 600, 660)]),
    );
    let (api, _) = api(&transport);

    let week = api.fetch().await.unwrap();
    assert_eq!(week.monday.len(), 2);
    assert_eq!(week.friday[0].normalized.from, 600);
    assert_eq!(week.friday[0].model.from, 600 + 4 * 1440);
    assert_eq!(week.window_count(), 3);
}

#[tokio::test]
async fn create_posts_weekday_and_normalized_window() {
    let transport = MockTransport::new();
    transport.respond(Method::POST, WEEKLY_AVAILABILITIES_ENDPOINT, 201, window_json(7, 2, 540, 600)["model"].clone());
    let (api, toasts) = api(&transport);

    let params = WeeklyAvailabilityParams::new(Weekday::Wednesday, 540, 600);
    let window = api.create(&params).await.unwrap();
    assert_eq!(window.id, 7);

    let body: serde_json::Value = serde_json::from_str(transport.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "normalized": { "from": 540, "to": 600 }, "weekday": 2 }));
    assert_eq!(toasts.drain()[0].title, "Time window created!");
}

#[tokio::test]
async fn destroy_returns_remaining_week() {
    let transport = MockTransport::new();
    transport.respond(Method::DELETE, "/api/weekly_availabilities/2", 200, week_json(&[(1, 0, 540, 720)]));
    let (api, toasts) = api(&transport);

    let week = api.destroy(2).await.unwrap();
    assert_eq!(week.window_count(), 1);
    assert!(week.find(2).is_none());
    assert_eq!(toasts.drain()[0].title, "Time window deleted!");
}

#[tokio::test]
async fn update_failure_toasts_error() {
    let transport = MockTransport::new();
    transport.respond(Method::PUT, "/api/weekly_availabilities/4", 422, serde_json::json!({}));
    let (api, toasts) = api(&transport);

    let params = WeeklyAvailabilityParams::new(Weekday::Monday, 600, 540);
    assert!(api.update(4, &params).await.is_err());
    let toasts = toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
}
