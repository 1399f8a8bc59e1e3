use super::*;
use crate::notify::ToastQueue;
use crate::test_helpers::{MockTransport, api_client, user_json};
use crate::util::auth::MemoryNavigator;
use reqwest::Method;
use serde_json::json;

struct Fixture {
    transport: Arc<MockTransport>,
    client: ApiClient,
    navigator: Arc<MemoryNavigator>,
    store: UserStore,
}

fn fixture(path: &str) -> Fixture {
    let transport = MockTransport::new();
    let client = api_client(&transport);
    let navigator = Arc::new(MemoryNavigator::new(path));
    let store = UserStore::new(client.clone(), Arc::new(ToastQueue::new()), navigator.clone());
    Fixture { transport, client, navigator, store }
}

fn user(token: &str) -> User {
    serde_json::from_value(user_json(token)).unwrap()
}

#[test]
fn auth_state_defaults_unsettled_without_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.settled);
}

#[tokio::test]
async fn current_user_unauthorized_settles_and_redirects_to_login() {
    let f = fixture("/dashboard");
    f.client.session().set("stale").unwrap();
    f.transport.respond(Method::GET, "/api/auth/current", 401, json!({}));

    let err = f.store.mount().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    let state = f.store.state();
    assert!(state.settled);
    assert!(state.user.is_none());
    assert!(!f.client.session().is_present());
    assert_eq!(f.navigator.current_path(), "/login");
}

#[tokio::test]
async fn current_user_success_redirects_into_dashboard() {
    let f = fixture("/login");
    f.transport.respond(Method::GET, "/api/auth/current", 200, user_json("tok"));

    f.store.mount().await.unwrap();
    assert_eq!(f.store.user().unwrap().token, "tok");
    assert_eq!(f.navigator.current_path(), "/dashboard");
}

#[test]
fn no_redirect_before_settled() {
    let f = fixture("/");
    f.store.set_user(Some(user("tok"))).unwrap();
    assert_eq!(f.navigator.history(), vec!["/"]);
}

#[tokio::test]
async fn login_token_is_carried_by_next_request() {
    let f = fixture("/login");
    f.transport.respond(Method::POST, "/api/auth/login", 200, user_json("fresh-token"));
    f.transport.respond(Method::GET, "/api/auth/current", 200, user_json("fresh-token"));

    let params = LoginParams { email: "ada@example.com".into(), password: "pw".into() };
    f.store.login(&params).await.unwrap();
    assert_eq!(f.client.session().get(), "fresh-token");

    f.store.fetch_current_user().await.unwrap();
    let sent = f.transport.last_request();
    assert_eq!(sent.header("authorization"), Some("Bearer fresh-token"));
}

#[tokio::test]
async fn failed_login_keeps_signed_out() {
    let f = fixture("/login");
    f.transport.respond(Method::POST, "/api/auth/login", 401, json!({}));

    let params = LoginParams { email: "ada@example.com".into(), password: "wrong".into() };
    assert!(f.store.login(&params).await.is_err());
    assert!(f.store.user().is_none());
    assert!(!f.client.session().is_present());
}

#[tokio::test]
async fn logout_clears_token_even_when_server_fails() {
    let f = fixture("/dashboard");
    f.transport.respond(Method::GET, "/api/auth/current", 200, user_json("tok"));
    f.transport.respond(Method::GET, "/api/auth/logout", 500, json!({}));
    f.client.session().set("tok").unwrap();
    f.store.mount().await.unwrap();

    assert!(f.store.logout().await.is_err());
    assert!(f.store.user().is_none());
    assert!(!f.client.session().is_present());
    assert_eq!(f.navigator.current_path(), "/login");
}

#[tokio::test]
async fn magic_link_outcome_reports_both_paths() {
    let f = fixture("/login");
    f.transport.respond(Method::POST, "/api/auth/magic-link", 200, json!(null));
    f.transport.respond(Method::POST, "/api/auth/magic-link", 500, json!({}));
    let params = MagicLinkParams { email: "ada@example.com".into() };

    assert!(f.store.request_magic_link(&params).await.is_sent());
    let failed = f.store.request_magic_link(&params).await;
    assert!(!failed.is_sent());
    assert_eq!(failed.into_result().unwrap_err().status(), Some(500));
}

#[tokio::test]
async fn verify_magic_link_failure_navigates_home() {
    let f = fixture("/magic-link/bad");
    f.transport.respond(Method::GET, "/api/auth/magic-link/bad", 401, json!({}));

    assert!(f.store.verify_magic_link("bad").await.is_err());
    assert_eq!(f.navigator.current_path(), "/");
}

#[tokio::test]
async fn verify_magic_link_success_stores_token() {
    let f = fixture("/magic-link/good");
    f.transport.respond(Method::GET, "/api/auth/magic-link/good", 200, user_json("magic-token"));

    let user = f.store.verify_magic_link("good").await.unwrap();
    assert_eq!(user.token, "magic-token");
    assert_eq!(f.client.session().get(), "magic-token");
}

#[tokio::test]
async fn password_actions_forward_to_api() {
    let f = fixture("/forgot");
    f.transport.respond(Method::POST, "/api/auth/forgot", 200, json!({}));
    f.transport.respond(Method::POST, "/api/auth/reset", 400, json!({}));

    f.store.request_password_reset(&ForgotParams { email: "ada@example.com".into() }).await.unwrap();
    let err = f
        .store
        .change_password(&ResetParams { token: "t".into(), password: "p".into() })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}
