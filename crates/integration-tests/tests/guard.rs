//! End-to-end tests for the route guard: redirect targets, role gating,
//! and API-path status codes.

use axum::http::{StatusCode, header};
use velour_core::Role;
use velour_integration_tests::{TestApp, body_bytes, body_json};

fn location(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[tokio::test]
async fn anonymous_account_request_redirects_to_login_once() {
    let app = TestApp::new();

    let response = app.get("/account", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/auth/login"));
    // Exactly one redirect target, and no content alongside it.
    assert_eq!(response.headers().get_all(header::LOCATION).iter().count(), 1);
    let body = body_bytes(response).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn anonymous_api_session_request_gets_401_not_redirect() {
    let app = TestApp::new();

    let response = app.get("/api/auth/session", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn logged_in_user_sees_account() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::User).await;

    let response = app.get("/account", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "USER");
    assert_eq!(json["cartItems"], 0);
}

#[tokio::test]
async fn non_admin_is_redirected_home_from_admin_routes() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::User).await;

    let response = app.get("/admin/dashboard", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
}

#[tokio::test]
async fn shipper_is_redirected_home_from_admin_routes() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::Shipper).await;

    let response = app.get("/admin/users", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
}

#[tokio::test]
async fn admin_passes_the_guard() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::Admin).await;

    let response = app.get("/admin/dashboard", Some(&cookie)).await;

    // The guard rendered the handler, which then hit the (down) upstream:
    // a gateway error, not a redirect.
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn non_shipper_is_redirected_home_from_shipper_routes() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::User).await;

    let response = app.get("/shipper/orders", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
}

#[tokio::test]
async fn shipper_passes_the_role_check() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::Shipper).await;

    let response = app.get("/shipper/orders", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn public_routes_render_without_requirements() {
    let app = TestApp::new();

    // Anonymous.
    let response = app.get("/cart", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logged in.
    let cookie = app.login_as(Role::User).await;
    let response = app.get("/cart", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn login_surfaces_upstream_failure() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/auth/login",
            &serde_json::json!({ "email": "lan@example.com", "password": "wrong" }),
            None,
        )
        .await;

    // The marketplace API is down in tests; the failure is surfaced, and no
    // identity lands in the session.
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::new();
    let cookie = app.login_as(Role::User).await;

    let response = app.get("/api/auth/session", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json("/auth/logout", &serde_json::json!({}), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get("/api/auth/session", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
