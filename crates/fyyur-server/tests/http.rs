mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use common::{test_app_state, test_server};
use tower::ServiceExt;

#[tokio::test]
async fn test_home_and_security_headers() {
    let server = test_server(test_app_state().await);

    let resp = server.get("/").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
    assert!(resp.text().contains("Post a venue"));
    assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let server = test_server(test_app_state().await);

    let resp = server.get("/nowhere").await;
    assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    assert!(resp.text().contains("Not found"));
}

#[tokio::test]
async fn test_healthz() {
    let server = test_server(test_app_state().await);

    let json: serde_json::Value = server.get("/healthz").await.json();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_flash_cookie_shown_once_and_cleared() {
    let app = fyyur_server::router(test_app_state().await);

    let req = Request::builder()
        .uri("/")
        .header(header::COOKIE, "fyyur_flash=Venue%20The%20Musical%20Hop%20was%20successfully%20edited%21")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cleared.contains("Max-Age=0"));
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Venue The Musical Hop was successfully edited!"));

    // Without the cookie nothing is shown or cleared
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(!resp.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_flash_survives_edit_redirect() {
    let state = test_app_state().await;
    let hop = common::seed_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let app = fyyur_server::router(state);

    let req = Request::builder()
        .method("POST")
        .uri(format!("/venues/{}/edit", hop.id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("phone=555-555-5555"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let req = Request::builder()
        .uri(format!("/venues/{}", hop.id))
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Venue The Musical Hop was successfully edited!"));
}
