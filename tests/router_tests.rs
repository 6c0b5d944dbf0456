use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use sqlx::mysql::MySqlConnectOptions;
use tower::ServiceExt;

// The state points at a database nothing listens on; every test here must
// finish before any connection attempt would matter.
fn test_app() -> axum::Router {
    let connect = MySqlConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .database("Cake_Store");
    cakedash::router::dash_router(cakedash::router::DashState::new(connect))
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body_str = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body_str.contains("Cake Store Database Dashboard"));
}

#[tokio::test]
async fn custom_query_rejects_non_select_before_touching_the_database() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/query")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"sql":"DROP TABLE Cake_Catalogue"}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body_str = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body_str.contains(r#""code":"VALIDATION_ERROR""#));
    assert!(body_str.contains("only SELECT statements are allowed"));
}

#[tokio::test]
async fn custom_query_rejects_stacked_statements() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/query")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"sql":"SELECT 1; DROP TABLE Cake_Catalogue"}"#,
                ))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_api_route_is_not_found() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/nonsense")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
