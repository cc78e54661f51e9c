mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::Fixture;
use serde_json::Value;
use simple_blog::routes::router;

fn make_server(fixture: &Fixture) -> TestServer {
    TestServer::new(router(fixture.state(), "*")).unwrap()
}

#[tokio::test]
async fn test_health_all_components_ok() {
    let fixture = Fixture::with_cache();
    let server = make_server(&fixture);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_without_cache_is_healthy() {
    let fixture = Fixture::without_cache();
    let server = make_server(&fixture);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "not_configured");
}

#[tokio::test]
async fn test_health_degraded_when_cache_fails() {
    let fixture = Fixture::with_cache();
    let server = make_server(&fixture);
    fixture.cache.set_failing(true);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "disabled");
}

#[tokio::test]
async fn test_health_database_down_returns_503() {
    let fixture = Fixture::with_cache();
    let server = make_server(&fixture);
    fixture.repository.set_failing(true);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
