use axum::http::StatusCode;
use perp_leaderboard::api::{self, AppState};
use perp_leaderboard::{Config, LeaderboardService, MockFeed, ScoringPeriod};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

fn setup_test_app(mock: MockFeed) -> axum::Router {
    let config = Config {
        port: 0,
        feed_dir: PathBuf::from("/nonexistent"),
        default_period: ScoringPeriod::Total,
    };
    let service = Arc::new(LeaderboardService::new(
        Arc::new(mock.clone()),
        Arc::new(mock),
    ));
    api::create_router(AppState::new(service, config))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app(MockFeed::new());

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint_warms_after_first_pass() {
    let app = setup_test_app(MockFeed::new());

    let (status, body) = get(app.clone(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warming");
    assert_eq!(body["defaultPeriod"], "total");

    let (status, _) = get(app.clone(), "/v1/leaderboard").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(app, "/ready").await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_ready_after_startup_warm_up() {
    let mock = MockFeed::new();
    let service = Arc::new(LeaderboardService::new(
        Arc::new(mock.clone()),
        Arc::new(mock),
    ));
    let config = Config {
        port: 0,
        feed_dir: PathBuf::from("/nonexistent"),
        default_period: ScoringPeriod::Week,
    };
    service.warm_up(config.default_period).await;
    let app = api::create_router(AppState::new(service, config));

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["defaultPeriod"], "week");
}
