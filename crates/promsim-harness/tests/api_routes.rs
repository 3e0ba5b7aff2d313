//! Router-level tests for the response simulator and ops endpoints.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;
use tower::ServiceExt;

use promsim_core::profile::{EndpointProfile, ProfileTable};
use promsim_harness::{app_state::AppState, obs::HarnessMetrics, router};

fn state_with(profiles: ProfileTable) -> (AppState, Arc<HarnessMetrics>) {
    let metrics = Arc::new(HarnessMetrics::new());
    let state = AppState::with_start(
        profiles,
        Arc::clone(&metrics),
        StdRng::seed_from_u64(5),
        Instant::now(),
    );
    (state, metrics)
}

fn fixed_table(error_ratio: f64) -> ProfileTable {
    let mut t = ProfileTable::new();
    let p = EndpointProfile::new(Duration::from_millis(2), error_ratio, Duration::from_secs(60));
    t.insert("/api/foo", "GET", p).unwrap();
    t.insert("/api/foo", "POST", p).unwrap();
    t
}

async fn call(state: AppState, method: &str, uri: &str) -> (StatusCode, String) {
    let app = router::build_router(state);
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test(start_paused = true)]
async fn unknown_path_is_404_with_empty_url_label() {
    let (state, metrics) = state_with(ProfileTable::builtin());
    let (status, _) = call(state, "GET", "/api/baz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(metrics.responses.count("GET", "", "404"), 1);
    assert_eq!(metrics.responses.count("GET", "/api/baz", "404"), 0);
}

#[tokio::test(start_paused = true)]
async fn api_root_is_404_with_empty_url_label() {
    let (state, metrics) = state_with(ProfileTable::builtin());
    let (status, body) = call(state, "GET", "/api/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
    assert_eq!(metrics.responses.count("GET", "", "404"), 1);
}

#[tokio::test(start_paused = true)]
async fn paths_outside_api_are_not_recorded() {
    let (state, metrics) = state_with(ProfileTable::builtin());
    for uri in ["/", "/api", "/apifoo", "/other/api/foo"] {
        let (status, _) = call(state.clone(), "GET", uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri={uri}");
    }
    assert_eq!(metrics.responses.total.total(), 0);
}

#[tokio::test(start_paused = true)]
async fn unknown_method_is_405_with_path_label() {
    let (state, metrics) = state_with(ProfileTable::builtin());
    let (status, _) = call(state, "DELETE", "/api/foo").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(metrics.responses.count("DELETE", "/api/foo", "405"), 1);
}

#[tokio::test(start_paused = true)]
async fn configured_endpoint_succeeds_and_is_recorded() {
    let (state, metrics) = state_with(fixed_table(0.0));
    for _ in 0..20 {
        let (status, _) = call(state.clone(), "GET", "/api/foo").await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(metrics.responses.count("GET", "/api/foo", "200"), 20);

    // Startup outage: 2ms base latency tripled, so ~6ms of (paused) wall time each.
    let labels = [("method", "GET"), ("url", "/api/foo"), ("code", "200")];
    let total = metrics.responses.duration.sum(&labels);
    assert!(total >= Duration::from_millis(20 * 5), "total={total:?}");
}

#[tokio::test(start_paused = true)]
async fn certain_error_ratio_yields_500() {
    let (state, metrics) = state_with(fixed_table(1.0));
    let (status, body) = call(state, "POST", "/api/foo").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
    assert_eq!(metrics.responses.count("POST", "/api/foo", "500"), 1);
    assert_eq!(metrics.responses.count("POST", "/api/foo", "200"), 0);
}

#[tokio::test(start_paused = true)]
async fn metrics_endpoint_exposes_families() {
    let (state, _metrics) = state_with(ProfileTable::builtin());
    let _ = call(state.clone(), "GET", "/api/baz").await;
    let (status, body) = call(state, "GET", "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# TYPE http_requests_total counter"));
    assert!(body.contains("# TYPE http_responses_duration_seconds histogram"));
    assert!(body.contains("http_responses_total{code=\"404\",method=\"GET\",url=\"\"} 1"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let (state, _metrics) = state_with(ProfileTable::builtin());
    let (status, body) = call(state, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
