//! `/api/` subtree handler.
//!
//! Resolves the (path, method) profile, waits the planned latency, then answers
//! 404 / 405 / 500 / 200. Every outcome is recorded on the response-side
//! metrics with the handler's real elapsed time.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tokio::time::Instant;

use promsim_core::profile::Lookup;

use crate::app_state::AppState;

/// Every path under this prefix, including the prefix itself, is simulated.
pub const API_PREFIX: &str = "/api/";

fn finish(
    app: &AppState,
    started: Instant,
    method: &Method,
    url: &str,
    status: StatusCode,
    body: &'static str,
) -> Response {
    app.metrics().responses.record(
        method.as_str(),
        url,
        status.as_str(),
        started.elapsed(),
    );
    (status, body).into_response()
}

pub async fn simulate(State(app): State<AppState>, method: Method, uri: Uri) -> Response {
    let started = Instant::now();
    let path = uri.path();

    let profile = match app.profiles().lookup(path, method.as_str()) {
        Lookup::Found(p) => *p,
        Lookup::UnknownPath => {
            return finish(&app, started, &method, "", StatusCode::NOT_FOUND, "Not Found");
        }
        Lookup::MethodNotAllowed => {
            return finish(
                &app,
                started,
                &method,
                path,
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not Allowed",
            );
        }
    };

    let plan = app.plan(&profile);
    tracing::debug!(
        %method,
        path,
        latency = ?plan.latency,
        fail = plan.fail,
        outage = plan.outage,
        "simulated response planned"
    );

    tokio::time::sleep(plan.latency).await;

    if plan.fail {
        return finish(
            &app,
            started,
            &method,
            path,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        );
    }
    finish(&app, started, &method, path, StatusCode::OK, "")
}

/// Router fallback: `/api/...` is simulated, anything else is a plain,
/// unrecorded 404.
pub async fn api_subtree(state: State<AppState>, method: Method, uri: Uri) -> Response {
    if uri.path().starts_with(API_PREFIX) {
        simulate(state, method, uri).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
