use axum::{body::Body, extract::Request, Router};
use chrono::{TimeZone, Utc};
use hyper::StatusCode;
use irriplan::{api, config::Config, session::AppState, time::FixedClock};
use std::sync::Arc;
use tower::ServiceExt;

pub fn pinned_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap().timestamp()))
}

pub fn test_app() -> Router {
    let state = AppState::new(&Config::default(), pinned_clock());
    api::router(state)
}

/// Drive one request through the router and decode the JSON answer.
pub async fn request(
    app: &Router, method: &str, uri: &str, session: Option<&str>, body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = session {
        builder = builder.header("x-session-id", id);
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // axum's own rejections answer with plain text, not JSON
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}
