mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use brewlab::{create_router, state::EngineKind};

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn lists_recipes_with_totals() {
    let (_clock, state) = common::app_state();
    let router = create_router(state);

    let (status, body) = send(&router, "GET", "/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "v60-daily");
    assert_eq!(body[0]["totalSeconds"], 135);
    assert_eq!(body[0]["stepCount"], 3);
    assert_eq!(body[0]["brewerLabel"], "V60");
    assert_eq!(body[1]["brewerId"], Value::Null);
    assert_eq!(body[1]["brewerLabel"], Value::Null);
    assert_eq!(body[2]["brewerLabel"], "Chemex");
}

#[tokio::test]
async fn brew_walkthrough() {
    let (clock, state) = common::app_state();
    let router = create_router(state.clone());

    let (status, body) = send(&router, "POST", "/brew/attach/v60-daily", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["remainingDisplay"], "00:30");
    assert_eq!(body["timer"]["upcomingStep"]["label"], "Main pour");

    let (status, body) = send(&router, "POST", "/brew/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["running"], true);

    clock.advance(30_000);
    state.tick(EngineKind::Brew).expect("tick");

    let (_, body) = send(&router, "GET", "/brew", None).await;
    assert_eq!(body["activeIndex"], 1);
    assert_eq!(body["step"]["ordinal"], 2);
    assert_eq!(body["remainingSeconds"], 60);
    assert_eq!(body["elapsedSeconds"], 30);
    assert_eq!(body["totalRemainingSeconds"], 105);

    clock.advance(15_000);
    let (_, body) = send(&router, "POST", "/brew/pause", None).await;
    assert_eq!(body["timer"]["phase"], "paused");
    assert_eq!(body["timer"]["remainingSeconds"], 45);

    clock.advance(120_000);
    state.tick(EngineKind::Brew).expect("tick while paused");
    let (_, body) = send(&router, "GET", "/brew", None).await;
    assert_eq!(body["remainingSeconds"], 45);
    assert_eq!(body["elapsedSeconds"], 45);

    let (_, body) = send(&router, "POST", "/brew/jump/2", None).await;
    assert_eq!(body["timer"]["remainingSeconds"], 45);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["upcomingStep"], Value::Null);

    let (_, body) = send(&router, "POST", "/brew/reset", None).await;
    assert_eq!(body["timer"]["activeIndex"], 0);
    assert_eq!(body["timer"]["remainingSeconds"], 30);
    assert_eq!(body["timer"]["progressPercent"], 0.0);
}

#[tokio::test]
async fn brew_errors_map_to_status_codes() {
    let (_clock, state) = common::app_state();
    let router = create_router(state);

    let (status, body) = send(&router, "POST", "/brew/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&router, "POST", "/brew/attach/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&router, "POST", "/brew/attach/blank", None).await;
    let (status, body) = send(&router, "POST", "/brew/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "sequence has no steps");

    send(&router, "POST", "/brew/attach/quick", None).await;
    let (status, _) = send(&router, "POST", "/brew/prev", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&router, "POST", "/brew/jump/9", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&router, "GET", "/brew", None).await;
    assert_eq!(body["activeIndex"], 0);
    assert_eq!(body["remainingSeconds"], 1);
}

#[tokio::test]
async fn knob_configuration_locks_while_started() {
    let (clock, state) = common::app_state();
    let router = create_router(state.clone());

    let (_, body) = send(&router, "GET", "/knob", None).await;
    assert_eq!(body["remainingDisplay"], "00:30");

    let (status, body) = send(&router, "POST", "/knob/configure", Some(json!({ "minutes": 1, "seconds": 75 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["seconds"], 59);
    assert_eq!(body["timer"]["totalInputSeconds"], 119);

    send(&router, "POST", "/knob/start", None).await;
    let (status, _) = send(&router, "POST", "/knob/configure", Some(json!({ "minutes": 5 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    clock.advance(20_000);
    state.tick(EngineKind::Knob).expect("tick");
    let (_, body) = send(&router, "GET", "/knob", None).await;
    assert_eq!(body["locked"], true);
    assert_eq!(body["displayMinutes"], 1);
    assert_eq!(body["displaySeconds"], 39);

    let (_, body) = send(&router, "POST", "/knob/reset", None).await;
    assert_eq!(body["timer"]["locked"], false);
    assert_eq!(body["timer"]["remainingDisplay"], "01:59");

    send(&router, "POST", "/knob/configure", Some(json!({ "minutes": 0, "seconds": 0 }))).await;
    let (status, body) = send(&router, "POST", "/knob/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "interval duration must be greater than zero");
}

#[tokio::test]
async fn health_reports_last_action() {
    let (_clock, state) = common::app_state();
    let router = create_router(state);

    send(&router, "POST", "/knob/pause", None).await;
    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["last_action"], "knob-pause");
}
