//! HTTP surface tests driving the full middleware stack in-process

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use fairdice::{
    api::build_app,
    config::ServerConfig,
    games::{Roll, ScriptedRolls, Seeds},
    JsonFileStore, MemoryStore, PersistenceStore, TransactionCoordinator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with(store: Arc<dyn PersistenceStore>, roll: u8) -> Router {
    let coordinator = TransactionCoordinator::new(
        store,
        Arc::new(ScriptedRolls::always(Roll::new(roll).unwrap())),
        Seeds::default(),
    );
    build_app(&ServerConfig::default(), Arc::new(coordinator))
}

fn app(roll: u8) -> Router {
    app_with(Arc::new(MemoryStore::new()), roll)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_roll_dice_win_then_invalid_bet() {
    let app = app(5);

    let (status, body) = send(&app, post_json("/roll-dice", r#"{"bet":100}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roll"], 5);
    assert_eq!(body["win"], true);
    assert_eq!(body["newBalance"], 1100);
    assert_eq!(body["hash"].as_str().map(str::len), Some(64));

    let (status, body) = send(&app, post_json("/roll-dice", r#"{"bet":2000}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid Bet"}));

    let (status, body) = send(&app, get("/balance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"balance": 1100}));
}

#[tokio::test]
async fn test_non_positive_bet_is_invalid() {
    let app = app(6);
    for bet in ["0", "-10"] {
        let (status, body) = send(&app, post_json("/roll-dice", &format!(r#"{{"bet":{}}}"#, bet))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid Bet");
    }
}

#[tokio::test]
async fn test_numeric_bets_beyond_integers() {
    let app = app(6);

    // Whole-valued floats are ordinary bets
    let (status, body) = send(&app, post_json("/roll-dice", r#"{"bet":100.0}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newBalance"], 1100);

    // Out-of-range or fractional amounts can never be settled
    for raw in ["1e30", "18446744073709551615", "100.5", "-1e30"] {
        let (status, body) =
            send(&app, post_json("/roll-dice", &format!(r#"{{"bet":{}}}"#, raw))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "bet {}", raw);
        assert_eq!(body, json!({"error": "Invalid Bet"}));
    }

    let (_, body) = send(&app, get("/balance")).await;
    assert_eq!(body["balance"], 1100);
}

#[tokio::test]
async fn test_malformed_body_is_rejected_without_mutation() {
    let app = app(6);

    for raw in ["{bet:", "", r#"{"wager":5}"#, r#"{"bet":"ten"}"#] {
        let (status, body) = send(&app, post_json("/roll-dice", raw)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", raw);
        assert_eq!(body, json!({"error": "Malformed Request"}));
    }

    let (_, body) = send(&app, get("/balance")).await;
    assert_eq!(body["balance"], 1000);
    let (_, body) = send(&app, get("/game-history")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let app = app(2);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/roll-dice")
        .body(Body::from(r#"{"bet":40}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["win"], false);
    assert_eq!(body["newBalance"], 960);
}

#[tokio::test]
async fn test_history_lists_records_in_order() {
    let app = app(4);
    for bet in [10, 20, 30] {
        send(&app, post_json("/roll-dice", &format!(r#"{{"bet":{}}}"#, bet))).await;
    }

    let (status, body) = send(&app, get("/game-history")).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);

    let bets: Vec<i64> = records.iter().map(|r| r["bet"].as_i64().unwrap()).collect();
    assert_eq!(bets, vec![10, 20, 30]);
    assert_eq!(records[2]["newBalance"], 1060);
    for field in ["roll", "win", "hash", "serverSeed", "clientSeed", "nonce", "timestamp"] {
        assert!(records[0].get(field).is_some(), "missing {}", field);
    }
}

#[tokio::test]
async fn test_reset_game() {
    let app = app(1);
    send(&app, post_json("/roll-dice", r#"{"bet":500}"#)).await;

    let (status, body) = send(&app, post_json("/reset-game", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "balance": 1000}));

    let (_, body) = send(&app, get("/game-history")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_unknown_routes_and_methods_are_not_found() {
    let app = app(3);

    for request in [
        get("/nope"),
        get("/roll-dice"),
        post_json("/balance", "{}"),
        Request::builder()
            .method(Method::DELETE)
            .uri("/reset-game")
            .body(Body::empty())
            .unwrap(),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not Found"}));
    }
}

#[tokio::test]
async fn test_options_returns_no_content() {
    let app = app(3);

    let plain = Request::builder()
        .method(Method::OPTIONS)
        .uri("/anything")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(plain).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(to_bytes(response.into_body(), usize::MAX).await.unwrap().is_empty());

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/roll-dice")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_cors_and_request_id_headers() {
    let app = app(3);
    let request = Request::builder()
        .uri("/balance")
        .header(header::ORIGIN, "http://localhost:3000")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let dir = TempDir::new().unwrap();
    // A directory is not a readable data file
    let app = app_with(Arc::new(JsonFileStore::new(dir.path())), 4);

    let (status, body) = send(&app, get("/balance")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));

    let (status, _) = send(&app, post_json("/roll-dice", r#"{"bet":1}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_file_store_created_on_first_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let app = app_with(Arc::new(JsonFileStore::new(&path)), 6);
    assert!(!path.exists());

    let (_, body) = send(&app, get("/balance")).await;
    assert_eq!(body["balance"], 1000);
    assert!(path.exists());

    send(&app, post_json("/roll-dice", r#"{"bet":250}"#)).await;
    let on_disk: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk["balance"], 1250);
    assert_eq!(on_disk["history"][0]["newBalance"], 1250);
    assert_eq!(on_disk["history"][0]["serverSeed"], "secret-server-seed");
}
