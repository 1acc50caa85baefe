use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use connect_four::client::{GameApi, HttpGameApi};
use connect_four::config::SearchConfig;
use connect_four::error::ClientError;
use connect_four::game::GameMode;
use connect_four::protocol::{CreateGameRequest, MoveRequest};
use connect_four::service::{router, GameService};

fn app() -> Router {
    router(Arc::new(GameService::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_and_play_human_game() {
    let app = app();

    let (status, game) = send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-human" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(game["id"], 1);
    assert_eq!(game["current_player"], 1);
    assert_eq!(game["is_finished"], false);
    assert_eq!(game["winner"], Value::Null);
    assert_eq!(game["difficulty"], Value::Null);

    let (status, game) = send(
        &app,
        "POST",
        "/api/algorithms/1/make_move/",
        Some(json!({ "column": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["board_state"][5][3], 1);
    assert_eq!(game["current_player"], 2);

    let (status, moves) = send(&app, "GET", "/api/algorithms/1/moves/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moves.as_array().unwrap().len(), 1);
    assert_eq!(moves[0]["column"], 3);
    assert_eq!(moves[0]["player"], 1);
}

#[tokio::test]
async fn computer_reply_comes_back_in_the_same_response() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-computer", "difficulty": "easy", "algorithm": "negascout" })),
    )
    .await;

    let (status, game) = send(
        &app,
        "POST",
        "/api/algorithms/1/make_move/",
        Some(json!({ "column": 0, "algorithm": "negascout", "difficulty": "easy" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["board_state"][5][0], 1);
    assert_eq!(game["board_state"][5][3], 2);
    assert_eq!(game["current_player"], 1);
    assert_eq!(game["algorithm"], "negascout");
}

#[tokio::test]
async fn rule_errors_are_bad_requests() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-human" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/algorithms/1/make_move/",
        Some(json!({ "column": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid move" }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "computer-computer" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "difficulty is required for computer-computer games");

    let (status, body) = send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-human", "initial_moves": [3, 10], "from_file": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move 10 in initial moves");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "solitaire" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request"));

    let (status, _) = send(&app, "GET", "/api/algorithms/abc/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_games_are_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/algorithms/12/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Game 12 not found" }));

    let (status, _) = send(
        &app,
        "POST",
        "/api/algorithms/12/get_best_move/",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/algorithms/12/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn best_move_blocks_open_three() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-human", "initial_moves": [0, 6, 1, 6, 2], "from_file": true })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/algorithms/1/get_best_move/",
        Some(json!({ "algorithm": "minimax", "difficulty": "medium" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "best_move": 3 }));
}

#[tokio::test]
async fn listing_and_deleting_games() {
    let app = app();
    for _ in 0..3 {
        send(
            &app,
            "POST",
            "/api/algorithms/",
            Some(json!({ "game_type": "human-human" })),
        )
        .await;
    }

    let (status, games) = send(&app, "GET", "/api/algorithms/", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = games
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let (status, body) = send(&app, "DELETE", "/api/algorithms/2/", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "DELETE", "/api/algorithms/delete_all/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Deleted 2 games.", "deleted": 2 }));

    let (_, games) = send(&app, "GET", "/api/algorithms/", None).await;
    assert_eq!(games, json!([]));
}

#[tokio::test]
async fn reads_are_served_while_the_computer_thinks() {
    let search = SearchConfig {
        expert_depth: 10,
        ..SearchConfig::default()
    };
    let app = router(Arc::new(GameService::new(search, None)));
    send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-computer", "difficulty": "expert" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/algorithms/",
        Some(json!({ "game_type": "human-human" })),
    )
    .await;

    let mover = {
        let app = app.clone();
        tokio::spawn(async move {
            send(
                &app,
                "POST",
                "/api/algorithms/1/make_move/",
                Some(json!({ "column": 3 })),
            )
            .await
        })
    };

    // Wait for the human move to land; the reply is still being searched
    let mut thinking = Value::Null;
    for _ in 0..500 {
        tokio::time::sleep(Duration::from_millis(2)).await;
        let (status, game) = send(&app, "GET", "/api/algorithms/1/", None).await;
        assert_eq!(status, StatusCode::OK);
        if game["board_state"][5][3] == 1 {
            thinking = game;
            break;
        }
    }
    assert_eq!(thinking["current_player"], 2);

    let (status, other) = send(&app, "GET", "/api/algorithms/2/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(other["id"], 2);
    let (status, _) = send(&app, "GET", "/api/algorithms/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!mover.is_finished());

    let (status, game) = mover.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["current_player"], 1);
    let pieces: u64 = game["board_state"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|cell| cell.as_u64() != Some(0))
        .count() as u64;
    assert_eq!(pieces, 2);
}

/// Runs the router on a real socket and drives it with the blocking client.
#[test]
fn http_client_against_live_server() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    let base_url = format!("http://{addr}/api/algorithms");
    let api = HttpGameApi::new(&base_url, Duration::from_secs(10)).unwrap();

    let game = api
        .create_game(&CreateGameRequest::new(GameMode::HumanHuman))
        .unwrap();
    let game = api
        .make_move(
            game.id,
            &MoveRequest {
                column: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(game.board_state.piece_count(), 1);

    let err = api
        .make_move(
            game.id,
            &MoveRequest {
                column: Some(-2),
                ..Default::default()
            },
        )
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid move");
        }
        other => panic!("unexpected error: {other}"),
    }

    runtime.shutdown_background();
}
