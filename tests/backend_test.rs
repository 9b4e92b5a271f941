//! モックバックエンドを使った送信フローの統合テスト
//!
//! ローカルにaxumサーバーを立て、reqwestによる送信から表示文字列までを検証

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chat_hd::session::ChatSession;
use chat_hd::transport::HttpTransport;
use chat_hd_common::{
    decode_payload, Reply, SubmitOutcome, SubmitState, STATUS_FAILURE, TRANSPORT_FAILURE,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// ルーターを127.0.0.1の空きポートで起動し、送信先URLを返す
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("サーバー停止");
    });
    format!("http://{}/dev/extract", addr)
}

/// リクエストボディをそのまま`kb_output`に入れて返す
fn echo_router() -> Router {
    Router::new().route(
        "/dev/extract",
        post(|Json(body): Json<Value>| async move { Json(json!({ "kb_output": body })) }),
    )
}

fn session(endpoint: &str) -> ChatSession<HttpTransport> {
    let transport = HttpTransport::new(Duration::from_secs(5)).expect("クライアント生成失敗");
    ChatSession::new(transport, endpoint)
}

fn display_text(outcome: &SubmitOutcome) -> Option<String> {
    match outcome {
        SubmitOutcome::Completed(reply) => reply.display_text().map(str::to_owned),
        SubmitOutcome::Skipped => panic!("送信がスキップされた"),
    }
}

/// echoされたリクエストボディを取り出す
fn echoed_body(outcome: &SubmitOutcome) -> Value {
    let text = display_text(outcome).expect("回答なし");
    serde_json::from_str(&text).expect("echoがJSONでない")
}

#[tokio::test]
async fn test_text_only_answer() {
    let router = Router::new().route(
        "/dev/extract",
        post(|| async { Json(json!({ "kb_output": "Hi there" })) }),
    );
    let endpoint = spawn_backend(router).await;
    let session = session(&endpoint);

    let outcome = session.send("Hello").await;

    assert_eq!(display_text(&outcome).as_deref(), Some("Hi there"));
    assert_eq!(session.submitter().in_flight().state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_request_body_without_image() {
    let endpoint = spawn_backend(echo_router()).await;
    let session = session(&endpoint);

    let outcome = session.send("Hello").await;

    assert_eq!(echoed_body(&outcome), json!({ "image": null, "user_input": "Hello" }));
}

#[tokio::test]
async fn test_request_body_with_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.png");
    let bytes = b"\x89PNG\r\n\x1a\nfake image body".to_vec();
    std::fs::write(&path, &bytes).unwrap();

    let endpoint = spawn_backend(echo_router()).await;
    let mut session = session(&endpoint);
    session.select_image(&path).expect("画像選択失敗");

    let outcome = session.send("what is on this card?").await;

    let body = echoed_body(&outcome);
    assert_eq!(body["user_input"], "what is on this card?");
    let image = body["image"].as_str().expect("imageが文字列でない");
    assert!(!image.starts_with("data:"));
    assert_eq!(decode_payload(image).expect("デコード失敗"), bytes);
}

#[tokio::test]
async fn test_deleted_image_is_not_sent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.jpg");
    std::fs::write(&path, b"jpeg").unwrap();

    let endpoint = spawn_backend(echo_router()).await;
    let mut session = session(&endpoint);
    session.select_image(&path).expect("画像選択失敗");
    assert!(session.delete_image().is_some());

    let outcome = session.send("Hello").await;

    assert_eq!(echoed_body(&outcome)["image"], Value::Null);
}

#[tokio::test]
async fn test_unreadable_image_is_omitted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("card.png");
    std::fs::write(&path, b"png").unwrap();

    let endpoint = spawn_backend(echo_router()).await;
    let mut session = session(&endpoint);
    session.select_image(&path).expect("画像選択失敗");
    std::fs::remove_file(&path).unwrap();

    let outcome = session.send("Hello").await;

    assert_eq!(echoed_body(&outcome), json!({ "image": null, "user_input": "Hello" }));
}

#[tokio::test]
async fn test_structured_answer_is_pretty_printed() {
    let router = Router::new().route(
        "/dev/extract",
        post(|| async { Json(json!({ "kb_output": { "rate": 5.5 } })) }),
    );
    let endpoint = spawn_backend(router).await;

    let outcome = session(&endpoint).send("rate?").await;

    assert_eq!(display_text(&outcome).as_deref(), Some("{\n  \"rate\": 5.5\n}"));
}

#[tokio::test]
async fn test_missing_answer_field() {
    let router = Router::new().route(
        "/dev/extract",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let endpoint = spawn_backend(router).await;

    let outcome = session(&endpoint).send("Hello").await;

    assert_eq!(outcome, SubmitOutcome::Completed(Reply::Answer(None)));
}

#[tokio::test]
async fn test_server_error_status() {
    let router = Router::new().route(
        "/dev/extract",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = spawn_backend(router).await;
    let session = session(&endpoint);

    let outcome = session.send("Hello").await;

    assert_eq!(display_text(&outcome).as_deref(), Some(STATUS_FAILURE));
    assert!(!session.submitter().in_flight().is_submitting());
}

#[tokio::test]
async fn test_invalid_json_body() {
    let router = Router::new().route("/dev/extract", post(|| async { "not json" }));
    let endpoint = spawn_backend(router).await;

    let outcome = session(&endpoint).send("Hello").await;

    assert_eq!(display_text(&outcome).as_deref(), Some(TRANSPORT_FAILURE));
}

#[tokio::test]
async fn test_connection_refused() {
    // 一度bindして解放したポートには誰もいない
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");
    drop(listener);

    let session = session(&format!("http://{}/dev/extract", addr));
    let outcome = session.send("Hello").await;

    assert_eq!(display_text(&outcome).as_deref(), Some(TRANSPORT_FAILURE));
    assert_eq!(session.submitter().in_flight().state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_concurrent_submit_issues_one_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/dev/extract",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(200)).await;
                Json(json!({ "kb_output": "done" }))
            }),
        )
        .with_state(Arc::clone(&hits));
    let endpoint = spawn_backend(router).await;
    let session = session(&endpoint);

    let (first, second) = tokio::join!(session.send("one"), session.send("two"));

    assert_eq!(display_text(&first).as_deref(), Some("done"));
    assert_eq!(second, SubmitOutcome::Skipped);
    assert_eq!(session.submitter().requests_issued(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // 完了後は再送信できる
    let third = session.send("three").await;
    assert_eq!(display_text(&third).as_deref(), Some("done"));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
