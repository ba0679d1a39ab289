use crate::e2e::helpers;

use helpers::fixtures::loud_wav;
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

async fn run_batch(ctx: &TestContext, words: &str) -> serde_json::Value {
    ctx.client
        .post("/api/batches", &json!({ "words": words, "language": "lithuanian" }))
        .await
        .unwrap()
        .assert_status(StatusCode::ACCEPTED);
    ctx.wait_for_batch().await.unwrap()
}

fn preview_ids(snapshot: &serde_json::Value) -> Vec<String> {
    snapshot["previews"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_a_generated_clip(ctx: &TestContext) {
    let finished = run_batch(ctx, "labas").await;

    let preview = &finished["previews"][0];
    assert_eq!(preview["source_word"], "labas");
    assert_eq!(preview["display_name"], "labas.wav");

    let response = ctx
        .client
        .get(&format!("/api/previews/{}", preview["id"].as_str().unwrap()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");
    assert_eq!(response.body_bytes, loud_wav());
    assert_eq!(preview["size_bytes"], response.body_bytes.len());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_release_previews_when_a_new_batch_starts(ctx: &TestContext) {
    let first = run_batch(ctx, "labas\nvakaras").await;
    let old_ids = preview_ids(&first);
    assert_eq!(old_ids.len(), 2);

    let second = run_batch(ctx, "rytas").await;
    assert_eq!(preview_ids(&second).len(), 1);

    for id in old_ids {
        ctx.client
            .get(&format!("/api/previews/{}", id))
            .await
            .unwrap()
            .assert_status(StatusCode::NOT_FOUND);
    }
    assert_eq!(ctx.orchestrator.previews().live_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_previews_and_log(ctx: &TestContext) {
    let finished = run_batch(ctx, "labas\nvakaras").await;
    let ids = preview_ids(&finished);

    let response = ctx.client.delete("/api/previews").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["released"], 2);

    for id in ids {
        ctx.client
            .get(&format!("/api/previews/{}", id))
            .await
            .unwrap()
            .assert_status(StatusCode::NOT_FOUND);
    }

    let current = ctx.client.get("/api/batches/current").await.unwrap();
    let body = current.body.as_ref().unwrap();
    assert!(body["previews"].as_array().unwrap().is_empty());
    assert!(body["logs"].as_array().unwrap().is_empty());

    // A second clear has nothing left to release
    let response = ctx.client.delete("/api/previews").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["released"], 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_to_clear_while_running(ctx: &TestContext) {
    ctx.client
        .post(
            "/api/batches",
            &json!({ "words": "a\nb\nc\nd", "language": "lithuanian", "delay_ms": 300 }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::ACCEPTED);

    ctx.client
        .delete("/api/previews")
        .await
        .unwrap()
        .assert_status(StatusCode::CONFLICT);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_preview(ctx: &TestContext) {
    ctx.client
        .get(&format!("/api/previews/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Preview not found");
}
