use crate::e2e::helpers;

use helpers::fixtures::{loud_wav, read_zip};
use helpers::provider_stubs::{start_openai_stub, GOOD_KEY};
use helpers::{log_messages, TestContext};
use hyper::StatusCode;
use pronunciation_batcher::domain::tts::{Language, SpeechClientError, SpeechRequest, Voice};
use pronunciation_batcher::infrastructure::repositories::{OpenAiTtsRepository, TtsRepository};
use serde_json::json;
use std::sync::Arc;

fn repository(base_url: &str) -> OpenAiTtsRepository {
    OpenAiTtsRepository::new(format!("{}/v1", base_url), "tts-1".to_string())
}

fn request(word: &str, credential: &str) -> SpeechRequest {
    SpeechRequest {
        word: word.to_string(),
        language: Language::Russian,
        voice: Voice::Charon,
        credential: credential.to_string(),
    }
}

#[tokio::test]
async fn it_should_request_wav_speech() {
    let stub = start_openai_stub().await;

    let audio = repository(&stub.base_url)
        .generate(&request("привет", GOOD_KEY))
        .await
        .unwrap();

    assert_eq!(audio, loud_wav());

    let sent = stub.requests.lock()[0].clone();
    assert_eq!(sent["input"], "привет");
    assert_eq!(sent["model"], "tts-1");
    assert_eq!(sent["voice"], "onyx");
    assert_eq!(sent["response_format"], "wav");
}

#[tokio::test]
async fn it_should_map_invalid_keys_to_auth_errors() {
    let stub = start_openai_stub().await;

    let err = repository(&stub.base_url)
        .generate(&request("привет", "bad-key"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SpeechClientError::Auth("Incorrect API key provided: bad-key.".to_string())
    );
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn it_should_fail_silent_clips_validation() {
    let stub = start_openai_stub().await;
    let ctx = TestContext::without_credential(Arc::new(repository(&stub.base_url)))
        .await
        .unwrap();

    ctx.client
        .post(
            "/api/batches",
            &json!({ "words": "да\n?!", "language": "russian", "api_key": GOOD_KEY }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::ACCEPTED);

    let finished = ctx.wait_for_batch().await.unwrap();
    assert_eq!(finished["last_report"]["successes"], 1);
    assert_eq!(finished["last_report"]["failures"], 1);

    let logs = log_messages(&finished);
    assert!(logs.contains(&"Success: да.wav".to_string()));
    assert!(logs.contains(&"Failed \"?!\": Audio file contains only silence".to_string()));

    let response = ctx.client.get("/api/batches/current/archive").await.unwrap();
    let entries = read_zip(&response.body_bytes);
    assert_eq!(entries.len(), 1);
    assert!(entries[0].0.starts_with("pronunciations_russian_"));
    assert!(entries[0].0.ends_with("/да.wav"));
    // Container output is stored as returned
    assert_eq!(entries[0].1, loud_wav());
}

#[tokio::test]
async fn it_should_report_the_openai_profile() {
    let stub = start_openai_stub().await;
    let ctx = TestContext::with_tts(Arc::new(repository(&stub.base_url)))
        .await
        .unwrap();

    let response = ctx.client.get("/api/options").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["default_delay_ms"], 1000);
}
