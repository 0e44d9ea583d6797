use std::sync::Arc;

use reperto::intake::ImagePayload;
use reperto::models::{GeminiModel, GenerationConfig};
use reperto::modes::{AnalysisMode, ForensicMode, Profile, RockArtMode};
use reperto::runtime::{AnalysisController, OutcomeKind, ACCESS_DENIED_MESSAGE, TRUNCATION_NOTICE};
use reperto::AnalysisError;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT_PATH: &str = "/models/gemini-test:generateContent";

fn generation() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.2,
        max_output_tokens: 4096,
        safety_threshold: "BLOCK_NONE".to_string(),
    }
}

/// Each test uses its own key variable so parallel tests don't interfere
fn controller(server: &MockServer, key_env: &str, key: Option<&str>) -> AnalysisController {
    match key {
        Some(key) => std::env::set_var(key_env, key),
        None => std::env::remove_var(key_env),
    }
    let model = GeminiModel::new(&server.uri(), MODEL, key_env).unwrap();
    let controller = AnalysisController::new(Arc::new(model), generation());
    controller
        .replace_images(vec![
            ImagePayload::from_bytes("scena.jpg", "image/jpeg", b"first"),
            ImagePayload::from_bytes("dettaglio.png", "image/png", b"second"),
        ])
        .unwrap();
    controller
}

fn reply(text: &str, finish_reason: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": finish_reason
        }],
        "usageMetadata": {"promptTokenCount": 1200, "candidatesTokenCount": 300, "totalTokenCount": 1500}
    }))
}

const FULL_REPORT: AnalysisMode = AnalysisMode::Forensic(ForensicMode::FullReport);

#[tokio::test]
async fn test_request_shape_and_complete_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .and(header("x-goog-api-key", "key-shape"))
        .respond_with(reply("# Dossier\n- reperto 1", "STOP"))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_SHAPE", Some("key-shape"));
    let result = controller
        .analyze(FULL_REPORT, Some("corridoio, ore 23"))
        .await
        .unwrap();

    assert_eq!(result.markdown, "# Dossier\n- reperto 1");
    assert_eq!(result.outcome, OutcomeKind::Complete);
    assert_eq!(result.image_urls.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");

    let prompt = parts[2]["text"].as_str().unwrap();
    assert!(prompt.contains("DATA DEL RAPPORTO:"));
    assert!(prompt.contains("corridoio, ore 23"));
    assert!(prompt.contains("2 immagini"));

    let system = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert_eq!(system, Profile::Forensic.spec().system_instruction);

    assert_eq!(body["generationConfig"]["candidateCount"], 1);
    let safety = body["safetySettings"].as_array().unwrap();
    assert_eq!(safety.len(), 4);
    assert!(safety.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
}

#[tokio::test]
async fn test_max_tokens_is_truncated_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(reply("## Sezione 1\nTesto parz", "MAX_TOKENS"))
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_LENGTH", Some("k"));
    let result = controller
        .analyze(AnalysisMode::RockArt(RockArtMode::FullReport), None)
        .await
        .unwrap();

    assert_eq!(result.outcome, OutcomeKind::Truncated);
    assert_eq!(
        result.markdown,
        format!("## Sezione 1\nTesto parz{}", TRUNCATION_NOTICE)
    );
}

#[tokio::test]
async fn test_safety_stop_is_refusal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(reply("testo che non deve comparire", "SAFETY"))
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_SAFETY", Some("k"));
    let result = controller.analyze(FULL_REPORT, None).await.unwrap();

    assert_eq!(result.outcome, OutcomeKind::Refused);
    assert_eq!(result.markdown, ACCESS_DENIED_MESSAGE);
}

#[tokio::test]
async fn test_blocked_prompt_is_refusal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
        )
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_BLOCKED", Some("k"));
    let result = controller.analyze(FULL_REPORT, None).await.unwrap();
    assert_eq!(result.outcome, OutcomeKind::Refused);
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_500", Some("k"));
    let err = controller.analyze(FULL_REPORT, None).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Transport(_)));
    assert!(!controller.processing_state().in_progress());
    assert!(controller.current_result().is_none());
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("x", "STOP"))
        .expect(0)
        .mount(&server)
        .await;

    let controller = controller(&server, "REPERTO_IT_KEY_MISSING", None);
    let err = controller.analyze(FULL_REPORT, None).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Configuration(_)));
    assert_eq!(err.user_message(), "API Key non configurata.");
    assert!(server.received_requests().await.unwrap().is_empty());
}
