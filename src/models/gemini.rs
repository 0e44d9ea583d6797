use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::traits::Model;
use super::types::{Candidate, FinishReason, GenerateRequest, ModelResponse, TokenUsage};
use crate::constants::{API_KEY_HEADER, SAFETY_CATEGORIES};
use crate::utils::AnalysisError;

/// Google Gemini `generateContent` over plain HTTPS
pub struct GeminiModel {
    client: Client,
    endpoint: String,
    model_name: String,
    api_key_env: String,
}

impl GeminiModel {
    pub fn new(endpoint: &str, model_name: &str, api_key_env: &str) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .user_agent(concat!("reperto/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model_name: model_name.to_string(),
            api_key_env: api_key_env.to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model_name)
    }

    /// Read the credential at call time; absence is a configuration error
    fn api_key(&self) -> Result<String, AnalysisError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AnalysisError::Configuration(format!("environment variable {} is not set", self.api_key_env))
            })
    }

    fn convert_response(&self, response: WireResponse) -> ModelResponse {
        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| {
                let text = candidate
                    .content
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .filter_map(|part| part.text)
                            .collect::<String>()
                    })
                    .unwrap_or_default();
                let finish_reason = candidate
                    .finish_reason
                    .as_deref()
                    .map(FinishReason::from_code)
                    .unwrap_or_else(|| FinishReason::Other("FINISH_REASON_UNSPECIFIED".to_string()));
                Candidate { text, finish_reason }
            })
            .collect();

        ModelResponse {
            candidates,
            block_reason: response.prompt_feedback.and_then(|f| f.block_reason),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
        }
    }
}

/// Build the JSON body: inline images first, then the prompt text
fn wire_request(request: &GenerateRequest) -> WireRequest<'_> {
    let mut parts: Vec<WirePart<'_>> = request
        .images
        .iter()
        .map(|image| {
            WirePart::InlineData(WireBlob {
                mime_type: &image.media_type,
                data: &image.data,
            })
        })
        .collect();
    parts.push(WirePart::Text(&request.prompt));

    WireRequest {
        system_instruction: WireContent {
            role: None,
            parts: vec![WirePart::Text(&request.system_instruction)],
        },
        contents: vec![WireContent {
            role: Some("user"),
            parts,
        }],
        generation_config: WireGenerationConfig {
            temperature: request.config.temperature,
            max_output_tokens: request.config.max_output_tokens,
            candidate_count: 1,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|category| WireSafetySetting {
                category: *category,
                threshold: &request.config.safety_threshold,
            })
            .collect(),
    }
}

#[async_trait]
impl Model for GeminiModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, AnalysisError> {
        let api_key = self.api_key()?;
        let body = wire_request(request);

        debug!(
            "Sending {} image(s) and {} prompt chars to {}",
            request.images.len(),
            request.prompt.len(),
            self.model_name
        );

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Model request failed: {}", e);
                AnalysisError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Model endpoint error ({}): {}", status, error_text);
            return Err(AnalysisError::Transport(format!(
                "endpoint returned {}",
                status
            )));
        }

        let wire: WireResponse = response.json().await.map_err(|e| {
            error!("Undecodable model response: {}", e);
            AnalysisError::Transport(format!("invalid response body: {}", e))
        })?;

        Ok(self.convert_response(wire))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

// Request structures (camelCase JSON)

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    system_instruction: WireContent<'a>,
    contents: Vec<WireContent<'a>>,
    generation_config: WireGenerationConfig,
    safety_settings: Vec<WireSafetySetting<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum WirePart<'a> {
    Text(&'a str),
    InlineData(WireBlob<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireBlob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Debug, Serialize)]
struct WireSafetySetting<'a> {
    category: &'a str,
    threshold: &'a str,
}

// Response structures

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    prompt_feedback: Option<WirePromptFeedback>,
    usage_metadata: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
    #[serde(default)]
    total_token_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::ImagePayload;
    use crate::models::GenerationConfig;
    use serde_json::json;

    fn request() -> GenerateRequest {
        GenerateRequest {
            system_instruction: "persona".to_string(),
            prompt: "describe".to_string(),
            images: vec![
                ImagePayload::from_bytes("a.jpg", "image/jpeg", b"a"),
                ImagePayload::from_bytes("b.png", "image/png", b"b"),
            ],
            config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 1024,
                safety_threshold: "BLOCK_NONE".to_string(),
            },
        }
    }

    #[test]
    fn test_wire_request_shape() {
        let request = request();
        let body = serde_json::to_value(wire_request(&request)).unwrap();

        assert_eq!(body["systemInstruction"], json!({"parts": [{"text": "persona"}]}));
        assert_eq!(body["contents"][0]["role"], "user");

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], json!({"inlineData": {"mimeType": "image/jpeg", "data": "YQ=="}}));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[2], json!({"text": "describe"}));

        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["generationConfig"]["candidateCount"], 1);

        let safety = body["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), SAFETY_CATEGORIES.len());
        assert!(safety.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
    }

    #[test]
    fn test_convert_response_joins_parts() {
        let model = GeminiModel::new("http://localhost", "gemini-test", "UNUSED").unwrap();
        let wire: WireResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "# Rapporto\n"}, {"text": "corpo"}]},
                "finishReason": "MAX_TOKENS"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }))
        .unwrap();

        let response = model.convert_response(wire);
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].text, "# Rapporto\ncorpo");
        assert_eq!(response.candidates[0].finish_reason, FinishReason::Length);
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_convert_blocked_prompt() {
        let model = GeminiModel::new("http://localhost", "gemini-test", "UNUSED").unwrap();
        let wire: WireResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let response = model.convert_response(wire);
        assert!(response.candidates.is_empty());
        assert_eq!(response.block_reason.as_deref(), Some("SAFETY"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let model =
            GeminiModel::new("http://127.0.0.1:9", "gemini-test", "REPERTO_TEST_UNSET_KEY_4D1C").unwrap();
        let result = model.generate(&request()).await;
        assert!(matches!(result, Err(AnalysisError::Configuration(_))));
    }
}
