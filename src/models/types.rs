use serde::Serialize;

use crate::intake::ImagePayload;

/// Sampling and filtering parameters for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Threshold applied to every harm category, e.g. `BLOCK_NONE`
    pub safety_threshold: String,
}

/// Everything sent to the model for one analysis
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub images: Vec<ImagePayload>,
    pub config: GenerationConfig,
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FinishReason {
    /// Natural end of the answer
    Stop,
    /// Output token limit reached
    Length,
    /// Blocked by a content filter
    Safety,
    /// Any other code, kept verbatim
    Other(String),
}

impl FinishReason {
    /// Map a wire code to a finish reason. Accepts both the Gemini
    /// (`MAX_TOKENS`) and the OpenAI style (`length`) spellings.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "STOP" => Self::Stop,
            "MAX_TOKENS" | "LENGTH" => Self::Length,
            "SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" | "IMAGE_SAFETY" => {
                Self::Safety
            }
            _ => Self::Other(code.trim().to_string()),
        }
    }
}

/// One generated answer
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub finish_reason: FinishReason,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Response from a model, before interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub candidates: Vec<Candidate>,
    /// Set when the prompt itself was blocked and no candidate was produced
    pub block_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl ModelResponse {
    /// Response with a single candidate, mostly for tests and stubs
    pub fn single(text: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            candidates: vec![Candidate {
                text: text.into(),
                finish_reason,
            }],
            block_reason: None,
            usage: None,
        }
    }
}
