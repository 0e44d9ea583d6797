// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

mod factory;
mod gemini;
mod traits;
mod types;

pub use factory::ModelFactory;
pub use gemini::GeminiModel;
pub use traits::Model;
pub use types::{
    Candidate, FinishReason, GenerateRequest, GenerationConfig, ModelResponse, TokenUsage,
};

#[cfg(test)]
mod stub;
#[cfg(test)]
pub(crate) use stub::StubModel;
