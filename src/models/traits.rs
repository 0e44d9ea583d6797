use async_trait::async_trait;

use super::types::{GenerateRequest, ModelResponse};
use crate::utils::AnalysisError;

/// Seam between the analysis pipeline and a hosted multimodal model
#[async_trait]
pub trait Model: Send + Sync {
    /// Issue exactly one generation request. Implementations must not retry.
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, AnalysisError>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
