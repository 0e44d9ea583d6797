use std::sync::Arc;

use super::gemini::GeminiModel;
use super::traits::Model;
use crate::app::ModelSettings;
use crate::utils::AnalysisError;

/// Factory for creating model instances from configuration
pub struct ModelFactory;

impl ModelFactory {
    /// Create the configured model. The credential is not read here but on
    /// every request, so a missing key surfaces when an analysis is attempted.
    pub fn create(settings: &ModelSettings) -> Result<Arc<dyn Model>, AnalysisError> {
        if settings.name.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "model name is empty".to_string(),
            ));
        }

        let model = GeminiModel::new(&settings.endpoint, &settings.name, &settings.api_key_env)?;
        Ok(Arc::new(model))
    }
}
