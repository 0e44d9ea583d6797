use chrono::Local;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use super::mediator::mediate;
use crate::intake::{load_images, ImagePayload, PreviewHandle};
use crate::models::{GenerateRequest, GenerationConfig, Model};
use crate::modes::AnalysisMode;
use crate::prompt::{compose_prompt, PromptContext};
use crate::session::{AnalysisResult, ProcessingState, Session};
use crate::utils::AnalysisError;

/// Top-level owner of one session and the model it talks to.
///
/// The session lock is never held across an await. The request lifecycle
/// lives in the session, so overlapping `analyze` calls from any caller get
/// [`AnalysisError::Busy`].
pub struct AnalysisController {
    model: Arc<dyn Model>,
    generation: GenerationConfig,
    session: Mutex<Session>,
}

/// Returns the session to idle however the request ends
struct InFlight<'a> {
    session: &'a Mutex<Session>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session.lock().finish_request();
    }
}

impl AnalysisController {
    pub fn new(model: Arc<dyn Model>, generation: GenerationConfig) -> Self {
        Self {
            model,
            generation,
            session: Mutex::new(Session::new()),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Read image files and make them the current selection
    pub async fn load_images<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<PreviewHandle>, AnalysisError> {
        let payloads = load_images(paths).await?;
        self.replace_images(payloads)
    }

    pub fn replace_images(&self, payloads: Vec<ImagePayload>) -> Result<Vec<PreviewHandle>, AnalysisError> {
        self.session.lock().replace_images(payloads)
    }

    /// End the session's current work and release its previews
    pub fn clear(&self) -> Result<usize, AnalysisError> {
        let released = self.session.lock().clear()?;
        info!("Session cleared, {} preview(s) released", released);
        Ok(released)
    }

    pub fn processing_state(&self) -> ProcessingState {
        self.session.lock().processing().clone()
    }

    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.session.lock().result().cloned()
    }

    pub fn image_count(&self) -> usize {
        self.session.lock().images().len()
    }

    /// Read-only access to the session
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.session.lock())
    }

    /// Run one analysis of the current images.
    ///
    /// Fails with `InvalidInput` without images and `Busy` while another
    /// analysis runs. Refusals and truncation come back as results.
    pub async fn analyze(
        &self,
        mode: AnalysisMode,
        notes: Option<&str>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let now = Local::now();
        let images = self
            .session
            .lock()
            .begin_request(format!("Preparazione analisi: {}", mode.label()))?;
        let _in_flight = InFlight {
            session: &self.session,
        };

        let profile = mode.profile().spec();
        let prompt = compose_prompt(
            mode,
            &PromptContext {
                image_count: images.len(),
                notes,
                now,
            },
        );
        let request = GenerateRequest {
            system_instruction: profile.system_instruction.to_string(),
            prompt,
            images: images.iter().map(|image| image.payload.clone()).collect(),
            config: self.generation.clone(),
        };

        self.session.lock().set_status(format!(
            "Elaborazione {} in corso ({} immagini)...",
            mode.label(),
            images.len()
        ));
        info!("Analyzing {} image(s) with mode {}", images.len(), mode.qualified_key());

        let outcome = match mediate(self.model.as_ref(), &request, profile.no_findings).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Analysis failed: {}", e);
                return Err(e);
            }
        };

        let result = AnalysisResult {
            markdown: outcome.display_text(),
            mode,
            timestamp: now,
            image_urls: images.iter().map(|image| image.preview.url().to_string()).collect(),
            outcome: outcome.kind(),
            model: self.model.name().to_string(),
        };
        self.session.lock().store_result(result.clone());
        Ok(result)
    }
}
