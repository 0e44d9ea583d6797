use tracing::debug;

use super::state::{AnalysisResult, ProcessingState, RequestPhase, IDLE_STATUS};
use crate::intake::{ImagePayload, PreviewHandle, PreviewRegistry, UploadedImage};
use crate::utils::AnalysisError;

/// In-memory state of one user's work: the loaded images, their previews,
/// the latest result and the request lifecycle.
///
/// Every preview registered here is released when its image is replaced,
/// when the session is cleared, or when the session is dropped.
#[derive(Debug, Default)]
pub struct Session {
    images: Vec<UploadedImage>,
    previews: PreviewRegistry,
    result: Option<AnalysisResult>,
    processing: ProcessingState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn processing(&self) -> &ProcessingState {
        &self.processing
    }

    /// Display data for a preview, `None` once it has been released
    pub fn preview(&self, handle: &PreviewHandle) -> Option<&str> {
        self.previews.resolve(handle)
    }

    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    fn ensure_idle(&self) -> Result<(), AnalysisError> {
        match self.processing.phase {
            RequestPhase::Idle => Ok(()),
            RequestPhase::Requesting => Err(AnalysisError::Busy),
        }
    }

    /// Swap in a new image selection. Previews of the old selection are
    /// released and the previous result is discarded.
    pub fn replace_images(
        &mut self,
        payloads: Vec<ImagePayload>,
    ) -> Result<Vec<PreviewHandle>, AnalysisError> {
        self.ensure_idle()?;
        if payloads.is_empty() {
            return Err(AnalysisError::InvalidInput("no file selected".to_string()));
        }

        self.release_images();
        self.result = None;

        self.images = payloads
            .into_iter()
            .map(|payload| {
                let preview = self.previews.register(&payload);
                UploadedImage { payload, preview }
            })
            .collect();

        debug!("Session now holds {} image(s)", self.images.len());
        Ok(self.images.iter().map(|image| image.preview.clone()).collect())
    }

    /// Drop images, previews and result. Returns how many previews were released.
    pub fn clear(&mut self) -> Result<usize, AnalysisError> {
        self.ensure_idle()?;
        let released = self.release_images();
        self.result = None;
        self.processing = ProcessingState::default();
        Ok(released)
    }

    fn release_images(&mut self) -> usize {
        let mut released = 0;
        for image in self.images.drain(..) {
            if self.previews.release(&image.preview) {
                released += 1;
            }
        }
        released
    }

    /// `Idle -> Requesting`. Needs at least one image and no request in flight.
    pub fn begin_request(&mut self, status: impl Into<String>) -> Result<Vec<UploadedImage>, AnalysisError> {
        if self.images.is_empty() {
            return Err(AnalysisError::InvalidInput("no image loaded".to_string()));
        }
        self.ensure_idle()?;

        self.processing = ProcessingState {
            phase: RequestPhase::Requesting,
            status: status.into(),
        };
        self.result = None;
        Ok(self.images.clone())
    }

    /// Update the status line of the request in flight
    pub fn set_status(&mut self, status: impl Into<String>) {
        if self.processing.in_progress() {
            self.processing.status = status.into();
        }
    }

    /// `Requesting -> Idle`, whatever the request's fate
    pub fn finish_request(&mut self) {
        self.processing.phase = RequestPhase::Idle;
        self.processing.status = IDLE_STATUS.to_string();
    }

    pub fn store_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.previews.release_all();
    }
}
