use chrono::{DateTime, Local};
use serde::Serialize;

use crate::modes::AnalysisMode;
use crate::runtime::OutcomeKind;

/// Status text while nothing is running
pub const IDLE_STATUS: &str = "In attesa di input";

/// Request lifecycle of a session: `Idle -> Requesting -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    Idle,
    Requesting,
}

/// In-progress flag plus a human readable status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingState {
    pub phase: RequestPhase,
    pub status: String,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            phase: RequestPhase::Idle,
            status: IDLE_STATUS.to_string(),
        }
    }
}

impl ProcessingState {
    pub fn in_progress(&self) -> bool {
        self.phase == RequestPhase::Requesting
    }
}

/// The presented outcome of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Text to render and export
    pub markdown: String,
    pub mode: AnalysisMode,
    pub timestamp: DateTime<Local>,
    /// Preview URLs of the images the analysis was run on
    pub image_urls: Vec<String>,
    pub outcome: OutcomeKind,
    pub model: String,
}
