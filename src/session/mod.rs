/// Session management module - Gateway

mod context;
mod state;

pub use context::Session;
pub use state::{AnalysisResult, ProcessingState, RequestPhase, IDLE_STATUS};
