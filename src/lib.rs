pub mod app;
pub mod cli;
pub mod constants;
pub mod intake;
pub mod models;
pub mod modes;
pub mod prompt;
pub mod report;
pub mod runtime;
pub mod session;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{GeminiModel, Model, ModelFactory};
pub use modes::{AnalysisMode, Profile};
pub use runtime::{AnalysisController, Outcome};
pub use utils::AnalysisError;
