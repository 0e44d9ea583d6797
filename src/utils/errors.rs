use thiserror::Error;

/// Failures of one analysis action.
///
/// Model refusals, truncation and unknown finish reasons are not errors: they
/// come back as an [`Outcome`](crate::runtime::Outcome) with a display text.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("An analysis request is already in flight")]
    Busy,
}

impl AnalysisError {
    /// Fixed, non-technical sentence shown to the user for this category.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => {
                "Nessuna immagine valida selezionata. Caricare almeno un reperto visivo."
            }
            Self::Configuration(_) => "API Key non configurata.",
            Self::Transport(_) => {
                "ERRORE DI SISTEMA: Impossibile completare l'analisi. Riprovare."
            }
            Self::Busy => "Analisi già in corso. Attendere il completamento.",
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
