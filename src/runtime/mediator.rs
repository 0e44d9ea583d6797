use serde::Serialize;
use tracing::{info, warn};

use crate::models::{FinishReason, GenerateRequest, Model, ModelResponse};
use crate::utils::AnalysisError;

/// Appended to text cut off by the output token limit
pub const TRUNCATION_NOTICE: &str =
    "\n\n---\n[AVVISO: Rapporto troncato. È stato raggiunto il limite massimo di lunghezza della risposta.]";
/// Shown instead of any text when the model refuses for safety reasons
pub const ACCESS_DENIED_MESSAGE: &str =
    "ACCESSO NEGATO: il modello ha rifiutato l'analisi di queste immagini per le sue regole di sicurezza dei contenuti.";

/// What one request produced, as far as the user is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Normal completion; text is never empty
    Complete(String),
    /// Length-limited: partial text, still usable
    Truncated(String),
    /// Safety refusal; partial text is dropped
    Refused,
    /// Finished for a reason we don't recognize
    UnexpectedTermination(String),
}

/// Compact tag for an [`Outcome`], used in results and JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Complete,
    Truncated,
    Refused,
    UnexpectedTermination,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Complete(_) => OutcomeKind::Complete,
            Self::Truncated(_) => OutcomeKind::Truncated,
            Self::Refused => OutcomeKind::Refused,
            Self::UnexpectedTermination(_) => OutcomeKind::UnexpectedTermination,
        }
    }

    /// Text to present for this outcome
    pub fn display_text(&self) -> String {
        match self {
            Self::Complete(text) => text.clone(),
            Self::Truncated(text) => format!("{}{}", text, TRUNCATION_NOTICE),
            Self::Refused => ACCESS_DENIED_MESSAGE.to_string(),
            Self::UnexpectedTermination(code) => unexpected_termination_message(code),
        }
    }
}

pub fn unexpected_termination_message(code: &str) -> String {
    format!(
        "TERMINAZIONE IMPREVISTA: l'analisi si è interrotta in modo anomalo (codice: {}).",
        code
    )
}

/// Turn a raw model response into an outcome.
///
/// Zero candidates are a refusal when the prompt was blocked and a transport
/// error otherwise. More than one candidate is never requested, so it is
/// treated as a transport error too.
pub fn interpret(response: ModelResponse, no_findings: &str) -> Result<Outcome, AnalysisError> {
    let mut candidates = response.candidates;

    if candidates.len() > 1 {
        return Err(AnalysisError::Transport(format!(
            "expected one candidate, got {}",
            candidates.len()
        )));
    }

    let Some(candidate) = candidates.pop() else {
        return match response.block_reason {
            Some(reason) => {
                warn!("Prompt blocked by the model ({})", reason);
                Ok(Outcome::Refused)
            }
            None => Err(AnalysisError::Transport(
                "response contained no candidates".to_string(),
            )),
        };
    };

    let outcome = match candidate.finish_reason {
        FinishReason::Stop if candidate.text.trim().is_empty() => {
            Outcome::Complete(no_findings.to_string())
        }
        FinishReason::Stop => Outcome::Complete(candidate.text),
        FinishReason::Length => Outcome::Truncated(candidate.text),
        FinishReason::Safety => Outcome::Refused,
        FinishReason::Other(code) => {
            warn!("Unrecognized finish reason: {}", code);
            Outcome::UnexpectedTermination(code)
        }
    };
    Ok(outcome)
}

/// Issue the single request for one analysis and interpret its outcome.
/// No retries: a failure ends the action.
pub async fn mediate(
    model: &dyn Model,
    request: &GenerateRequest,
    no_findings: &str,
) -> Result<Outcome, AnalysisError> {
    let response = model.generate(request).await?;

    if let Some(usage) = &response.usage {
        info!(
            "{} used {} tokens ({} prompt, {} completion)",
            model.name(),
            usage.total_tokens,
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }

    interpret(response, no_findings)
}
