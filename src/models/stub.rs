use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::traits::Model;
use super::types::{FinishReason, GenerateRequest, ModelResponse};
use crate::utils::AnalysisError;

type Responder = Box<dyn Fn() -> Result<ModelResponse, AnalysisError> + Send + Sync>;

/// Test double: records every request and answers from a script
pub(crate) struct StubModel {
    respond: Responder,
    requests: Mutex<Vec<GenerateRequest>>,
    started: Notify,
    gate: Option<Notify>,
}

impl StubModel {
    fn new(respond: Responder, gated: bool) -> Self {
        Self {
            respond,
            requests: Mutex::new(Vec::new()),
            started: Notify::new(),
            gate: gated.then(Notify::new),
        }
    }

    pub(crate) fn replying(text: &str, finish_reason: FinishReason) -> Self {
        let response = ModelResponse::single(text, finish_reason);
        Self::new(Box::new(move || Ok(response.clone())), false)
    }

    pub(crate) fn failing(error: fn() -> AnalysisError) -> Self {
        Self::new(Box::new(move || Err(error())), false)
    }

    /// Holds every request until [`StubModel::release`] is called
    pub(crate) fn gated(response: ModelResponse) -> Self {
        Self::new(Box::new(move || Ok(response.clone())), true)
    }

    pub(crate) async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Model for StubModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, AnalysisError> {
        self.requests.lock().push(request.clone());
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        (self.respond)()
    }

    fn name(&self) -> &str {
        "stub"
    }
}
