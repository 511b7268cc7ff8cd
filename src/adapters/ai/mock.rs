//! Scripted completion service for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};

/// A completion service that replays scripted responses in order and
/// records every prompt it was sent.
#[derive(Default)]
pub struct MockCompletionService {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn push_response(&self, content: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(content.into()));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: CompletionError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Prompts received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completions served.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(CompletionResponse {
                content,
                model: "mock".to_string(),
            }),
            Some(Err(error)) => Err(error),
            None => Err(CompletionError::Unavailable(
                "no scripted response left".to_string(),
            )),
        }
    }
}
