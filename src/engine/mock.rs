//! Mock completion client for testing.
//!
//! Returns scripted answers and records every request it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::engine::{CompletionClient, CompletionError, CompletionRequest};

type Reply = Box<dyn Fn() -> Result<String, CompletionError> + Send + Sync>;

/// Scripted completion client.
pub struct MockCompletionClient {
    reply: Reply,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    /// Always answer with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_reply(Box::new(move || Ok(text.clone())))
    }

    /// Always fail with the error produced by `make_error`.
    pub fn failing(make_error: impl Fn() -> CompletionError + Send + Sync + 'static) -> Self {
        Self::with_reply(Box::new(move || Err(make_error())))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request);
        (self.reply)()
    }
}
