/*!
 * Mock provider implementation for testing.
 *
 * Replies are scripted up front and handed out in call order:
 * - `MockProvider::scripted(...)` - Plays back a fixed list of replies
 * - `MockProvider::failing(status)` - Always answers with a non-200 status
 * - `MockProvider::unreachable()` - Always fails like a refused connection
 *
 * Every call is recorded so tests can assert on the prompts the stages built.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// A request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// Model name passed by the caller
    pub model: String,
    /// Rendered prompt
    pub prompt: String,
}

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 OK carrying this generated text
    Text(String),
    /// A non-200 status
    Status(u16),
    /// A body that is not a valid envelope
    Malformed(String),
    /// Connection refused
    Unreachable,
}

impl MockReply {
    /// Shorthand for a successful reply
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn into_result(self) -> Result<String, ProviderError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Status(status_code) => Err(ProviderError::UpstreamStatus {
                status_code,
                message: "Simulated upstream failure".to_string(),
            }),
            Self::Malformed(body) => Err(ProviderError::Decode(format!(
                "Simulated malformed envelope: {}",
                body
            ))),
            Self::Unreachable => Err(ProviderError::Transport(
                "Simulated connection refused".to_string(),
            )),
        }
    }
}

/// Behavior once the script is exhausted (or for unscripted mocks)
#[derive(Debug, Clone, Copy, PartialEq)]
enum MockBehavior {
    /// Running out of replies is a test bug, surfaced as a transport error
    Scripted,
    /// Always answer with this status
    Failing { status_code: u16 },
    /// Always refuse the connection
    Unreachable,
}

/// Mock provider for exercising the pipeline stages
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockProvider {
    fn new(behavior: MockBehavior, replies: Vec<MockReply>) -> Self {
        Self {
            behavior,
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that plays back `replies` in order
    pub fn scripted(replies: Vec<MockReply>) -> Self {
        Self::new(MockBehavior::Scripted, replies)
    }

    /// Create a mock answering a segmentation call with `segments` and then
    /// each translation call with the matching entry of `translations`
    pub fn segments_then_translations(segments: &[&str], translations: &[&str]) -> Self {
        let segment_json = serde_json::to_string(segments).unwrap_or_else(|_| "[]".to_string());
        let mut replies = vec![MockReply::Text(segment_json)];
        replies.extend(translations.iter().map(|t| MockReply::text(*t)));
        Self::scripted(replies)
    }

    /// Create a mock that always answers with `status_code`
    pub fn failing(status_code: u16) -> Self {
        Self::new(MockBehavior::Failing { status_code }, Vec::new())
    }

    /// Create a mock that always refuses the connection
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable, Vec::new())
    }

    /// All requests received so far, in call order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of scripted replies not yet consumed
    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        self.requests.lock().push(MockRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        match self.behavior {
            MockBehavior::Failing { status_code } => MockReply::Status(status_code).into_result(),
            MockBehavior::Unreachable => MockReply::Unreachable.into_result(),
            MockBehavior::Scripted => match self.replies.lock().pop_front() {
                Some(reply) => reply.into_result(),
                None => Err(ProviderError::Transport(
                    "Mock provider ran out of scripted replies".to_string(),
                )),
            },
        }
    }
}
