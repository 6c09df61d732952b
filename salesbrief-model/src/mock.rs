use async_trait::async_trait;
use salesbrief_core::{BriefError, Llm, LlmRequest, LlmResponse, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted model for tests and offline runs.
///
/// Responses are returned in the order they were queued, one per call.
/// Requests are recorded so tests can assert on the conversation sent.
pub struct MockLlm {
    name: String,
    responses: Mutex<VecDeque<LlmResponse>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BriefError::Model("MockLlm ran out of scripted responses".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesbrief_core::Content;

    #[test]
    fn test_mock_llm() {
        let mock = MockLlm::new("test-llm")
            .with_response(LlmResponse::new(Content::new("model").with_text("hello")));
        assert_eq!(mock.name(), "test-llm");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_llm_pops_in_order() {
        let mock = MockLlm::new("test")
            .with_response(LlmResponse::new(Content::new("model").with_text("first")))
            .with_response(LlmResponse::new(Content::new("model").with_text("second")));

        let first = mock.generate_content(LlmRequest::new("test", vec![])).await.unwrap();
        assert_eq!(first.content.unwrap().text(), "first");

        let second = mock.generate_content(LlmRequest::new("test", vec![])).await.unwrap();
        assert_eq!(second.content.unwrap().text(), "second");

        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_llm_exhausted() {
        let mock = MockLlm::new("test");
        let err = mock.generate_content(LlmRequest::new("test", vec![])).await.unwrap_err();
        assert!(matches!(err, BriefError::Model(_)));
    }

    #[tokio::test]
    async fn test_mock_llm_records_requests() {
        let mock = MockLlm::new("test")
            .with_response(LlmResponse::new(Content::new("model").with_text("ok")));

        let req = LlmRequest::new("test", vec![Content::new("user").with_text("go")]);
        mock.generate_content(req).await.unwrap();

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].contents[0].text(), "go");
    }
}
