use super::GenerationBackend;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Response(GenerationResponse),
    TransportError(String),
}

/// In-memory backend that records every request it receives.
#[derive(Clone)]
pub struct MockBackend {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: GenerationResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Response(response));
        self
    }

    pub fn with_transport_error(self, message: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::TransportError(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock response
            return Ok(GenerationResponse::succeeded("/generated/mock.pptx"));
        }

        let index = (count - 1) % replies.len();
        match &replies[index] {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::TransportError(message) => Err(Error::Generic(message.clone())),
        }
    }
}
