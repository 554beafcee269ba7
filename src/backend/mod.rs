//! Generation backend integration
//!
//! Sends form submissions to the presentation service and decodes its
//! replies.

pub mod client;
pub mod mock;

pub use client::HttpBackend;
pub use mock::MockBackend;

use crate::models::{GenerationRequest, GenerationResponse};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Posts `request` to the endpoint for its mode and returns the decoded
    /// reply. An `Err` means the exchange itself failed: the request never
    /// completed or the body was not a generation response.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
