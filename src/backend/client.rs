use super::GenerationBackend;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}{}", self.base_url, request.endpoint());
        tracing::debug!("Sending {:?} generation request to {}", request.mode(), url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to backend: {}", e);
                e
            })?;

        // Rejections come back as 4xx/5xx with the usual JSON body, so the
        // status alone does not decide the outcome.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Backend responded with status {}", status);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse backend response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }
}
