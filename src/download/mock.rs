use super::DownloadService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A recorded download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCall {
    pub url: String,
    pub filename: String,
}

#[derive(Clone)]
pub struct MockDownloader {
    calls: Arc<Mutex<Vec<DownloadCall>>>,
    base_path: String,
    failure: Option<String>,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            base_path: "/tmp/mock_downloads".to_string(),
            failure: None,
        }
    }

    pub fn with_base_path(mut self, base_path: String) -> Self {
        self.base_path = base_path;
        self
    }

    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<DownloadCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DownloadService for MockDownloader {
    async fn download(&self, url: &str, filename: &str) -> Result<PathBuf> {
        self.calls.lock().unwrap().push(DownloadCall {
            url: url.to_string(),
            filename: filename.to_string(),
        });

        match &self.failure {
            Some(message) => Err(Error::Download(message.clone())),
            None => Ok(PathBuf::from(&self.base_path).join(filename)),
        }
    }
}
