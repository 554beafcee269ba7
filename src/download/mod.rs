//! Presentation download
//!
//! Fetches the generated file from the URL the backend hands back and saves
//! it under a fixed name.

pub mod client;
pub mod mock;

pub use client::HttpDownloader;
pub use mock::MockDownloader;

use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Downloads `url` and stores it as `filename`, returning where it landed.
    async fn download(&self, url: &str, filename: &str) -> Result<PathBuf>;
}
