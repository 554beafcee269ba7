use super::DownloadService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

pub struct HttpDownloader {
    client: Client,
    base_url: Url,
    download_dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(base_url: &str, download_dir: &Path) -> Result<Self> {
        Self::new_with_client(base_url, download_dir, Client::new())
    }

    pub fn new_with_client(base_url: &str, download_dir: &Path, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            download_dir: download_dir.to_path_buf(),
        })
    }

    /// Relative URLs such as `/generated/x.pptx` resolve against the backend;
    /// absolute ones pass through untouched.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.base_url.join(url)?)
    }

    fn save_sync(dir: PathBuf, filename: String, data: Vec<u8>) -> Result<PathBuf> {
        std::fs::create_dir_all(&dir)?;
        let target = dir.join(&filename);
        if target.exists() {
            tracing::warn!("Overwriting existing file {}", target.display());
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&data)?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}

#[async_trait]
impl DownloadService for HttpDownloader {
    async fn download(&self, url: &str, filename: &str) -> Result<PathBuf> {
        let url = self.resolve(url)?;
        tracing::debug!("Downloading presentation from {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::error!("Failed to fetch {}: {}", url, e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Download of {} failed with status {}", url, status);
            return Err(Error::Download(format!(
                "{} responded with status {}",
                url, status
            )));
        }

        let data = response.bytes().await?.to_vec();
        let size = data.len();

        let path = tokio::task::spawn_blocking({
            let dir = self.download_dir.clone();
            let filename = filename.to_string();
            move || Self::save_sync(dir, filename, data)
        })
        .await
        .map_err(|e| Error::Generic(format!("Download write task join error: {}", e)))??;

        tracing::info!("Saved {} bytes to {}", size, path.display());
        Ok(path)
    }
}
