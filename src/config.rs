//! Client configuration

use std::path::PathBuf;

/// Backend address used by the form. Local development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Name given to every downloaded presentation.
pub const DOWNLOAD_FILENAME: &str = "EDUSLIDE_Presentation.pptx";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads `.env` if present and reads the download directory from
    /// `EDUSLIDE_DOWNLOAD_DIR`. The backend address is not read from the
    /// environment.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let download_dir = match std::env::var("EDUSLIDE_DOWNLOAD_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            Ok(_) => {
                return Err(crate::Error::Config(
                    "EDUSLIDE_DOWNLOAD_DIR is set but empty".to_string(),
                ))
            }
            Err(_) => PathBuf::from("."),
        };

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            download_dir,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_download_dir(mut self, download_dir: PathBuf) -> Self {
        self.download_dir = download_dir;
        self
    }
}
