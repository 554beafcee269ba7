//! Data models and structures
//!
//! Defines the form state held by the controller and the request/response
//! payloads exchanged with the generation backend.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const AUTO_ENDPOINT: &str = "/generate-auto-ppt";
pub const MANUAL_ENDPOINT: &str = "/generate-ppt";

/// Visual theme applied by the backend. Opaque to the client.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Minimal,
    Corporate,
    Creative,
    Dark,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Modern,
        Template::Minimal,
        Template::Corporate,
        Template::Creative,
        Template::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Minimal => "minimal",
            Template::Corporate => "corporate",
            Template::Creative => "creative",
            Template::Dark => "dark",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the backend expands a topic into slides or takes the text as the
/// literal outline.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

impl Mode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mode::Auto => AUTO_ENDPOINT,
            Mode::Manual => MANUAL_ENDPOINT,
        }
    }
}

/// Number of slides requested in automatic mode, always within 4..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlideCount(u8);

impl SlideCount {
    pub const MIN: u8 = 4;
    pub const MAX: u8 = 10;

    pub fn new(count: u8) -> crate::Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(Error::SlideCount(count))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Every selectable value, in ascending order.
    pub fn choices() -> impl Iterator<Item = SlideCount> {
        (Self::MIN..=Self::MAX).map(SlideCount)
    }
}

impl Default for SlideCount {
    fn default() -> Self {
        Self(6)
    }
}

impl TryFrom<u8> for SlideCount {
    type Error = Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<SlideCount> for u8 {
    fn from(count: SlideCount) -> u8 {
        count.0
    }
}

impl fmt::Display for SlideCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the form holds for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub topic: String,
    pub template: Template,
    pub slide_count: SlideCount,
    pub mode: Mode,
    pub loading: bool,
    pub status_message: String,
}

impl FormState {
    pub fn slide_count_visible(&self) -> bool {
        self.mode == Mode::Auto
    }

    /// Builds the payload for the current mode. The slide count only travels
    /// with automatic requests.
    pub fn to_request(&self) -> GenerationRequest {
        match self.mode {
            Mode::Auto => GenerationRequest::Auto {
                topic: self.topic.clone(),
                template: self.template,
                slide_count: self.slide_count,
            },
            Mode::Manual => GenerationRequest::Manual {
                text: self.topic.clone(),
                template: self.template,
            },
        }
    }
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Topic(String),
    Template(Template),
    SlideCount(SlideCount),
    Mode(Mode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationRequest {
    Auto {
        topic: String,
        template: Template,
        slide_count: SlideCount,
    },
    Manual {
        text: String,
        template: Template,
    },
}

impl GenerationRequest {
    pub fn endpoint(&self) -> &'static str {
        self.mode().endpoint()
    }

    pub fn mode(&self) -> Mode {
        match self {
            GenerationRequest::Auto { .. } => Mode::Auto,
            GenerationRequest::Manual { .. } => Mode::Manual,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides_generated: Option<u32>,
}

impl GenerationResponse {
    pub fn succeeded(download_url: impl Into<String>) -> Self {
        let download_url = download_url.into();
        Self {
            success: true,
            file_path: Some(download_url.clone()),
            download_url: Some(download_url),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
