//! Form controller that turns user input into one generation request.

use crate::backend::GenerationBackend;
use crate::config::DOWNLOAD_FILENAME;
use crate::download::DownloadService;
use crate::models::{FieldUpdate, FormState};
use crate::render::Renderer;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const EMPTY_TOPIC_STATUS: &str = "Please enter a topic before generating.";
pub const IN_PROGRESS_STATUS: &str = "Generating your presentation...";
pub const SUCCESS_STATUS: &str = "Presentation generated successfully! Downloading...";
pub const CONNECTION_ERROR_STATUS: &str =
    "Error connecting to the server. Make sure the backend is running.";
pub const UNKNOWN_ERROR: &str = "Unknown error";
const MISSING_DOWNLOAD_URL: &str = "server did not return a download URL";

/// Where the controller is in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// How a call to [`GenerationController::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Busy,
    /// The topic was blank; no request was sent.
    Invalid,
    /// The backend produced a file. `saved_to` is `None` when the download
    /// itself failed.
    Succeeded {
        download_url: String,
        saved_to: Option<PathBuf>,
    },
    /// The backend answered but reported a failure.
    Failed { message: String },
    /// The request could not complete or the reply could not be decoded.
    Errored,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Succeeded {
                saved_to: Some(_),
                ..
            }
        )
    }
}

/// Injectable collaborators used to construct a [`GenerationController`].
pub struct ControllerServices {
    pub backend: Box<dyn GenerationBackend>,
    pub downloader: Box<dyn DownloadService>,
    pub renderer: Box<dyn Renderer>,
}

/// Owns the form state and performs submissions against the backend.
pub struct GenerationController {
    state: FormState,
    backend: Box<dyn GenerationBackend>,
    downloader: Box<dyn DownloadService>,
    renderer: Box<dyn Renderer>,
}

impl GenerationController {
    pub fn new(services: ControllerServices) -> Self {
        Self::with_state(services, FormState::default())
    }

    pub fn with_state(services: ControllerServices, state: FormState) -> Self {
        let mut state = state;
        state.loading = false;

        Self {
            state,
            backend: services.backend,
            downloader: services.downloader,
            renderer: services.renderer,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.loading {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.state.loading
    }

    pub fn slide_count_visible(&self) -> bool {
        self.state.slide_count_visible()
    }

    /// Endpoint the next submission would be posted to.
    pub fn endpoint(&self) -> &'static str {
        self.state.mode.endpoint()
    }

    pub fn update_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Topic(topic) => self.state.topic = topic,
            FieldUpdate::Template(template) => self.state.template = template,
            FieldUpdate::SlideCount(count) => self.state.slide_count = count,
            // The stored slide count survives a trip through manual mode.
            FieldUpdate::Mode(mode) => self.state.mode = mode,
        }
        self.render();
    }

    /// Clears the topic and status. Template, mode and slide count stay.
    pub fn clear(&mut self) {
        self.state.topic.clear();
        self.state.status_message.clear();
        self.render();
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state.loading {
            warn!("Submission ignored: a request is already in flight");
            return SubmitOutcome::Busy;
        }

        if self.state.topic.trim().is_empty() {
            self.state.status_message = EMPTY_TOPIC_STATUS.to_string();
            self.render();
            return SubmitOutcome::Invalid;
        }

        let request = self.state.to_request();
        self.state.loading = true;
        self.state.status_message = IN_PROGRESS_STATUS.to_string();
        self.render();

        info!(
            "Submitting {:?} request to {} (template: {})",
            request.mode(),
            request.endpoint(),
            self.state.template
        );

        match self.backend.generate(&request).await {
            Ok(response) if response.success => match response.download_url {
                Some(download_url) if !download_url.trim().is_empty() => {
                    if let Some(slides) = response.slides_generated {
                        info!("Backend generated {} slides", slides);
                    }
                    self.finish(SUCCESS_STATUS.to_string());
                    let saved_to = self.trigger_download(&download_url).await;
                    SubmitOutcome::Succeeded {
                        download_url,
                        saved_to,
                    }
                }
                _ => {
                    warn!("Backend reported success without a download URL");
                    let message = failure_status(MISSING_DOWNLOAD_URL);
                    self.finish(message.clone());
                    SubmitOutcome::Failed { message }
                }
            },
            Ok(response) => {
                let reason = response.error.as_deref().unwrap_or(UNKNOWN_ERROR);
                warn!("Backend rejected the request: {}", reason);
                let message = failure_status(reason);
                self.finish(message.clone());
                SubmitOutcome::Failed { message }
            }
            Err(e) => {
                error!("Generation request failed: {}", e);
                self.finish(CONNECTION_ERROR_STATUS.to_string());
                SubmitOutcome::Errored
            }
        }
    }

    fn finish(&mut self, status: String) {
        self.state.loading = false;
        self.state.status_message = status;
        self.render();
    }

    async fn trigger_download(&self, download_url: &str) -> Option<PathBuf> {
        match self.downloader.download(download_url, DOWNLOAD_FILENAME).await {
            Ok(path) => {
                info!("Presentation saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!("Failed to download {}: {}", download_url, e);
                None
            }
        }
    }

    fn render(&self) {
        self.renderer.render(&self.state);
    }
}

fn failure_status(reason: &str) -> String {
    format!("Failed to generate presentation: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::download::MockDownloader;
    use crate::models::{GenerationRequest, GenerationResponse, Mode, SlideCount, Template};
    use crate::render::RecordingRenderer;
    use pretty_assertions::assert_eq;

    struct Harness {
        controller: GenerationController,
        backend: MockBackend,
        downloader: MockDownloader,
        renderer: RecordingRenderer,
    }

    fn harness(backend: MockBackend, downloader: MockDownloader) -> Harness {
        let renderer = RecordingRenderer::new();
        let controller = GenerationController::new(ControllerServices {
            backend: Box::new(backend.clone()),
            downloader: Box::new(downloader.clone()),
            renderer: Box::new(renderer.clone()),
        });

        Harness {
            controller,
            backend,
            downloader,
            renderer,
        }
    }

    fn default_harness() -> Harness {
        harness(MockBackend::new(), MockDownloader::new())
    }

    #[tokio::test]
    async fn test_blank_topic_never_calls_backend() {
        for topic in ["", "   ", "\n\t "] {
            let mut h = default_harness();
            h.controller.update_field(FieldUpdate::Topic(topic.to_string()));

            let outcome = h.controller.submit().await;

            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(h.backend.get_call_count(), 0);
            assert_eq!(h.controller.state().status_message, EMPTY_TOPIC_STATUS);
            assert!(!h.controller.state().loading);
            assert!(h.renderer.frames().iter().all(|f| !f.loading));
        }
    }

    #[tokio::test]
    async fn test_auto_submission_sends_selected_slide_count() {
        let mut h = default_harness();
        h.controller
            .update_field(FieldUpdate::Topic("AI in Healthcare".to_string()));
        h.controller.update_field(FieldUpdate::Template(Template::Modern));
        h.controller
            .update_field(FieldUpdate::SlideCount(SlideCount::new(6).unwrap()));

        assert_eq!(h.controller.endpoint(), "/generate-auto-ppt");
        h.controller.submit().await;

        assert_eq!(
            h.backend.get_requests(),
            vec![GenerationRequest::Auto {
                topic: "AI in Healthcare".to_string(),
                template: Template::Modern,
                slide_count: SlideCount::new(6).unwrap(),
            }]
        );
    }

    #[tokio::test]
    async fn test_manual_submission_sends_text_without_slide_count() {
        let mut h = default_harness();
        h.controller
            .update_field(FieldUpdate::Topic("Slide 1: Intro\n- Point".to_string()));
        h.controller
            .update_field(FieldUpdate::SlideCount(SlideCount::new(8).unwrap()));
        h.controller.update_field(FieldUpdate::Mode(Mode::Manual));

        assert_eq!(h.controller.endpoint(), "/generate-ppt");
        h.controller.submit().await;

        let requests = h.backend.get_requests();
        assert_eq!(requests.len(), 1);
        let json = serde_json::to_value(&requests[0]).unwrap();
        assert_eq!(json["text"], "Slide 1: Intro\n- Point");
        assert!(json.get("slide_count").is_none());
        assert!(json.get("topic").is_none());
    }

    #[tokio::test]
    async fn test_loading_only_between_start_and_terminal_status() {
        let mut h = default_harness();
        h.controller.update_field(FieldUpdate::Topic("Oceans".to_string()));

        h.controller.submit().await;

        let frames = h.renderer.frames();
        let loading: Vec<bool> = frames.iter().map(|f| f.loading).collect();
        // topic edit, submitting, terminal
        assert_eq!(loading, vec![false, true, false]);
        assert_eq!(frames[1].status_message, IN_PROGRESS_STATUS);
        assert_eq!(frames[2].status_message, SUCCESS_STATUS);
        assert_eq!(h.controller.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_success_triggers_single_download_with_fixed_name() {
        let backend =
            MockBackend::new().with_response(GenerationResponse::succeeded("/generated/x.pptx"));
        let mut h = harness(backend, MockDownloader::new());
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        let outcome = h.controller.submit().await;

        assert!(outcome.is_success());
        let calls = h.downloader.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "/generated/x.pptx");
        assert_eq!(calls[0].filename, "EDUSLIDE_Presentation.pptx");
    }

    #[tokio::test]
    async fn test_failure_without_error_reports_unknown_error() {
        let backend = MockBackend::new().with_response(GenerationResponse::default());
        let mut h = harness(backend, MockDownloader::new());
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        let outcome = h.controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert!(h.controller.state().status_message.contains("Unknown error"));
        assert!(!h.controller.state().loading);
        assert_eq!(h.downloader.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_uses_server_message() {
        let backend =
            MockBackend::new().with_response(GenerationResponse::failed("AI generation failed"));
        let mut h = harness(backend, MockDownloader::new());
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        h.controller.submit().await;

        assert_eq!(
            h.controller.state().status_message,
            "Failed to generate presentation: AI generation failed"
        );
    }

    #[tokio::test]
    async fn test_success_without_download_url_is_failure() {
        let backend = MockBackend::new().with_response(GenerationResponse {
            success: true,
            ..GenerationResponse::default()
        });
        let mut h = harness(backend, MockDownloader::new());
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        let outcome = h.controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert!(h
            .controller
            .state()
            .status_message
            .contains("did not return a download URL"));
        assert_eq!(h.downloader.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_with_blank_download_url_is_failure() {
        for blank in ["", "   "] {
            let backend = MockBackend::new().with_response(GenerationResponse {
                success: true,
                download_url: Some(blank.to_string()),
                ..GenerationResponse::default()
            });
            let mut h = harness(backend, MockDownloader::new());
            h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

            let outcome = h.controller.submit().await;

            assert_eq!(
                outcome,
                SubmitOutcome::Failed {
                    message: "Failed to generate presentation: server did not return a download URL"
                        .to_string()
                }
            );
            assert!(!h.controller.state().loading);
            assert_eq!(h.downloader.get_call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_transport_error_sets_connection_status() {
        let backend = MockBackend::new().with_transport_error("connection refused".to_string());
        let mut h = harness(backend, MockDownloader::new());
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        let outcome = h.controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Errored);
        assert_eq!(h.controller.state().status_message, CONNECTION_ERROR_STATUS);
        assert!(!h.controller.state().loading);
        assert!(h.controller.can_submit());
    }

    #[tokio::test]
    async fn test_download_failure_keeps_success_status() {
        let downloader = MockDownloader::new().with_failure("disk full".to_string());
        let mut h = harness(MockBackend::new(), downloader);
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));

        let outcome = h.controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Succeeded {
                download_url: "/generated/mock.pptx".to_string(),
                saved_to: None,
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(h.controller.state().status_message, SUCCESS_STATUS);
        assert_eq!(h.downloader.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let backend = MockBackend::new();
        let renderer = RecordingRenderer::new();
        let mut controller = GenerationController::new(ControllerServices {
            backend: Box::new(backend.clone()),
            downloader: Box::new(MockDownloader::new()),
            renderer: Box::new(renderer),
        });
        controller.update_field(FieldUpdate::Topic("Mars".to_string()));
        controller.state.loading = true;

        assert!(!controller.can_submit());
        assert_eq!(controller.phase(), Phase::Submitting);
        assert_eq!(controller.submit().await, SubmitOutcome::Busy);
        assert_eq!(backend.get_call_count(), 0);
    }

    #[test]
    fn test_mode_switch_hides_but_keeps_slide_count() {
        let mut h = default_harness();
        h.controller
            .update_field(FieldUpdate::SlideCount(SlideCount::new(9).unwrap()));

        h.controller.update_field(FieldUpdate::Mode(Mode::Manual));
        assert!(!h.controller.slide_count_visible());

        h.controller.update_field(FieldUpdate::Mode(Mode::Auto));
        assert!(h.controller.slide_count_visible());
        assert_eq!(h.controller.state().slide_count.get(), 9);
    }

    #[test]
    fn test_clear_resets_topic_and_status_only() {
        let mut h = default_harness();
        h.controller.update_field(FieldUpdate::Topic("Mars".to_string()));
        h.controller.update_field(FieldUpdate::Template(Template::Dark));
        h.controller.update_field(FieldUpdate::Mode(Mode::Manual));
        h.controller
            .update_field(FieldUpdate::SlideCount(SlideCount::new(4).unwrap()));
        h.controller.state.status_message = "something".to_string();

        h.controller.clear();

        let state = h.controller.state();
        assert_eq!(state.topic, "");
        assert_eq!(state.status_message, "");
        assert_eq!(state.template, Template::Dark);
        assert_eq!(state.mode, Mode::Manual);
        assert_eq!(state.slide_count.get(), 4);
        assert_eq!(h.renderer.last().unwrap(), *state);
    }

    #[test]
    fn test_with_state_starts_idle() {
        let state = FormState {
            topic: "Saved".to_string(),
            loading: true,
            ..FormState::default()
        };
        let controller = GenerationController::with_state(
            ControllerServices {
                backend: Box::new(MockBackend::new()),
                downloader: Box::new(MockDownloader::new()),
                renderer: Box::new(RecordingRenderer::new()),
            },
            state,
        );

        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.state().topic, "Saved");
    }
}
