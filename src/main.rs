use anyhow::{Context, Result};
use clap::Parser;
use eduslide::backend::HttpBackend;
use eduslide::config::Config;
use eduslide::controller::{ControllerServices, GenerationController, SubmitOutcome};
use eduslide::download::HttpDownloader;
use eduslide::models::{FieldUpdate, Mode, SlideCount, Template};
use eduslide::render::LogRenderer;
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "eduslide")]
#[command(about = "Generate a PowerPoint presentation from a topic or outline")]
struct CliArgs {
    /// Topic (auto mode) or slide outline (manual mode).
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    topic: Option<String>,

    /// Read the topic or outline from a file, or `-` for stdin.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Template::Modern)]
    template: Template,

    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Slides to generate in auto mode (4-10).
    #[arg(long, default_value = "6", value_parser = parse_slide_count)]
    slides: SlideCount,

    /// Directory the presentation is saved into.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Backend address, for pointing at a non-default development server.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn parse_slide_count(input: &str) -> std::result::Result<SlideCount, String> {
    let count: u8 = input
        .parse()
        .map_err(|_| format!("Invalid slide count '{}'. Expected a number 4-10", input))?;
    SlideCount::new(count).map_err(|e| e.to_string())
}

fn read_topic(args: &CliArgs) -> Result<String> {
    match (&args.topic, &args.input) {
        (Some(topic), _) => Ok(topic.clone()),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read topic from stdin")?;
            Ok(text)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read topic from {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eduslide=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = args.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(dir) = args.output_dir.clone() {
        config = config.with_download_dir(dir);
    }

    let http_client = reqwest::Client::new();
    let backend = HttpBackend::new_with_client(config.base_url.clone(), http_client.clone());
    info!("Using backend at {}", backend.base_url());

    let services = ControllerServices {
        backend: Box::new(backend),
        downloader: Box::new(HttpDownloader::new_with_client(
            &config.base_url,
            &config.download_dir,
            http_client,
        )?),
        renderer: Box::new(LogRenderer::new()),
    };

    let mut controller = GenerationController::new(services);
    controller.update_field(FieldUpdate::Template(args.template));
    controller.update_field(FieldUpdate::SlideCount(args.slides));
    controller.update_field(FieldUpdate::Mode(args.mode));
    controller.update_field(FieldUpdate::Topic(read_topic(&args)?));

    match controller.submit().await {
        SubmitOutcome::Succeeded {
            saved_to: Some(path),
            ..
        } => {
            println!("{}", path.display());
            Ok(())
        }
        SubmitOutcome::Succeeded { download_url, .. } => {
            error!("Presentation was generated but could not be saved from {}", download_url);
            std::process::exit(1);
        }
        _ => {
            error!("{}", controller.state().status_message);
            std::process::exit(1);
        }
    }
}
