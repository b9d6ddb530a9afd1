use app::App;
use clap::Parser;
use config::Config;
use emotion_classifier::impl_fake::EmotionClassifierFake;
use emotion_classifier::impl_tract_onnx::EmotionClassifierTractOnnx;
use emotion_classifier::interface::{DetectionPolicy, EmotionClassifier};
use emotion_classifier::models::model_config::ModelConfig;
use gui::Gui;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use report::EmotionReportPipeline;
use report_display::impl_console::ReportDisplayConsole;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod app;
mod config;
mod emotion;
mod emotion_classifier;
mod gui;
mod library;
mod render;
mod report;
mod report_display;
mod ui_config;

/// Facial emotion recognition: analyse a face image and report the predicted emotion.
#[derive(Parser, Debug)]
#[command(name = "fer-ai", version)]
struct Cli {
    /// Analyse this JPG/PNG and print the report instead of opening the window.
    image: Option<PathBuf>,

    /// ONNX emotion model (48x48 grayscale, 7 classes).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Use the random demo classifier even if a model is given.
    #[arg(long)]
    fake: bool,

    /// Fail instead of analysing the whole frame when no face is found.
    #[arg(long)]
    strict: bool,
}

fn build_classifier(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn EmotionClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
    match &config.model {
        Some(model_config) => Ok(Arc::new(EmotionClassifierTractOnnx::new(
            model_config.clone(),
            logger,
        )?)),
        None => {
            logger.info("no model configured, using random demo classifier")?;
            Ok(Arc::new(EmotionClassifierFake::random(logger)))
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::default();
    if cli.strict {
        config.detection_policy = DetectionPolicy::Strict;
    }
    if !cli.fake {
        config.model = cli
            .model
            .as_ref()
            .map(|path| ModelConfig::fer2013(&path.to_string_lossy()));
    }

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let classifier = build_classifier(&config, logger.clone()).map_err(|e| e.to_string())?;

    let pipeline = EmotionReportPipeline::new(classifier, config.detection_policy);

    match cli.image {
        Some(path) => {
            let display = ReportDisplayConsole::stdout(&config.ui.distribution_heading);
            let mut app = App::new(config, logger, pipeline, Box::new(display));
            match app.analyze_file(&path) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        None => {
            Gui::new(config.ui, logger, pipeline).run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
