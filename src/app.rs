use crate::config::Config;
use crate::library::logger::interface::Logger;
use crate::render::ReportLayout;
use crate::report::{load_image, AnalysisError, EmotionReport, EmotionReportPipeline};
use crate::report_display::interface::ReportDisplay;
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;

/// Runs the pipeline on one decoded image and logs the outcome.
pub fn run_analysis(
    pipeline: &EmotionReportPipeline,
    logger: &Arc<dyn Logger + Send + Sync>,
    image: &RgbImage,
) -> Result<EmotionReport, AnalysisError> {
    match pipeline.analyze(image) {
        Ok(report) => {
            let _ = logger.info(&format!(
                "dominant={} confidence={:.2} elapsed={:.3}s",
                report.dominant,
                report.confidence(),
                report.elapsed_time.as_secs_f64()
            ));
            Ok(report)
        }
        Err(e) => {
            let _ = logger.error(&e.to_string());
            Err(e)
        }
    }
}

/// Headless front end: analyses files and shows the outcome on a [`ReportDisplay`].
pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    pipeline: EmotionReportPipeline,
    display: Box<dyn ReportDisplay>,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        pipeline: EmotionReportPipeline,
        display: Box<dyn ReportDisplay>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("app"),
            pipeline,
            display,
        }
    }

    pub fn analyze_file(&mut self, path: &Path) -> Result<EmotionReport, AnalysisError> {
        let _ = self
            .logger
            .info(&format!("{} {}", self.config.ui.analyzing_text, path.display()));

        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("{}: {}", path.display(), e.cause()));
                self.show(Err(&e));
                return Err(e);
            }
        };

        let outcome = run_analysis(&self.pipeline, &self.logger, &image);
        self.show(outcome.as_ref());
        outcome
    }

    fn show(&mut self, outcome: Result<&EmotionReport, &AnalysisError>) {
        let shown = match outcome {
            Ok(report) => self.display.show_report(&ReportLayout::from_report(report)),
            Err(_) => self.display.show_error(&self.config.ui.error_message),
        };

        if let Err(e) = shown {
            let _ = self.logger.error(&format!("display failed: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    mod app_test;
    mod fixture;
}
