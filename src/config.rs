use crate::emotion_classifier::interface::DetectionPolicy;
use crate::emotion_classifier::models::model_config::ModelConfig;
use crate::ui_config::UiConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub detection_policy: DetectionPolicy,
    /// Without a model the random fake classifier is used.
    pub model: Option<ModelConfig>,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: local_offset(),
            detection_policy: DetectionPolicy::BestEffort,
            model: None,
            ui: UiConfig::default(),
        }
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
