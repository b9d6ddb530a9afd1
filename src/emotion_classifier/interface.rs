use crate::emotion::EmotionScores;
use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionPolicy {
    /// Fail when no face can be located.
    Strict,
    /// Analyse the whole frame when no face can be located.
    #[default]
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One analysed face as returned by a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnalysis {
    pub emotion: EmotionScores,
    #[allow(dead_code)]
    pub dominant_emotion: String,
    pub region: FaceRegion,
}

pub trait EmotionClassifier: Send + Sync {
    fn classify(
        &self,
        image: &RgbImage,
        policy: DetectionPolicy,
    ) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error + Send + Sync>>;
}
