use crate::emotion::{Emotion, EmotionScores};
use crate::emotion_classifier::detection::locate_face;
use crate::emotion_classifier::interface::{DetectionPolicy, EmotionClassifier, FaceAnalysis};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Same scores for every image.
    Fixed(EmotionScores),
    /// A fresh random distribution over the seven emotions on every call.
    Random,
    /// Hand back these records untouched.
    Records(Vec<FaceAnalysis>),
    Fail(String),
}

pub struct EmotionClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    behavior: FakeBehavior,
    calls: AtomicUsize,
}

impl EmotionClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, behavior: FakeBehavior) -> Self {
        Self {
            logger: logger.with_namespace("classifier_fake"),
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn random(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::new(logger, FakeBehavior::Random)
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_scores() -> Result<EmotionScores, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.0f32, 1.0)?;

        let weights: Vec<f32> = Emotion::ALL
            .iter()
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        let total: f32 = weights.iter().sum::<f32>().max(f32::EPSILON);

        Ok(Emotion::ALL
            .iter()
            .zip(weights)
            .map(|(emotion, w)| (emotion.label(), w / total * 100.0))
            .collect())
    }

    fn record(
        image: &RgbImage,
        policy: DetectionPolicy,
        scores: EmotionScores,
    ) -> Result<FaceAnalysis, Box<dyn std::error::Error + Send + Sync>> {
        let region = locate_face(image, policy)?;
        let dominant_emotion = scores
            .dominant()
            .map(|s| s.label.clone())
            .unwrap_or_default();

        Ok(FaceAnalysis {
            emotion: scores,
            dominant_emotion,
            region,
        })
    }
}

impl EmotionClassifier for EmotionClassifierFake {
    fn classify(
        &self,
        image: &RgbImage,
        policy: DetectionPolicy,
    ) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.logger.info(&format!(
            "classifying {}x{} image ({:?})",
            image.width(),
            image.height(),
            policy
        ))?;

        match &self.behavior {
            FakeBehavior::Fixed(scores) => Ok(vec![Self::record(image, policy, scores.clone())?]),
            FakeBehavior::Random => Ok(vec![Self::record(image, policy, Self::random_scores()?)?]),
            FakeBehavior::Records(records) => Ok(records.clone()),
            FakeBehavior::Fail(message) => Err(message.clone().into()),
        }
    }
}
