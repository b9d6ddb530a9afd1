use crate::emotion::EmotionScores;
use crate::emotion_classifier::detection::locate_face;
use crate::emotion_classifier::interface::{DetectionPolicy, EmotionClassifier, FaceAnalysis};
use crate::emotion_classifier::models::model_config::{softmax, ModelConfig, ModelOutput};
use crate::emotion_classifier::tract::tensor::resize_image_to_tensor;
use crate::library::logger::interface::Logger;
use image::{imageops, RgbImage};
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct EmotionClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl EmotionClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("classifier_onnx");
        let (height, width) = config.input_shape;

        logger.info(&format!("loading model {}", config.onnx_model_path))?;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(
                0,
                f32::fact([1, config.channels(), height as usize, width as usize]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            model,
            config,
            logger,
        })
    }
}

/// Maps raw model output onto percentage scores in label order.
pub fn scores_from_output(
    config: &ModelConfig,
    output: &[f32],
) -> Result<EmotionScores, Box<dyn std::error::Error + Send + Sync>> {
    if output.len() != config.labels.len() {
        return Err(format!(
            "model produced {} values for {} labels",
            output.len(),
            config.labels.len()
        )
        .into());
    }

    let probabilities = match config.output {
        ModelOutput::Logits => softmax(output),
        ModelOutput::Probabilities => output.to_vec(),
    };

    Ok(config
        .labels
        .iter()
        .zip(probabilities)
        .map(|(label, p)| (label.as_str(), p * 100.0))
        .collect())
}

impl EmotionClassifier for EmotionClassifierTractOnnx {
    fn classify(
        &self,
        image: &RgbImage,
        policy: DetectionPolicy,
    ) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error + Send + Sync>> {
        let region = locate_face(image, policy)?;
        let face = imageops::crop_imm(image, region.x, region.y, region.width, region.height)
            .to_image();

        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(&face, width, height, self.config.grayscale)?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output: Vec<f32> = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?
            .iter()
            .copied()
            .collect();

        let emotion = scores_from_output(&self.config, &output)?;
        let dominant_emotion = emotion
            .dominant()
            .map(|s| s.label.clone())
            .ok_or("model produced no scores")?;

        self.logger
            .info(&format!("dominant emotion: {}", dominant_emotion))?;

        Ok(vec![FaceAnalysis {
            emotion,
            dominant_emotion,
            region,
        }])
    }
}
