use crate::emotion::Emotion;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOutput {
    /// Raw scores, softmax is applied before reporting.
    Logits,
    Probabilities,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub grayscale: bool,
    /// Label for each output index.
    pub labels: Vec<String>,
    pub output: ModelOutput,
}

impl ModelConfig {
    /// 48x48 grayscale FER-2013 network with the seven canonical classes.
    pub fn fer2013(onnx_model_path: &str) -> Self {
        Self {
            onnx_model_path: onnx_model_path.to_string(),
            input_shape: (48, 48),
            grayscale: true,
            labels: Emotion::ALL.iter().map(|e| e.label().to_string()).collect(),
            output: ModelOutput::Logits,
        }
    }

    pub fn channels(&self) -> usize {
        if self.grayscale {
            1
        } else {
            3
        }
    }
}

pub fn softmax(values: &[f32]) -> Vec<f32> {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = values.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return vec![0.0; values.len()];
    }
    exps.iter().map(|e| e / total).collect()
}
