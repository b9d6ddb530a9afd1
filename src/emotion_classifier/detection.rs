use crate::emotion_classifier::interface::{DetectionPolicy, FaceRegion};
use image::RgbImage;
use std::error::Error;

/// Frames whose luminance variance falls below this carry no facial features.
const MIN_LUMINANCE_VARIANCE: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("face could not be detected")]
    NoFaceDetected,
}

pub fn luminance(pixel: &image::Rgb<u8>) -> f64 {
    0.299 * pixel[0] as f64 + 0.587 * pixel[1] as f64 + 0.114 * pixel[2] as f64
}

pub fn luminance_variance(image: &RgbImage) -> f64 {
    let count = (image.width() as f64) * (image.height() as f64);
    if count == 0.0 {
        return 0.0;
    }

    let (sum, sum_sq) = image.pixels().fold((0.0, 0.0), |(sum, sum_sq), p| {
        let l = luminance(p);
        (sum + l, sum_sq + l * l)
    });

    let mean = sum / count;
    (sum_sq / count - mean * mean).max(0.0)
}

/// Locates the face to analyse.
///
/// There is no landmark detector: the face region is always the full frame,
/// and a featureless frame is reported as "no face". Under
/// [`DetectionPolicy::BestEffort`] that case still yields the full frame.
pub fn locate_face(
    image: &RgbImage,
    policy: DetectionPolicy,
) -> Result<FaceRegion, Box<dyn Error + Send + Sync>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Box::new(DetectionError::EmptyImage));
    }

    let full_frame = FaceRegion {
        x: 0,
        y: 0,
        width: image.width(),
        height: image.height(),
    };

    if luminance_variance(image) < MIN_LUMINANCE_VARIANCE && policy == DetectionPolicy::Strict {
        return Err(Box::new(DetectionError::NoFaceDetected));
    }

    Ok(full_frame)
}
