use crate::emotion::EmotionScores;
use crate::emotion_classifier::interface::{DetectionPolicy, EmotionClassifier};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// The one failure the pipeline reports. The cause is kept for logs only.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("analysis failed: {cause}")]
pub struct AnalysisError {
    cause: String,
}

impl AnalysisError {
    pub fn new(cause: impl ToString) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReport {
    pub scores: EmotionScores,
    pub dominant: String,
    /// Duration of the classifier call alone.
    pub elapsed_time: Duration,
}

impl EmotionReport {
    pub fn confidence(&self) -> f32 {
        self.scores.get(&self.dominant).unwrap_or(0.0)
    }
}

pub struct EmotionReportPipeline {
    classifier: Arc<dyn EmotionClassifier + Send + Sync>,
    policy: DetectionPolicy,
}

impl EmotionReportPipeline {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier + Send + Sync>,
        policy: DetectionPolicy,
    ) -> Self {
        Self { classifier, policy }
    }

    pub fn analyze(&self, image: &RgbImage) -> Result<EmotionReport, AnalysisError> {
        let start_time = Instant::now();
        let result = self.classifier.classify(image, self.policy);
        let elapsed_time = start_time.elapsed();

        let records = result.map_err(AnalysisError::new)?;
        let first = records
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::new("classifier returned no analysis records"))?;

        let dominant = first
            .emotion
            .dominant()
            .map(|s| s.label.clone())
            .ok_or_else(|| AnalysisError::new("classifier returned no emotion scores"))?;

        Ok(EmotionReport {
            scores: first.emotion,
            dominant,
            elapsed_time,
        })
    }
}

pub fn is_supported_upload(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Decodes an uploaded JPEG or PNG and normalizes it to 3-channel RGB.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, AnalysisError> {
    let image = image::load_from_memory(bytes).map_err(AnalysisError::new)?;
    Ok(image.to_rgb8())
}

pub fn load_image(path: &Path) -> Result<RgbImage, AnalysisError> {
    if !is_supported_upload(path) {
        return Err(AnalysisError::new(format!(
            "unsupported file type: {}",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).map_err(AnalysisError::new)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion_classifier::impl_fake::{EmotionClassifierFake, FakeBehavior};
    use crate::emotion_classifier::interface::{FaceAnalysis, FaceRegion};
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::library::logger::interface::Logger;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    fn happy_scores() -> EmotionScores {
        [
            ("angry", 5.0),
            ("disgust", 1.0),
            ("fear", 2.0),
            ("happy", 80.0),
            ("sad", 3.0),
            ("surprise", 4.0),
            ("neutral", 5.0),
        ]
        .into_iter()
        .collect()
    }

    fn face_image() -> RgbImage {
        ImageBuffer::from_fn(24, 24, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 120]))
    }

    fn pipeline(behavior: FakeBehavior) -> (Arc<EmotionClassifierFake>, EmotionReportPipeline) {
        let classifier = Arc::new(EmotionClassifierFake::new(logger(), behavior));
        let pipeline = EmotionReportPipeline::new(classifier.clone(), DetectionPolicy::BestEffort);
        (classifier, pipeline)
    }

    #[test]
    fn test_analyze_happy_face() {
        let (_, pipeline) = pipeline(FakeBehavior::Fixed(happy_scores()));

        let report = pipeline.analyze(&face_image()).unwrap();

        assert_eq!(report.dominant, "happy");
        assert_eq!(format!("{:.2}", report.confidence()), "80.00");
        assert_eq!(report.scores.sorted_descending()[0].label, "happy");
        assert_eq!(report.scores, happy_scores());
    }

    #[test]
    fn test_dominant_comes_from_scores_not_classifier_label() {
        let record = FaceAnalysis {
            emotion: happy_scores(),
            dominant_emotion: "sad".to_string(),
            region: FaceRegion {
                x: 0,
                y: 0,
                width: 24,
                height: 24,
            },
        };
        let (_, pipeline) = pipeline(FakeBehavior::Records(vec![record]));

        assert_eq!(pipeline.analyze(&face_image()).unwrap().dominant, "happy");
    }

    #[test]
    fn test_only_first_record_is_used() {
        let sad: EmotionScores = [("sad", 90.0), ("happy", 10.0)].into_iter().collect();
        let region = FaceRegion {
            x: 0,
            y: 0,
            width: 24,
            height: 24,
        };
        let records = vec![
            FaceAnalysis {
                emotion: sad,
                dominant_emotion: "sad".to_string(),
                region,
            },
            FaceAnalysis {
                emotion: happy_scores(),
                dominant_emotion: "happy".to_string(),
                region,
            },
        ];
        let (_, pipeline) = pipeline(FakeBehavior::Records(records));

        assert_eq!(pipeline.analyze(&face_image()).unwrap().dominant, "sad");
    }

    #[test]
    fn test_classifier_failure_is_single_error_without_retry() {
        let (classifier, pipeline) = pipeline(FakeBehavior::Fail("model not loaded".into()));

        let err = pipeline.analyze(&face_image()).unwrap_err();

        assert_eq!(err, AnalysisError::new("model not loaded"));
        assert_eq!(err.to_string(), "analysis failed: model not loaded");
        assert_eq!(classifier.calls(), 1);
    }

    #[test]
    fn test_empty_response_is_an_error() {
        let (_, pipeline) = pipeline(FakeBehavior::Records(vec![]));
        assert!(pipeline.analyze(&face_image()).is_err());
    }

    #[test]
    fn test_record_without_scores_is_an_error() {
        let record = FaceAnalysis {
            emotion: EmotionScores::new(),
            dominant_emotion: String::new(),
            region: FaceRegion {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            },
        };
        let (_, pipeline) = pipeline(FakeBehavior::Records(vec![record]));
        assert!(pipeline.analyze(&face_image()).is_err());
    }

    #[test]
    fn test_analyze_is_idempotent_apart_from_timing() {
        let (_, pipeline) = pipeline(FakeBehavior::Fixed(happy_scores()));
        let image = face_image();

        let first = pipeline.analyze(&image).unwrap();
        let second = pipeline.analyze(&image).unwrap();

        assert_eq!(first.scores, second.scores);
        assert_eq!(first.dominant, second.dominant);
    }

    #[test]
    fn test_featureless_image_still_reports_under_best_effort() {
        let (_, pipeline) = pipeline(FakeBehavior::Fixed(happy_scores()));
        let blank = ImageBuffer::from_pixel(24, 24, Rgb([200, 200, 200]));

        let report = pipeline.analyze(&blank).unwrap();
        assert_eq!(report.scores.len(), 7);
    }

    #[test]
    fn test_featureless_image_fails_under_strict() {
        let classifier = Arc::new(EmotionClassifierFake::new(
            logger(),
            FakeBehavior::Fixed(happy_scores()),
        ));
        let pipeline = EmotionReportPipeline::new(classifier, DetectionPolicy::Strict);
        let blank = ImageBuffer::from_pixel(24, 24, Rgb([200, 200, 200]));

        assert!(pipeline.analyze(&blank).is_err());
    }

    struct SlowClassifier(Duration);

    impl EmotionClassifier for SlowClassifier {
        fn classify(
            &self,
            _image: &RgbImage,
            _policy: DetectionPolicy,
        ) -> Result<Vec<FaceAnalysis>, Box<dyn std::error::Error + Send + Sync>> {
            std::thread::sleep(self.0);
            Ok(vec![FaceAnalysis {
                emotion: [("neutral", 100.0)].into_iter().collect(),
                dominant_emotion: "neutral".to_string(),
                region: FaceRegion {
                    x: 0,
                    y: 0,
                    width: 1,
                    height: 1,
                },
            }])
        }
    }

    #[test]
    fn test_elapsed_time_covers_classifier_call() {
        let delay = Duration::from_millis(20);
        let pipeline =
            EmotionReportPipeline::new(Arc::new(SlowClassifier(delay)), DetectionPolicy::default());

        let report = pipeline.analyze(&face_image()).unwrap();
        assert!(report.elapsed_time >= delay);
    }

    #[test]
    fn test_supported_uploads() {
        assert!(is_supported_upload(Path::new("face.jpg")));
        assert!(is_supported_upload(Path::new("face.JPEG")));
        assert!(is_supported_upload(Path::new("dir/face.png")));
        assert!(!is_supported_upload(Path::new("face.gif")));
        assert!(!is_supported_upload(Path::new("face")));
    }

    #[test]
    fn test_decode_png_to_rgb() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 128]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();

        let rgb = decode_image(&bytes).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_decode_garbage_is_analysis_error() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        face_image().save(&path).unwrap();

        assert_eq!(load_image(&path).unwrap(), face_image());
        assert!(load_image(&dir.path().join("face.bmp")).is_err());
    }
}
