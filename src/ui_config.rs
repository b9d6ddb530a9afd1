use egui::Color32;

/// Page content and theme, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub page_title: String,
    pub page_icon: String,
    pub window_size: [f32; 2],
    pub title: String,
    pub subtitle: String,
    pub upload_prompt: String,
    pub analyzing_text: String,
    pub image_caption: String,
    pub distribution_heading: String,
    pub unsupported_upload: String,
    pub error_message: String,
    pub accent: Color32,
    pub card_fill: Color32,
    pub muted_text: Color32,
    pub warning_text: Color32,
    pub sidebar_header: String,
    /// (field, value) pairs shown in the sidebar info box.
    pub sidebar_info: Vec<(String, String)>,
    pub sidebar_warnings: Vec<String>,
    pub explainer_title: String,
    pub explainer_points: Vec<(String, String)>,
}

impl UiConfig {
    pub fn window_title(&self) -> String {
        format!("{} {}", self.page_icon, self.page_title)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: "FER AI | Emotion Detector".to_string(),
            page_icon: "🎭".to_string(),
            window_size: [720.0, 900.0],
            title: "🎭 FER AI".to_string(),
            subtitle: "Advanced Facial Emotion Recognition System".to_string(),
            upload_prompt: "📤 Upload a face image to decode emotions".to_string(),
            analyzing_text: "🧠 Analyzing facial micro-expressions...".to_string(),
            image_caption: "Uploaded Subject".to_string(),
            distribution_heading: "📊 Emotion Probability Distribution".to_string(),
            unsupported_upload: "Only JPG, JPEG and PNG images are supported.".to_string(),
            error_message: crate::render::FAILURE_MESSAGE.to_string(),
            accent: Color32::from_rgb(59, 130, 246),
            card_fill: Color32::from_rgba_unmultiplied(30, 41, 59, 242),
            muted_text: Color32::from_rgb(148, 163, 184),
            warning_text: Color32::from_rgb(250, 204, 21),
            sidebar_header: "📌 Project Details".to_string(),
            sidebar_info: vec![
                ("Backend".to_string(), "tract ONNX runtime".to_string()),
                ("Frontend".to_string(), "egui".to_string()),
                (
                    "Task".to_string(),
                    "Multiclass Emotion Classification".to_string(),
                ),
            ],
            sidebar_warnings: vec![
                "⚠️ Ensure the subject is facing the camera directly for best accuracy."
                    .to_string(),
                "⚠️ Results depend on image clarity and lighting.".to_string(),
            ],
            explainer_title: "🔍 How the FER Model Works".to_string(),
            explainer_points: vec![
                (
                    "Face Region".to_string(),
                    "The frame is checked for usable facial detail, then scaled to the model's input size."
                        .to_string(),
                ),
                (
                    "Emotion Head".to_string(),
                    "A pre-trained convolutional network classifies the geometry of lips, eyes, and eyebrows into 7 key emotions."
                        .to_string(),
                ),
                (
                    "Micro-expressions".to_string(),
                    "Subtle variations in facial muscles shift the probability score of each emotion."
                        .to_string(),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title_carries_page_icon() {
        let ui = UiConfig::default();
        assert_eq!(ui.window_title(), "🎭 FER AI | Emotion Detector");
    }

    #[test]
    fn test_window_title_follows_custom_icon() {
        let ui = UiConfig {
            page_icon: "😐".to_string(),
            page_title: "Mood".to_string(),
            ..UiConfig::default()
        };
        assert_eq!(ui.window_title(), "😐 Mood");
    }
}
