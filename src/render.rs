use crate::emotion::display_glyph;
use crate::report::EmotionReport;

pub const FAILURE_MESSAGE: &str = "⚠️ Face detection failed. Ensure the face is clear.";

#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub glyph: &'static str,
    pub label: String,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub name: String,
    pub score: f32,
    /// Bar fill in [0, 1].
    pub fraction: f32,
}

/// Everything a display needs to draw one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub headline: Headline,
    pub rows: Vec<DistributionRow>,
    pub elapsed: String,
}

impl ReportLayout {
    pub fn from_report(report: &EmotionReport) -> Self {
        let headline = Headline {
            glyph: display_glyph(&report.dominant),
            label: report.dominant.to_uppercase(),
            confidence: format!("Confidence: {:.2}%", report.confidence()),
        };

        let rows = report
            .scores
            .sorted_descending()
            .into_iter()
            .map(|s| DistributionRow {
                name: capitalize(&s.label),
                score: s.confidence,
                fraction: (s.confidence / 100.0).clamp(0.0, 1.0),
            })
            .collect();

        Self {
            headline,
            rows,
            elapsed: format!("Analysis Time: {:.3}s", report.elapsed_time.as_secs_f64()),
        }
    }
}

pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Fixed-width text bar, e.g. `[#####-----]`.
pub fn text_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
