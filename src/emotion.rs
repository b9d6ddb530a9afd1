use std::fmt;

pub const FALLBACK_GLYPH: &str = "😶";

/// The seven emotion classes the classifiers report, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Emotion::Angry => "😠",
            Emotion::Disgust => "🤢",
            Emotion::Fear => "😨",
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Surprise => "😲",
            Emotion::Neutral => "😐",
        }
    }

    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.label() == label)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Glyph shown next to a label. Labels outside the known set get [`FALLBACK_GLYPH`].
pub fn display_glyph(label: &str) -> &'static str {
    Emotion::from_label(label)
        .map(|e| e.glyph())
        .unwrap_or(FALLBACK_GLYPH)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScore {
    pub label: String,
    pub confidence: f32,
}

/// Label to confidence (0..=100) in the order the classifier produced them.
///
/// Values are taken as given; nothing checks that they sum to 100.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmotionScores {
    scores: Vec<EmotionScore>,
}

impl EmotionScores {
    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Sets the confidence for `label`, keeping the position of an existing entry.
    pub fn insert(&mut self, label: &str, confidence: f32) {
        match self.scores.iter_mut().find(|s| s.label == label) {
            Some(existing) => existing.confidence = confidence,
            None => self.scores.push(EmotionScore {
                label: label.to_string(),
                confidence,
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<f32> {
        self.scores
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.confidence)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &EmotionScore> {
        self.scores.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Highest-scoring entry. Ties resolve to the first one seen.
    pub fn dominant(&self) -> Option<&EmotionScore> {
        let mut best: Option<&EmotionScore> = None;
        for score in &self.scores {
            match best {
                Some(b) if score.confidence <= b.confidence => {}
                _ => best = Some(score),
            }
        }
        best
    }

    /// Entries ordered by descending confidence; equal scores keep their original order.
    pub fn sorted_descending(&self) -> Vec<EmotionScore> {
        let mut sorted = self.scores.clone();
        sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        sorted
    }
}

impl<S: AsRef<str>> FromIterator<(S, f32)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut scores = EmotionScores::new();
        for (label, confidence) in iter {
            scores.insert(label.as_ref(), confidence);
        }
        scores
    }
}
