//! Render-ready projection of an anime record.
//!
//! [`DisplayModel`] is derived from an [`AnimeRecord`](super::AnimeRecord) by
//! [`crate::projection::project`] and never persisted. The emotion vector has
//! a fixed axis order shared by every model so cards can be compared visually.

/// Text shown instead of a score when the provider has none.
pub const RATING_UNAVAILABLE: &str = "N/A";

/// Text shown in the detail view when a title has no synopsis.
pub const SYNOPSIS_PLACEHOLDER: &str = "No description available.";

/// Highest score on the provider's scale.
pub const RATING_SCALE_MAX: f64 = 10.0;

/// One axis of the emotion profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionAxis {
    Anger,
    Disgust,
    Fear,
    Sadness,
    Happiness,
    Neutral,
    Surprise,
}

/// Every axis in display order.
pub const EMOTION_AXES: [EmotionAxis; 7] = [
    EmotionAxis::Anger,
    EmotionAxis::Disgust,
    EmotionAxis::Fear,
    EmotionAxis::Sadness,
    EmotionAxis::Happiness,
    EmotionAxis::Neutral,
    EmotionAxis::Surprise,
];

impl EmotionAxis {
    /// Axis label as rendered next to its bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anger => "Anger",
            Self::Disgust => "Disgust",
            Self::Fear => "Fear",
            Self::Sadness => "Sadness",
            Self::Happiness => "Happiness",
            Self::Neutral => "Neutral",
            Self::Surprise => "Surprise",
        }
    }
}

/// Magnitude of one emotion axis on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionPoint {
    pub axis: EmotionAxis,
    pub value: f64,
}

/// Normalized, render-ready view of one result.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub id: u64,
    pub name: String,
    /// Parsed score, `None` when the provider reported `"Unknown"` or junk.
    pub rating: Option<f64>,
    pub genre_tags: Vec<String>,
    pub emotion_vector: [EmotionPoint; 7],
    /// Synopsis exactly as received; `None` and empty are kept distinct.
    pub synopsis: Option<String>,
}

impl DisplayModel {
    /// Score label, e.g. `"Score: 8.78"` or `"Score: N/A"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating.map_or_else(
            || format!("Score: {RATING_UNAVAILABLE}"),
            |rating| format!("Score: {rating}"),
        )
    }

    /// Number of half stars to fill on a bar of `max_stars` stars.
    ///
    /// Returns `None` when the score is unavailable, so callers render no bar
    /// rather than an empty one that would read as zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn star_fill(&self, max_stars: usize) -> Option<usize> {
        let rating = self.rating?.clamp(0.0, RATING_SCALE_MAX);
        let halves = (rating / RATING_SCALE_MAX * max_stars as f64 * 2.0).round();
        Some(halves as usize)
    }

    /// Synopsis text, or [`SYNOPSIS_PLACEHOLDER`] when absent or blank.
    #[must_use]
    pub fn synopsis_or_placeholder(&self) -> &str {
        match self.synopsis.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => SYNOPSIS_PLACEHOLDER,
        }
    }

    #[must_use]
    pub fn emotion(&self, axis: EmotionAxis) -> f64 {
        self.emotion_vector
            .iter()
            .find(|point| point.axis == axis)
            .map_or(0.0, |point| point.value)
    }
}
