//! Projection of raw provider records into display models.
//!
//! Everything here is pure and synchronous. Odd provider data (an `"Unknown"`
//! score, an empty genre string, intensities outside `[0, 1]`) is resolved with
//! fallback values and never reported as an error.
//!
//! # Example
//!
//! ```
//! use animescope::domain::{AnimeRecord, Score};
//! use animescope::projection::project;
//!
//! let record = AnimeRecord {
//!     id: 20,
//!     name: "Naruto".to_string(),
//!     score: Score::Text("Unknown".to_string()),
//!     genres: "Action, Comedy".to_string(),
//!     anger: 0.1, disgust: 0.0, fear: 0.2, sadness: 0.1,
//!     happiness: 0.4, neutral: 0.1, surprise: 0.1,
//!     synopsis: None,
//! };
//!
//! let model = project(&record);
//! assert_eq!(model.rating, None);
//! assert_eq!(model.genre_tags, ["Action", "Comedy"]);
//! assert_eq!(model.emotion_vector[4].value, 40.0);
//! ```

use crate::domain::{AnimeRecord, DisplayModel, EmotionAxis, EmotionPoint, Score, EMOTION_AXES};
use std::collections::HashSet;

/// Separator between genres in the provider's genre string.
pub const GENRE_DELIMITER: &str = ", ";

/// Literal score the provider uses for unrated titles.
const UNKNOWN_SCORE: &str = "Unknown";

/// Projects one record into its display model.
#[must_use]
pub fn project(record: &AnimeRecord) -> DisplayModel {
    DisplayModel {
        id: record.id,
        name: record.name.clone(),
        rating: parse_rating(&record.score),
        genre_tags: split_genres(&record.genres),
        emotion_vector: emotion_vector(record),
        synopsis: record.synopsis.clone(),
    }
}

/// Projects a whole result set, preserving provider order.
#[must_use]
pub fn project_all(records: &[AnimeRecord]) -> Vec<DisplayModel> {
    let mut ids = HashSet::new();
    for record in records {
        if !ids.insert(record.id) {
            tracing::debug!(id = record.id, "duplicate identifier in result set");
        }
    }

    records.iter().map(project).collect()
}

/// Parses a score, returning `None` for `"Unknown"` or anything unparsable.
#[must_use]
pub fn parse_rating(score: &Score) -> Option<f64> {
    let value = match score {
        Score::Number(value) => *value,
        Score::Text(text) => {
            let text = text.trim();
            if text == UNKNOWN_SCORE {
                return None;
            }
            text.parse::<f64>().ok()?
        }
    };

    value.is_finite().then_some(value)
}

/// Splits the provider's genre string on `", "`, dropping duplicates.
#[must_use]
pub fn split_genres(genres: &str) -> Vec<String> {
    if genres.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    genres
        .split(GENRE_DELIMITER)
        .filter(|tag| seen.insert(*tag))
        .map(String::from)
        .collect()
}

/// Builds the fixed-order emotion vector with values scaled to `[0, 100]`.
#[must_use]
pub fn emotion_vector(record: &AnimeRecord) -> [EmotionPoint; 7] {
    EMOTION_AXES.map(|axis| EmotionPoint {
        axis,
        value: scale_intensity(raw_intensity(record, axis)),
    })
}

const fn raw_intensity(record: &AnimeRecord, axis: EmotionAxis) -> f64 {
    match axis {
        EmotionAxis::Anger => record.anger,
        EmotionAxis::Disgust => record.disgust,
        EmotionAxis::Fear => record.fear,
        EmotionAxis::Sadness => record.sadness,
        EmotionAxis::Happiness => record.happiness,
        EmotionAxis::Neutral => record.neutral,
        EmotionAxis::Surprise => record.surprise,
    }
}

fn scale_intensity(raw: f64) -> f64 {
    if raw.is_finite() {
        (raw * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
