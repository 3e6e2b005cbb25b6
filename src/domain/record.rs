//! Raw result records as returned by the query provider.
//!
//! Field names follow the provider's JSON keys (`MAL_ID`, `Name`, `Score`, ...).
//! Deserialization is strict about required fields so that a body with the
//! wrong shape surfaces as a malformed response rather than a half-filled card.

use serde::{Deserialize, Serialize};

/// Score field of an [`AnimeRecord`].
///
/// The provider usually sends a numeric string such as `"8.78"` or the literal
/// `"Unknown"`, but some exports emit a bare JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// A score sent as a JSON number.
    Number(f64),
    /// A score sent as text (numeric string or `"Unknown"`).
    Text(String),
}

/// One anime as received from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    /// MyAnimeList identifier, unique within one response.
    #[serde(rename = "MAL_ID")]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Score")]
    pub score: Score,

    /// Comma-space separated genre list, e.g. `"Action, Comedy"`.
    #[serde(rename = "Genres")]
    pub genres: String,

    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub sadness: f64,
    pub happiness: f64,
    pub neutral: f64,
    pub surprise: f64,

    /// Synopsis text. The provider spells the key `sypnopsis`.
    #[serde(rename = "sypnopsis", alias = "synopsis", default)]
    pub synopsis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_row() {
        let json = r#"{
            "MAL_ID": 1,
            "Name": "Cowboy Bebop",
            "Score": "8.78",
            "Genres": "Action, Adventure, Comedy, Drama, Sci-Fi, Space",
            "anger": 0.1, "disgust": 0.02, "fear": 0.2, "sadness": 0.15,
            "happiness": 0.3, "neutral": 0.13, "surprise": 0.1,
            "sypnopsis": "In the year 2071, humanity has colonized several of the planets."
        }"#;

        let record: AnimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.score, Score::Text("8.78".to_string()));
        assert!(record.synopsis.unwrap().starts_with("In the year 2071"));
    }

    #[test]
    fn accepts_numeric_score_and_missing_synopsis() {
        let json = r#"{
            "MAL_ID": 5, "Name": "X", "Score": 7.5, "Genres": "",
            "anger": 0, "disgust": 0, "fear": 0, "sadness": 0,
            "happiness": 0, "neutral": 1, "surprise": 0
        }"#;

        let record: AnimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.score, Score::Number(7.5));
        assert!(record.synopsis.is_none());
    }

    #[test]
    fn accepts_synopsis_alias_and_null() {
        let base = r#""MAL_ID": 2, "Name": "Y", "Score": "Unknown", "Genres": "Drama",
            "anger": 0, "disgust": 0, "fear": 0, "sadness": 0,
            "happiness": 0, "neutral": 0, "surprise": 0"#;

        let aliased: AnimeRecord =
            serde_json::from_str(&format!(r#"{{{base}, "synopsis": "text"}}"#)).unwrap();
        assert_eq!(aliased.synopsis.as_deref(), Some("text"));

        let null: AnimeRecord =
            serde_json::from_str(&format!(r#"{{{base}, "sypnopsis": null}}"#)).unwrap();
        assert!(null.synopsis.is_none());
    }

    #[test]
    fn rejects_record_without_emotions() {
        let json = r#"{"MAL_ID": 3, "Name": "Z", "Score": "7.0", "Genres": "Drama"}"#;
        assert!(serde_json::from_str::<AnimeRecord>(json).is_err());
    }
}
