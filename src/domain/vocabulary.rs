//! Closed genre vocabulary for the filter set.
//!
//! The vocabulary is read-only configuration loaded once at startup. It is not
//! negotiated with the provider; values outside it can never be selected.
//!
//! # TOML Format
//!
//! ```toml
//! genres = ["Action", "Adventure", "Slice of Life"]
//! ```

use crate::domain::error::{AnimescopeError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Genres offered when no vocabulary file is configured.
pub const DEFAULT_GENRES: [&str; 28] = [
    "Action", "Adventure", "Comedy", "Drama", "Fantasy", "Horror",
    "Mecha", "Mystery", "Romance", "Sci-Fi", "Slice of Life", "Sports",
    "Supernatural", "Thriller", "Psychological", "Demons", "Magic",
    "Military", "Music", "Parody", "Police", "School", "Shounen",
    "Shoujo", "Seinen", "Josei", "Space", "Vampire",
];

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    genres: Vec<String>,
}

/// Ordered, duplicate-free list of selectable genres.
///
/// Membership checks are case-sensitive exact matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreVocabulary {
    genres: Vec<String>,
}

impl GenreVocabulary {
    /// Builds a vocabulary from a list, dropping blanks and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`AnimescopeError::Vocabulary`] if nothing is left.
    pub fn new<I, S>(genres: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let genres: Vec<String> = genres
            .into_iter()
            .map(Into::into)
            .filter(|genre| !genre.trim().is_empty())
            .filter(|genre| seen.insert(genre.clone()))
            .collect();

        if genres.is_empty() {
            return Err(AnimescopeError::Vocabulary(
                "vocabulary contains no genres".to_string(),
            ));
        }

        Ok(Self { genres })
    }

    /// Parses a vocabulary from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AnimescopeError::Vocabulary`] on invalid TOML or an empty list.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: VocabularyFile = toml::from_str(contents)
            .map_err(|e| AnimescopeError::Vocabulary(format!("failed to parse genres TOML: {e}")))?;
        Self::new(file.genres)
    }

    /// Loads a vocabulary from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    #[must_use]
    pub fn contains(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Position of `genre` in display order.
    #[must_use]
    pub fn position(&self, genre: &str) -> Option<usize> {
        self.genres.iter().position(|g| g == genre)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genres.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl Default for GenreVocabulary {
    fn default() -> Self {
        Self {
            genres: DEFAULT_GENRES.iter().map(|g| (*g).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_vocabulary_keeps_declared_order() {
        let vocab = GenreVocabulary::default();
        assert_eq!(vocab.len(), 28);
        assert_eq!(vocab.genres()[0], "Action");
        assert_eq!(vocab.genres()[27], "Vampire");
        assert_eq!(vocab.position("Slice of Life"), Some(10));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let vocab = GenreVocabulary::default();
        assert!(vocab.contains("Sci-Fi"));
        assert!(!vocab.contains("sci-fi"));
        assert!(!vocab.contains("Isekai"));
    }

    #[test]
    fn parses_toml_and_drops_duplicates() {
        let vocab = GenreVocabulary::from_toml(r#"genres = ["Isekai", "Action", "Isekai", " "]"#)
            .unwrap();
        assert_eq!(vocab.genres(), ["Isekai", "Action"]);
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = GenreVocabulary::from_toml("genres = []").unwrap_err();
        assert!(matches!(err, AnimescopeError::Vocabulary(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"genres = ["Cars", "Game"]"#).unwrap();

        let vocab = GenreVocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.genres(), ["Cars", "Game"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GenreVocabulary::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AnimescopeError::Io(_)));
    }
}
