//! Genre filter selection bound to a closed vocabulary.

use crate::domain::GenreVocabulary;
use std::collections::HashSet;
use std::sync::Arc;

/// Currently selected genres.
///
/// Selection order is preserved for display. Values outside the vocabulary
/// are dropped, so the selection is always a subset of it.
#[derive(Debug, Clone)]
pub struct FilterSet {
    vocabulary: Arc<GenreVocabulary>,
    selected: Vec<String>,
}

impl FilterSet {
    #[must_use]
    pub const fn new(vocabulary: Arc<GenreVocabulary>) -> Self {
        Self {
            vocabulary,
            selected: Vec::new(),
        }
    }

    /// Replaces the whole selection.
    ///
    /// Duplicates keep their first occurrence and unknown genres are dropped.
    /// Returns `true` if the selection changed as a set.
    pub fn replace<I, S>(&mut self, selection: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut next = Vec::new();

        for genre in selection.into_iter().map(Into::into) {
            if !self.vocabulary.contains(&genre) {
                tracing::debug!(genre = %genre, "dropping genre outside vocabulary");
                continue;
            }
            if seen.insert(genre.clone()) {
                next.push(genre);
            }
        }

        let before: HashSet<&str> = self.selected.iter().map(String::as_str).collect();
        let after: HashSet<&str> = next.iter().map(String::as_str).collect();
        let changed = before != after;

        self.selected = next;

        if changed {
            tracing::debug!(selected = ?self.selected, "genre filter changed");
        }
        changed
    }

    /// Adds `genre` if absent, removes it otherwise.
    pub fn toggle(&mut self, genre: &str) -> bool {
        let mut next = self.selected.clone();
        if let Some(pos) = next.iter().position(|g| g == genre) {
            next.remove(pos);
        } else {
            next.push(genre.to_string());
        }
        self.replace(next)
    }

    pub fn clear(&mut self) -> bool {
        self.replace(Vec::<String>::new())
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, genre: &str) -> bool {
        self.selected.iter().any(|g| g == genre)
    }

    #[must_use]
    pub fn vocabulary(&self) -> &GenreVocabulary {
        &self.vocabulary
    }
}
