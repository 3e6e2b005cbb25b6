//! Query descriptor combining committed search text and the genre filter.

use std::collections::BTreeSet;

/// The combined search text and genre filter that drives one outbound query.
///
/// Genres form an ordered set: duplicates are dropped on construction and the
/// first occurrence keeps its position. Equality ignores genre order, so two
/// descriptors holding the same genres in a different order compare equal and
/// do not trigger a re-fetch.
///
/// An empty text with no genres means an unfiltered listing.
///
/// # Examples
///
/// ```
/// use animescope::domain::QueryDescriptor;
///
/// let a = QueryDescriptor::new("space", ["Action", "Drama", "Action"]);
/// let b = QueryDescriptor::new("space", ["Drama", "Action"]);
/// assert_eq!(a.genres(), ["Action", "Drama"]);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryDescriptor {
    text: String,
    genres: Vec<String>,
}

impl QueryDescriptor {
    #[must_use]
    pub fn new<I, S>(text: impl Into<String>, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let genres = genres
            .into_iter()
            .map(Into::into)
            .filter(|genre: &String| seen.insert(genre.clone()))
            .collect();

        Self {
            text: text.into(),
            genres,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Returns `true` when neither text nor genres constrain the query.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.genres.is_empty()
    }

    fn genre_set(&self) -> BTreeSet<&str> {
        self.genres.iter().map(String::as_str).collect()
    }
}

impl PartialEq for QueryDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.genre_set() == other.genre_set()
    }
}

impl Eq for QueryDescriptor {}
