//! Domain layer for the animescope plugin.
//!
//! Core types independent of Zellij APIs: the query descriptor, raw provider
//! records, the render-ready display model and the genre vocabulary.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Query descriptor (search text + genre filter)
//! - [`record`]: Raw provider records
//! - [`display`]: Display model and emotion axes
//! - [`vocabulary`]: Closed genre vocabulary

pub mod display;
pub mod error;
pub mod query;
pub mod record;
pub mod vocabulary;

pub use display::{DisplayModel, EmotionAxis, EmotionPoint, EMOTION_AXES};
pub use error::{AnimescopeError, Result};
pub use query::QueryDescriptor;
pub use record::{AnimeRecord, Score};
pub use vocabulary::GenreVocabulary;
