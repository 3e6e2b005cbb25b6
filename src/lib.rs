//! Animescope: a Zellij plugin for discovering anime.
//!
//! Type a free-text description of what you want to watch, narrow it down by
//! genre and browse the matches as cards with a rating, genre tags and an
//! emotion profile. Queries go to a recommendation service over HTTP; the
//! plugin only renders what comes back.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls only
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Input capture and genre filter                   │
//! │  - Query coordinator (sequence-number race guard)   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Provider      │   │ Projection    │
//! │ (ui/)         │   │ (provider/)   │   │ (projection/) │
//! │ - Rendering   │   │ - JSON codec  │   │ - Ratings     │
//! │ - Theming     │   │ - Seq context │   │ - Genre tags  │
//! │ - Components  │   │               │   │ - Emotions    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/animescope.wasm" {
//!         endpoint "http://localhost:8000/api/anime"
//!         theme "catppuccin-mocha"
//!         genres_file "~/.config/animescope/genres.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use animescope::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::from_zellij(&BTreeMap::new()));
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//! let Some(Action::IssueQuery(query)) = actions.first() else { unreachable!() };
//!
//! let body = br#"[{"MAL_ID": 1, "Name": "Cowboy Bebop", "Score": "8.78",
//!     "Genres": "Action, Sci-Fi", "anger": 0.1, "disgust": 0.0, "fear": 0.1,
//!     "sadness": 0.2, "happiness": 0.4, "neutral": 0.1, "surprise": 0.1,
//!     "sypnopsis": "Bounty hunters in space."}]"#;
//! handle_event(&mut state, &Event::QueryCompleted { seq: query.seq, status: 200, body: body.to_vec() })?;
//! assert_eq!(state.results[0].name, "Cowboy Bebop");
//! # Ok::<(), animescope::AnimescopeError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod projection;
pub mod provider;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{AnimescopeError, GenreVocabulary, Result};
pub use ui::Theme;

use infrastructure::expand_tilde;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Provider URL used when `endpoint` is not configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/anime";

/// Plugin configuration parsed from the Zellij KDL block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Recommendation service URL. Always `http://` or `https://`.
    pub endpoint: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Custom TOML theme, already mapped onto `/host`.
    pub theme_file: Option<String>,

    /// Custom genre vocabulary, already mapped onto `/host`.
    pub genres_file: Option<String>,

    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            genres_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the map Zellij hands to `load`.
    ///
    /// Blank values count as unset. An `endpoint` without an HTTP scheme is
    /// replaced by [`DEFAULT_ENDPOINT`].
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use animescope::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "https://recs.example.org/anime".to_string());
    /// map.insert("genres_file".to_string(), "~/genres.toml".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "https://recs.example.org/anime");
    /// assert_eq!(config.genres_file.as_deref(), Some("/host/genres.toml"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let endpoint = value("endpoint").map_or_else(
            || DEFAULT_ENDPOINT.to_string(),
            |endpoint| {
                if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
                    endpoint
                } else {
                    tracing::warn!(endpoint = %endpoint, "endpoint is not an http(s) URL, using default");
                    DEFAULT_ENDPOINT.to_string()
                }
            },
        );

        Self {
            endpoint,
            theme_name: value("theme"),
            theme_file: value("theme_file").map(|p| expand_tilde(&p)),
            genres_file: value("genres_file").map(|p| expand_tilde(&p)),
            trace_level: value("trace_level"),
        }
    }
}

/// Builds the initial `AppState` from `config`.
///
/// Theme and vocabulary load failures are logged and fall back to the
/// built-ins, so this never fails.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing animescope plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let vocabulary = config
        .genres_file
        .as_ref()
        .map_or_else(GenreVocabulary::default, |genres_file| {
            GenreVocabulary::from_file(genres_file).unwrap_or_else(|e| {
                tracing::debug!(genres_file = %genres_file, error = %e, "failed to load genres, using built-in list");
                GenreVocabulary::default()
            })
        });
    tracing::debug!(genre_count = vocabulary.len(), "genre vocabulary ready");

    AppState::new(Arc::new(vocabulary), theme)
}
