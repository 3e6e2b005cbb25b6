//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, provider and
//! projection layers. Data flows one way:
//!
//! ```text
//! Key / WebRequestResult → Event → handle_event → AppState → Action → host call
//!                                       ↑                        │
//!                                       └──── QueryCompleted ────┘
//! ```
//!
//! # Modules
//!
//! - [`input`]: Search draft with explicit commit
//! - [`filters`]: Genre selection bound to the vocabulary
//! - [`coordinator`]: Query issuance and the sequence-number race guard
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use animescope::app::{handle_event, Action, AppState, Event};
//! use animescope::domain::GenreVocabulary;
//! use animescope::ui::Theme;
//!
//! let mut state = AppState::new(Arc::new(GenreVocabulary::default()), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert!(matches!(actions.as_slice(), [Action::IssueQuery(q)] if q.seq == 1));
//! # Ok::<(), animescope::AnimescopeError>(())
//! ```

pub mod actions;
pub mod coordinator;
pub mod filters;
pub mod handler;
pub mod input;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use coordinator::{Completion, LoadPhase, OutboundQuery, QueryCoordinator};
pub use filters::FilterSet;
pub use handler::{handle_event, Event};
pub use input::InputCapture;
pub use modes::InputMode;
pub use state::AppState;
