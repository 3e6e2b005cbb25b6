//! Input mode state machine.
//!
//! The mode decides which keybindings are active and what the footer shows.
//! The detail view is not a mode: it is open whenever a card is focused, and
//! it takes key priority over every mode.
//!
//! ```text
//!          '/'               Enter / Esc
//!  Browse ─────▶ Search ───────────────▶ Browse
//!     │
//!     │ 'g'              Esc
//!     └────▶ GenrePicker ─────▶ Browse
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Card grid navigation and commands.
    #[default]
    Browse,

    /// Search bar focused; keystrokes edit the draft.
    Search,

    /// Genre picker overlay open; keystrokes filter the vocabulary.
    GenrePicker,
}
