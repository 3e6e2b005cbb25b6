//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings and flags only; every decision about what to show has already been
//! made.

/// Columns taken by one card, including the gap to its right neighbour.
pub const CARD_WIDTH: usize = 38;

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: usize = 12;

/// Rows used by everything except the grid: header, search box, filter
/// bar, status line, borders and footer.
pub const CHROME_ROWS: usize = 11;

/// Stars in a rating bar.
pub const STAR_COUNT: usize = 10;

/// Horizontal margin around the detail and picker overlays.
pub const OVERLAY_MARGIN: usize = 4;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub filter_bar: FilterBarInfo,
    pub status: StatusInfo,

    /// Cards in the visible window, row-major.
    pub cards: Vec<CardItem>,

    /// Number of cards per grid row.
    pub columns: usize,

    /// Shown instead of the grid when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Detail overlay for the focused card.
    pub detail: Option<DetailView>,

    /// Genre picker overlay.
    pub picker: Option<GenrePickerView>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search input box.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Draft text, which may differ from the committed query.
    pub query: String,

    /// Whether keystrokes currently go to the search bar.
    pub is_focused: bool,

    /// Whether the draft has uncommitted edits.
    pub is_dirty: bool,
}

/// Selected genre chips.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub chips: Vec<String>,
}

/// Tone of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Loading,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub kind: StatusKind,
    pub text: String,
}

/// One labelled emotion bar, value on a 0–100 scale.
#[derive(Debug, Clone)]
pub struct EmotionBar {
    pub label: &'static str,
    pub value: f64,
}

/// One result card in the grid.
#[derive(Debug, Clone)]
pub struct CardItem {
    pub name: String,
    pub rating_label: String,

    /// Filled half stars, `None` when the score is unavailable.
    pub half_stars: Option<usize>,

    pub genre_tags: Vec<String>,
    pub emotions: Vec<EmotionBar>,
    pub is_selected: bool,
}

/// Detail overlay content.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub name: String,
    pub rating_label: String,
    pub half_stars: Option<usize>,
    pub genres: String,
    pub emotions: Vec<EmotionBar>,

    /// Synopsis (or placeholder) wrapped to the overlay width.
    pub synopsis_lines: Vec<String>,
}

/// Genre picker overlay content.
#[derive(Debug, Clone)]
pub struct GenrePickerView {
    pub query: String,

    /// Matching entries in the visible window.
    pub entries: Vec<PickerEntry>,

    pub match_count: usize,
    pub selected_count: usize,
}

#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub genre: String,

    /// Whether the genre is part of the active filter.
    pub is_checked: bool,

    /// Whether the picker cursor is on this entry.
    pub is_cursor: bool,

    /// Character ranges matching the picker query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown when the grid has nothing to display.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
