//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It owns the
//! input capture, the genre filter, the query coordinator and the current
//! result set, plus the presenter-only state: card cursor, focused card,
//! genre picker and failure notice.
//!
//! The result set is replaced wholesale when a fresh response is applied.
//! A focused card is a clone taken at selection time, so it stays valid while
//! `results` changes underneath it, and it is cleared whenever the result set
//! it came from is superseded.

use super::coordinator::{Completion, LoadPhase, QueryCoordinator};
use super::filters::FilterSet;
use super::input::InputCapture;
use super::modes::InputMode;
use crate::domain::error::Result;
use crate::domain::{AnimeRecord, DisplayModel, GenreVocabulary};
use crate::projection;
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, DetailView, EmotionBar, EmptyState, FilterBarInfo, FooterInfo, GenrePickerView,
    HeaderInfo, PickerEntry, SearchBarInfo, StatusInfo, StatusKind, UIViewModel, CARD_HEIGHT,
    CARD_WIDTH, CHROME_ROWS, OVERLAY_MARGIN, STAR_COUNT,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Arc;

/// Rows of the picker overlay not used by entries.
const PICKER_CHROME_ROWS: usize = 4;

/// Cursor and query of the genre picker overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerState {
    pub query: String,
    pub cursor: usize,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub input: InputCapture,
    pub filters: FilterSet,
    pub coordinator: QueryCoordinator,

    /// Projected records of the last applied response, in provider order.
    pub results: Vec<DisplayModel>,

    /// Card shown in the detail overlay.
    pub focused: Option<DisplayModel>,

    /// Index of the highlighted card within `results`.
    pub cursor: usize,

    /// Cards per grid row at the last known pane width.
    pub columns: usize,

    pub input_mode: InputMode,
    pub picker: PickerState,

    /// Dismissible failure message for the status line.
    pub notice: Option<String>,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(vocabulary: Arc<GenreVocabulary>, theme: Theme) -> Self {
        Self {
            input: InputCapture::new(),
            filters: FilterSet::new(vocabulary),
            coordinator: QueryCoordinator::new(),
            results: Vec::new(),
            focused: None,
            cursor: 0,
            columns: 1,
            input_mode: InputMode::Browse,
            picker: PickerState::default(),
            notice: None,
            theme,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.coordinator.phase()
    }

    /// Records the pane width so vertical moves step by a full grid row.
    pub fn set_viewport(&mut self, cols: usize) {
        self.columns = grid_columns(cols);
    }

    /// Clears presenter state bound to the outgoing result set.
    ///
    /// Called when a query is issued.
    pub fn on_query_issued(&mut self) {
        self.focused = None;
        self.notice = None;
    }

    /// Feeds a decoded response into the coordinator and merges the outcome.
    ///
    /// Returns `true` if anything visible changed.
    pub fn apply_completion(&mut self, seq: u64, outcome: Result<Vec<AnimeRecord>>) -> bool {
        match self.coordinator.complete(seq, outcome) {
            Completion::Discarded => false,
            Completion::Loaded(records) => {
                self.results = projection::project_all(&records);
                self.cursor = 0;
                self.focused = None;
                true
            }
            Completion::Failed(err) => {
                self.notice = Some(format!("Query failed: {err}"));
                true
            }
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.results.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor >= self.columns {
            self.cursor -= self.columns;
        }
    }

    /// Moves one grid row down, landing on the last card if the row below is
    /// shorter.
    pub fn move_down(&mut self) {
        let len = self.results.len();
        if len == 0 {
            return;
        }

        let target = self.cursor + self.columns;
        if target < len {
            self.cursor = target;
        } else if self.cursor / self.columns < (len - 1) / self.columns {
            self.cursor = len - 1;
        }
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&DisplayModel> {
        self.results.get(self.cursor)
    }

    /// Focuses the card under the cursor. Returns `false` if there is none.
    pub fn open_detail(&mut self) -> bool {
        let Some(model) = self.selected_result() else {
            return false;
        };

        tracing::debug!(id = model.id, name = %model.name, "detail view opened");
        self.focused = Some(model.clone());
        true
    }

    pub fn dismiss_detail(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Vocabulary entries matching the picker query, in vocabulary order,
    /// with the character ranges that matched.
    #[must_use]
    pub fn picker_matches(&self) -> Vec<(&str, Vec<(usize, usize)>)> {
        let genres = self.filters.vocabulary().genres();

        if self.picker.query.is_empty() {
            return genres.iter().map(|g| (g.as_str(), Vec::new())).collect();
        }

        let matcher = SkimMatcherV2::default();
        genres
            .iter()
            .filter_map(|genre| {
                matcher
                    .fuzzy_indices(genre, &self.picker.query)
                    .map(|(_score, indices)| (genre.as_str(), coalesce_ranges(&indices)))
            })
            .collect()
    }

    /// Genre under the picker cursor.
    #[must_use]
    pub fn picker_genre(&self) -> Option<String> {
        self.picker_matches()
            .get(self.picker.cursor)
            .map(|(genre, _)| (*genre).to_string())
    }

    pub fn picker_move_down(&mut self) {
        let count = self.picker_matches().len();
        if count > 0 {
            self.picker.cursor = (self.picker.cursor + 1) % count;
        }
    }

    pub fn picker_move_up(&mut self) {
        let count = self.picker_matches().len();
        if count == 0 {
            return;
        }
        self.picker.cursor = if self.picker.cursor == 0 {
            count - 1
        } else {
            self.picker.cursor - 1
        };
    }

    /// Computes a renderable view model for a pane of `rows` × `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let columns = grid_columns(cols);
        let grid_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let (start, end) = self.visible_window(columns, grid_rows);

        let cards = self.results[start..end]
            .iter()
            .enumerate()
            .map(|(offset, model)| Self::compute_card(model, start + offset == self.cursor))
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.input.draft().to_string(),
                is_focused: self.input_mode == InputMode::Search,
                is_dirty: self.input.is_dirty(),
            },
            filter_bar: FilterBarInfo {
                chips: self.filters.selected().to_vec(),
            },
            status: self.compute_status(),
            cards,
            columns,
            empty_state: self.compute_empty_state(),
            detail: self.focused.as_ref().map(|model| Self::compute_detail(model, cols)),
            picker: (self.input_mode == InputMode::GenrePicker)
                .then(|| self.compute_picker(rows)),
            footer: self.compute_footer(),
        }
    }

    /// Range of `results` visible in a grid of `grid_rows` rows, keeping the
    /// cursor row roughly centered.
    fn visible_window(&self, columns: usize, grid_rows: usize) -> (usize, usize) {
        let len = self.results.len();
        if len == 0 {
            return (0, 0);
        }

        let total_rows = len.div_ceil(columns);
        let cursor_row = self.cursor.min(len - 1) / columns;

        let mut first_row = cursor_row.saturating_sub(grid_rows / 2);
        if first_row + grid_rows > total_rows {
            first_row = total_rows.saturating_sub(grid_rows);
        }

        let start = first_row * columns;
        let end = (start + grid_rows * columns).min(len);
        (start, end)
    }

    fn compute_card(model: &DisplayModel, is_selected: bool) -> CardItem {
        let inner = card_inner_width();

        CardItem {
            name: truncate(&model.name, inner),
            rating_label: model.rating_label(),
            half_stars: model.star_fill(STAR_COUNT),
            genre_tags: model.genre_tags.clone(),
            emotions: emotion_bars(model),
            is_selected,
        }
    }

    fn compute_detail(model: &DisplayModel, cols: usize) -> DetailView {
        let width = cols.saturating_sub(OVERLAY_MARGIN * 2 + 4).max(10);

        DetailView {
            name: model.name.clone(),
            rating_label: model.rating_label(),
            half_stars: model.star_fill(STAR_COUNT),
            genres: if model.genre_tags.is_empty() {
                "No genres listed".to_string()
            } else {
                model.genre_tags.join(", ")
            },
            emotions: emotion_bars(model),
            synopsis_lines: wrap_text(model.synopsis_or_placeholder(), width),
        }
    }

    fn compute_picker(&self, rows: usize) -> GenrePickerView {
        let matches = self.picker_matches();
        let visible = picker_visible_entries(rows);

        let cursor = self.picker.cursor.min(matches.len().saturating_sub(1));
        let mut start = cursor.saturating_sub(visible / 2);
        if start + visible > matches.len() {
            start = matches.len().saturating_sub(visible);
        }

        let entries = matches
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(idx, (genre, ranges))| PickerEntry {
                genre: (*genre).to_string(),
                is_checked: self.filters.is_selected(genre),
                is_cursor: idx == cursor,
                highlight_ranges: ranges.clone(),
            })
            .collect();

        GenrePickerView {
            query: self.picker.query.clone(),
            entries,
            match_count: matches.len(),
            selected_count: self.filters.selected().len(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = self.results.len();
        let noun = if count == 1 { "title" } else { "titles" };
        HeaderInfo {
            title: format!(" animescope ({count} {noun}) "),
        }
    }

    fn compute_status(&self) -> StatusInfo {
        if let Some(notice) = &self.notice {
            return StatusInfo {
                kind: StatusKind::Error,
                text: format!("{notice}  (r: retry, Esc: dismiss)"),
            };
        }

        match self.phase() {
            LoadPhase::Idle => StatusInfo {
                kind: StatusKind::Info,
                text: "Waiting for web access".to_string(),
            },
            LoadPhase::Loading => StatusInfo {
                kind: StatusKind::Loading,
                text: "Loading...".to_string(),
            },
            LoadPhase::Loaded | LoadPhase::Failed => {
                let descriptor = self.coordinator.descriptor();
                let text = if descriptor.is_unfiltered() {
                    format!("{} results", self.results.len())
                } else if descriptor.text().is_empty() {
                    format!("{} results for selected genres", self.results.len())
                } else {
                    format!("{} results for \"{}\"", self.results.len(), descriptor.text())
                };
                StatusInfo {
                    kind: StatusKind::Info,
                    text,
                }
            }
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            return None;
        }

        let (message, subtitle) = match self.phase() {
            LoadPhase::Idle => (
                "Waiting for web access",
                "Grant the permission request to load titles",
            ),
            LoadPhase::Loading => ("Loading...", "Fetching titles from the provider"),
            LoadPhase::Loaded => ("No anime found", "Try a different search or fewer genres"),
            LoadPhase::Failed => ("Could not load titles", "Press 'r' to retry"),
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.focused.is_some() {
            "Esc/Enter/q: close details"
        } else {
            match self.input_mode {
                InputMode::Browse => {
                    "hjkl/arrows: move  Enter: details  /: search  g: genres  x: clear genres  r: refresh  q: quit"
                }
                InputMode::Search => "Enter: search  Esc: leave  Ctrl+u: clear  Type to edit",
                InputMode::GenrePicker => {
                    "Enter/Tab: toggle  Ctrl+n/p: move  Ctrl+x: clear all  Esc: close  Type to filter"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Cards per grid row for a pane `cols` wide, at least one.
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let columns = cols / CARD_WIDTH;
    if columns == 0 {
        1
    } else {
        columns
    }
}

/// Picker entries that fit between the overlay's top at row 4 and its bottom
/// three rows above the pane edge.
#[must_use]
pub const fn picker_visible_entries(rows: usize) -> usize {
    let visible = rows.saturating_sub(6 + PICKER_CHROME_ROWS);
    if visible == 0 {
        1
    } else {
        visible
    }
}

/// Text columns inside a card's borders and padding.
#[must_use]
pub const fn card_inner_width() -> usize {
    CARD_WIDTH - 5
}

fn emotion_bars(model: &DisplayModel) -> Vec<EmotionBar> {
    model
        .emotion_vector
        .iter()
        .map(|point| EmotionBar {
            label: point.axis.label(),
            value: point.value,
        })
        .collect()
}

/// Coalesces sorted match indices into `(start, end)` ranges.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnimescopeError, Score};

    fn record(id: u64, name: &str) -> AnimeRecord {
        AnimeRecord {
            id,
            name: name.to_string(),
            score: Score::Text("8.0".to_string()),
            genres: "Action, Drama".to_string(),
            anger: 0.1,
            disgust: 0.1,
            fear: 0.1,
            sadness: 0.1,
            happiness: 0.4,
            neutral: 0.1,
            surprise: 0.1,
            synopsis: None,
        }
    }

    fn state() -> AppState {
        AppState::new(Arc::new(GenreVocabulary::default()), Theme::default())
    }

    fn loaded(count: u64) -> AppState {
        let mut state = state();
        state.coordinator.sync("", Vec::<String>::new());
        let records = (1..=count).map(|id| record(id, &format!("Title {id}"))).collect();
        assert!(state.apply_completion(1, Ok(records)));
        state
    }

    #[test]
    fn applied_results_reset_cursor_and_focus() {
        let mut state = loaded(5);
        state.cursor = 3;
        state.open_detail();

        state.coordinator.sync("new", Vec::<String>::new());
        assert!(state.apply_completion(2, Ok(vec![record(9, "Other")])));
        assert_eq!(state.cursor, 0);
        assert!(state.focused.is_none());
        assert_eq!(state.results[0].name, "Other");
    }

    #[test]
    fn failure_keeps_results_and_sets_notice() {
        let mut state = loaded(2);
        state.coordinator.sync("x", Vec::<String>::new());

        let err = AnimescopeError::Transport { status: 503, message: "down".into() };
        assert!(state.apply_completion(2, Err(err)));
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.phase(), LoadPhase::Failed);
        assert!(state.notice.as_deref().is_some_and(|n| n.contains("503")));
    }

    #[test]
    fn discarded_completion_changes_nothing() {
        let mut state = loaded(2);
        state.open_detail();
        state.coordinator.sync("x", Vec::<String>::new());

        assert!(!state.apply_completion(1, Ok(vec![])));
        assert_eq!(state.results.len(), 2);
        assert!(state.focused.is_some());
    }

    #[test]
    fn grid_moves_step_by_columns() {
        let mut state = loaded(7);
        state.set_viewport(CARD_WIDTH * 3);
        assert_eq!(state.columns, 3);

        state.move_down();
        assert_eq!(state.cursor, 3);
        state.move_down();
        assert_eq!(state.cursor, 6);
        state.move_down();
        assert_eq!(state.cursor, 6);
        state.move_up();
        assert_eq!(state.cursor, 3);
        state.move_right();
        state.move_right();
        state.move_right();
        assert_eq!(state.cursor, 6);
        state.move_left();
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn move_down_lands_on_last_card_of_short_row() {
        let mut state = loaded(5);
        state.set_viewport(CARD_WIDTH * 3);
        state.cursor = 2;
        state.move_down();
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn narrow_pane_still_has_one_column() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(CARD_WIDTH * 2 + 5), 2);
    }

    #[test]
    fn window_follows_cursor() {
        let mut state = loaded(30);
        state.cursor = 29;
        let rows = CHROME_ROWS + CARD_HEIGHT * 2;
        let vm = state.compute_viewmodel(rows, CARD_WIDTH * 2);

        assert_eq!(vm.columns, 2);
        assert_eq!(vm.cards.len(), 4);
        assert!(vm.cards.last().is_some_and(|card| card.is_selected));
        assert_eq!(vm.cards[3].name, "Title 30");
    }

    #[test]
    fn cards_carry_rating_and_emotions() {
        let state = loaded(1);
        let vm = state.compute_viewmodel(40, 120);
        let card = &vm.cards[0];
        assert_eq!(card.rating_label, "Score: 8");
        assert_eq!(card.half_stars, Some(16));
        assert_eq!(card.emotions.len(), 7);
        assert_eq!(card.emotions[0].label, "Anger");
        assert_eq!(card.genre_tags, ["Action", "Drama"]);
    }

    #[test]
    fn empty_state_depends_on_phase() {
        let idle = state();
        let vm = idle.compute_viewmodel(40, 120);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("Waiting for web access".to_string()));

        let empty = loaded(0);
        let vm = empty.compute_viewmodel(40, 120);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No anime found".to_string()));
    }

    #[test]
    fn loading_overlays_stale_grid() {
        let mut state = loaded(3);
        state.coordinator.sync("again", Vec::<String>::new());
        let vm = state.compute_viewmodel(40, 120);
        assert_eq!(vm.status.kind, StatusKind::Loading);
        assert_eq!(vm.cards.len(), 3);
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn detail_uses_placeholder_for_missing_synopsis() {
        let mut state = loaded(1);
        state.open_detail();
        let vm = state.compute_viewmodel(40, 120);
        let detail = vm.detail.unwrap();
        assert_eq!(detail.synopsis_lines, ["No description available."]);
        assert_eq!(detail.genres, "Action, Drama");
    }

    #[test]
    fn picker_filters_in_vocabulary_order() {
        let mut state = state();
        state.picker.query = "sh".to_string();
        let genres: Vec<&str> = state.picker_matches().iter().map(|(g, _)| *g).collect();
        assert!(genres.contains(&"Shounen"));
        assert!(genres.contains(&"Shoujo"));
        let shounen = genres.iter().position(|g| *g == "Shounen");
        let shoujo = genres.iter().position(|g| *g == "Shoujo");
        assert!(shounen < shoujo);
    }

    #[test]
    fn picker_cursor_wraps() {
        let mut state = state();
        state.picker_move_up();
        assert_eq!(state.picker_genre().as_deref(), Some("Vampire"));
        state.picker_move_down();
        assert_eq!(state.picker_genre().as_deref(), Some("Action"));
    }

    #[test]
    fn coalesces_consecutive_indices() {
        assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), [(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}
