//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place the state machine advances. It never
//! calls the host: side effects come back as [`Action`]s for the plugin shim
//! to execute. The returned flag tells the shim whether to re-render.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mounted`, `PermissionDenied`, `CloseFocus`
//! - **Grid**: `MoveLeft`, `MoveRight`, `MoveUp`, `MoveDown`, `OpenDetail`,
//!   `DismissDetail`
//! - **Search**: `FocusSearch`, `Char`, `Backspace`, `ClearInput`,
//!   `CommitSearch`, `LeaveSearch`
//! - **Genres**: `OpenGenrePicker`, `CloseGenrePicker`, `PickerUp`,
//!   `PickerDown`, `ToggleGenre`, `ClearGenres`, `ReplaceGenres`
//! - **Query**: `Retry`, `DismissNotice`, `QueryCompleted`

use super::modes::InputMode;
use super::state::PickerState;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::provider;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; the initial query may run.
    Mounted,
    /// Web access was refused; no query can ever be sent.
    PermissionDenied,
    /// Hides the plugin pane.
    CloseFocus,

    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Opens the detail view for the card under the cursor.
    OpenDetail,
    DismissDetail,

    /// Moves keyboard focus to the search bar.
    FocusSearch,
    /// Types a character into the search draft or the picker query.
    Char(char),
    Backspace,
    ClearInput,
    /// Commits the search draft and leaves the search bar.
    CommitSearch,
    /// Leaves the search bar keeping the draft uncommitted.
    LeaveSearch,

    OpenGenrePicker,
    CloseGenrePicker,
    PickerUp,
    PickerDown,
    /// Toggles the genre under the picker cursor.
    ToggleGenre,
    ClearGenres,
    /// Replaces the genre selection wholesale.
    ReplaceGenres(Vec<String>),

    /// Re-issues the current query.
    Retry,
    DismissNotice,

    /// A `web_request` for query `seq` finished.
    QueryCompleted {
        seq: u64,
        status: u16,
        body: Vec<u8>,
    },
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that load
/// resources.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::Mounted => {
            if state.coordinator.is_mounted() {
                tracing::debug!("already mounted, ignoring");
                return Ok((false, vec![]));
            }
            tracing::debug!("mounted, issuing initial query");
            Ok((true, sync_query(state)))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access denied, queries disabled");
            state.notice = Some("Web access was denied; titles cannot be loaded".to_string());
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::MoveLeft => Ok((move_cursor(state, AppState::move_left), vec![])),
        Event::MoveRight => Ok((move_cursor(state, AppState::move_right), vec![])),
        Event::MoveUp => Ok((move_cursor(state, AppState::move_up), vec![])),
        Event::MoveDown => Ok((move_cursor(state, AppState::move_down), vec![])),
        Event::OpenDetail => Ok((state.open_detail(), vec![])),
        Event::DismissDetail => Ok((state.dismiss_detail(), vec![])),

        Event::FocusSearch => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search => {
                state.input.insert(*c);
                tracing::trace!(draft = %state.input.draft(), "draft updated");
                Ok((true, vec![]))
            }
            InputMode::GenrePicker => {
                state.picker.query.push(*c);
                state.picker.cursor = 0;
                Ok((true, vec![]))
            }
            InputMode::Browse => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search => {
                state.input.backspace();
                Ok((true, vec![]))
            }
            InputMode::GenrePicker => {
                state.picker.query.pop();
                state.picker.cursor = 0;
                Ok((true, vec![]))
            }
            InputMode::Browse => Ok((false, vec![])),
        },
        Event::ClearInput => match state.input_mode {
            InputMode::Search => {
                state.input.clear();
                Ok((true, vec![]))
            }
            InputMode::GenrePicker => {
                state.picker = PickerState::default();
                Ok((true, vec![]))
            }
            InputMode::Browse => Ok((false, vec![])),
        },
        Event::CommitSearch => {
            state.input.commit();
            state.input_mode = InputMode::Browse;
            Ok((true, issue_if_changed(state)))
        }
        Event::LeaveSearch => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }

        Event::OpenGenrePicker => {
            state.input_mode = InputMode::GenrePicker;
            state.picker = PickerState::default();
            Ok((true, vec![]))
        }
        Event::CloseGenrePicker => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::PickerUp => {
            state.picker_move_up();
            Ok((true, vec![]))
        }
        Event::PickerDown => {
            state.picker_move_down();
            Ok((true, vec![]))
        }
        Event::ToggleGenre => {
            let Some(genre) = state.picker_genre() else {
                return Ok((false, vec![]));
            };
            state.filters.toggle(&genre);
            Ok((true, issue_if_changed(state)))
        }
        Event::ClearGenres => {
            if !state.filters.clear() {
                return Ok((false, vec![]));
            }
            Ok((true, issue_if_changed(state)))
        }
        Event::ReplaceGenres(genres) => {
            if !state.filters.replace(genres.iter().cloned()) {
                return Ok((false, vec![]));
            }
            Ok((true, issue_if_changed(state)))
        }

        Event::Retry => {
            let Some(query) = state.coordinator.retrigger() else {
                tracing::debug!("nothing to retry before mount");
                return Ok((false, vec![]));
            };
            state.on_query_issued();
            Ok((true, vec![Action::IssueQuery(query)]))
        }
        Event::DismissNotice => Ok((state.notice.take().is_some(), vec![])),

        Event::QueryCompleted { seq, status, body } => {
            let outcome = provider::decode_response(*status, body);
            tracing::debug!(
                seq = seq,
                status = status,
                body_len = body.len(),
                ok = outcome.is_ok(),
                "query response received"
            );
            Ok((state.apply_completion(*seq, outcome), vec![]))
        }
    }
}

/// Syncs the coordinator once mounted; edits made before mount are picked up
/// by the initial query.
fn issue_if_changed(state: &mut AppState) -> Vec<Action> {
    if !state.coordinator.is_mounted() {
        tracing::debug!("not mounted, query deferred");
        return vec![];
    }
    sync_query(state)
}

/// Syncs the coordinator with the committed text and selected genres.
fn sync_query(state: &mut AppState) -> Vec<Action> {
    let Some(query) = state
        .coordinator
        .sync(state.input.committed(), state.filters.selected().iter().cloned())
    else {
        return vec![];
    };

    state.on_query_issued();
    vec![Action::IssueQuery(query)]
}

fn move_cursor(state: &mut AppState, step: fn(&mut AppState)) -> bool {
    let before = state.cursor;
    step(state);
    state.cursor != before
}

/// Debug view of an event that omits response bodies.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::QueryCompleted { seq, status, .. } => {
                write!(f, "QueryCompleted {{ seq: {seq}, status: {status} }}")
            }
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coordinator::LoadPhase;
    use crate::domain::GenreVocabulary;
    use crate::ui::theme::Theme;
    use std::sync::Arc;

    const BODY: &[u8] = br#"[{"MAL_ID": 1, "Name": "Cowboy Bebop", "Score": "8.78",
        "Genres": "Action, Space", "anger": 0.1, "disgust": 0.0, "fear": 0.1,
        "sadness": 0.2, "happiness": 0.4, "neutral": 0.1, "surprise": 0.1,
        "sypnopsis": "Bounty hunters."}]"#;

    fn state() -> AppState {
        AppState::new(Arc::new(GenreVocabulary::default()), Theme::default())
    }

    fn issued(actions: &[Action]) -> Vec<u64> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::IssueQuery(query) => Some(query.seq),
                Action::CloseFocus => None,
            })
            .collect()
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn mounted() -> AppState {
        let mut state = state();
        run(&mut state, Event::Mounted);
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            run(state, Event::Char(c));
        }
    }

    #[test]
    fn mount_issues_one_unfiltered_query() {
        let mut state = state();
        let actions = run(&mut state, Event::Mounted);
        match actions.as_slice() {
            [Action::IssueQuery(query)] => {
                assert_eq!(query.seq, 1);
                assert_eq!(query.request.query, "");
                assert!(query.request.genres.is_empty());
            }
            other => panic!("unexpected actions: {other:?}"),
        }
        assert!(run(&mut state, Event::Mounted).is_empty());
    }

    #[test]
    fn nothing_is_issued_before_mount() {
        let mut state = state();
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "naruto");
        assert!(run(&mut state, Event::CommitSearch).is_empty());
        assert!(run(&mut state, Event::ReplaceGenres(vec!["Action".into()])).is_empty());
        assert!(run(&mut state, Event::Retry).is_empty());

        let actions = run(&mut state, Event::Mounted);
        match actions.as_slice() {
            [Action::IssueQuery(query)] => {
                assert_eq!(query.request.query, "naruto");
                assert_eq!(query.request.genres, ["Action"]);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn typing_without_commit_issues_nothing() {
        let mut state = mounted();
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "one piece");
        assert_eq!(state.coordinator.issued_seq(), 1);

        let actions = run(&mut state, Event::CommitSearch);
        assert_eq!(issued(&actions), [2]);
        assert_eq!(state.input_mode, InputMode::Browse);
    }

    #[test]
    fn commit_of_unchanged_text_issues_nothing() {
        let mut state = mounted();
        run(&mut state, Event::FocusSearch);
        assert!(run(&mut state, Event::CommitSearch).is_empty());
    }

    #[test]
    fn leave_search_keeps_uncommitted_draft() {
        let mut state = mounted();
        run(&mut state, Event::FocusSearch);
        type_text(&mut state, "bebop");
        assert!(run(&mut state, Event::LeaveSearch).is_empty());
        assert_eq!(state.input.draft(), "bebop");
        assert_eq!(state.input.committed(), "");
    }

    #[test]
    fn browse_mode_ignores_characters() {
        let mut state = mounted();
        let (render, actions) = handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.input.draft(), "");
    }

    #[test]
    fn genre_change_issues_immediately() {
        let mut state = mounted();
        let actions = run(&mut state, Event::ReplaceGenres(vec!["Drama".into(), "Action".into()]));
        assert_eq!(issued(&actions), [2]);

        let reordered = vec!["Action".into(), "Drama".into()];
        assert!(run(&mut state, Event::ReplaceGenres(reordered)).is_empty());
    }

    #[test]
    fn picker_toggle_uses_filtered_entry() {
        let mut state = mounted();
        run(&mut state, Event::OpenGenrePicker);
        type_text(&mut state, "slice");
        let actions = run(&mut state, Event::ToggleGenre);

        assert_eq!(state.filters.selected(), ["Slice of Life"]);
        match actions.as_slice() {
            [Action::IssueQuery(query)] => assert_eq!(query.request.genres, ["Slice of Life"]),
            other => panic!("unexpected actions: {other:?}"),
        }

        run(&mut state, Event::ToggleGenre);
        assert!(state.filters.selected().is_empty());
        assert_eq!(state.coordinator.issued_seq(), 3);
    }

    #[test]
    fn clear_genres_only_issues_on_change() {
        let mut state = mounted();
        assert!(run(&mut state, Event::ClearGenres).is_empty());
        run(&mut state, Event::ReplaceGenres(vec!["Horror".into()]));
        assert_eq!(issued(&run(&mut state, Event::ClearGenres)), [3]);
    }

    #[test]
    fn completion_projects_records() {
        let mut state = mounted();
        let (render, _) = handle_event(
            &mut state,
            &Event::QueryCompleted { seq: 1, status: 200, body: BODY.to_vec() },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert_eq!(state.results[0].name, "Cowboy Bebop");
        assert_eq!(state.results[0].genre_tags, ["Action", "Space"]);
    }

    #[test]
    fn stale_completion_does_not_render() {
        let mut state = mounted();
        run(&mut state, Event::ReplaceGenres(vec!["Action".into()]));

        let (render, _) = handle_event(
            &mut state,
            &Event::QueryCompleted { seq: 1, status: 200, body: BODY.to_vec() },
        )
        .unwrap();
        assert!(!render);
        assert!(state.results.is_empty());
        assert_eq!(state.phase(), LoadPhase::Loading);
    }

    #[test]
    fn server_error_sets_notice_and_retry_clears_it() {
        let mut state = mounted();
        run(&mut state, Event::QueryCompleted { seq: 1, status: 200, body: BODY.to_vec() });
        run(&mut state, Event::Retry);
        run(
            &mut state,
            Event::QueryCompleted { seq: 2, status: 500, body: b"boom".to_vec() },
        );

        assert_eq!(state.phase(), LoadPhase::Failed);
        assert_eq!(state.results.len(), 1);
        assert!(state.notice.is_some());

        let actions = run(&mut state, Event::Retry);
        assert_eq!(issued(&actions), [3]);
        assert!(state.notice.is_none());
    }

    #[test]
    fn dismiss_notice_renders_only_when_present() {
        let mut state = mounted();
        let (render, _) = handle_event(&mut state, &Event::DismissNotice).unwrap();
        assert!(!render);

        run(&mut state, Event::PermissionDenied);
        let (render, _) = handle_event(&mut state, &Event::DismissNotice).unwrap();
        assert!(render);
    }

    #[test]
    fn detail_open_and_close_leave_results_alone() {
        let mut state = mounted();
        run(&mut state, Event::QueryCompleted { seq: 1, status: 200, body: BODY.to_vec() });

        run(&mut state, Event::OpenDetail);
        assert_eq!(state.focused.as_ref().map(|m| m.id), Some(1));

        run(&mut state, Event::DismissDetail);
        assert!(state.focused.is_none());
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn open_detail_without_results_is_noop() {
        let mut state = mounted();
        let (render, _) = handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(!render);
        assert!(state.focused.is_none());
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::CloseFocus), [Action::CloseFocus]);
    }
}
