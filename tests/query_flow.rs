//! End-to-end query flows driven through `handle_event`, the way the plugin
//! shim drives them.

use std::collections::BTreeMap;

use animescope::app::LoadPhase;
use animescope::provider::{request_context, sequence_from_context};
use animescope::ui::StatusKind;
use animescope::{handle_event, initialize, Action, AppState, Config, Event, InputMode};

fn record(id: u64, name: &str, score: &str, genres: &str) -> String {
    format!(
        r#"{{"MAL_ID": {id}, "Name": "{name}", "Score": "{score}", "Genres": "{genres}",
            "anger": 0.05, "disgust": 0.0, "fear": 0.1, "sadness": 0.3,
            "happiness": 0.35, "neutral": 0.1, "surprise": 0.1,
            "sypnopsis": "A story about {name}."}}"#
    )
}

fn body(records: &[String]) -> Vec<u8> {
    format!("[{}]", records.join(",")).into_bytes()
}

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

/// Issued query sequence numbers, in order.
fn issued(actions: &[Action]) -> Vec<u64> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::IssueQuery(query) => Some(query.seq),
            Action::CloseFocus => None,
        })
        .collect()
}

fn search(state: &mut AppState, text: &str) -> Vec<u64> {
    send(state, Event::FocusSearch);
    for c in text.chars() {
        send(state, Event::Char(c));
    }
    issued(&send(state, Event::CommitSearch).1)
}

fn complete(state: &mut AppState, seq: u64, status: u16, body: Vec<u8>) -> bool {
    send(state, Event::QueryCompleted { seq, status, body }).0
}

fn mounted() -> AppState {
    let mut state = initialize(&Config::default());
    state.set_viewport(120);
    let (_, actions) = send(&mut state, Event::Mounted);
    assert_eq!(issued(&actions), [1]);
    state
}

#[test]
fn later_query_wins_when_responses_arrive_out_of_order() {
    let mut state = mounted();

    let first = search(&mut state, "space cowboys");
    let second = search(&mut state, "giant robots");
    assert_eq!(first, [2]);
    assert_eq!(second, [3]);

    let robots = body(&[record(30, "Neon Genesis Evangelion", "8.32", "Mecha, Psychological")]);
    let cowboys = body(&[record(1, "Cowboy Bebop", "8.78", "Action, Space")]);

    assert!(complete(&mut state, 3, 200, robots));
    assert!(!complete(&mut state, 2, 200, cowboys));
    assert!(!complete(&mut state, 1, 200, body(&[])));

    assert_eq!(state.phase(), LoadPhase::Loaded);
    assert_eq!(state.results.len(), 1);
    assert_eq!(state.results[0].name, "Neon Genesis Evangelion");
}

#[test]
fn failed_query_keeps_previous_results_visible() {
    let mut state = mounted();
    complete(
        &mut state,
        1,
        200,
        body(&[
            record(1, "Cowboy Bebop", "8.78", "Action, Space"),
            record(5, "Trigun", "8.24", "Action, Sci-Fi"),
        ]),
    );

    let seq = search(&mut state, "melancholy");
    assert!(complete(&mut state, seq[0], 500, b"Error getting recommendations".to_vec()));

    assert_eq!(state.phase(), LoadPhase::Failed);
    assert_eq!(state.results.len(), 2);

    let vm = state.compute_viewmodel(40, 120);
    assert_eq!(vm.status.kind, StatusKind::Error);
    assert!(vm.status.text.contains("HTTP 500"));
    assert!(vm.empty_state.is_none());
    assert_eq!(vm.cards.len(), 2);

    let (_, actions) = send(&mut state, Event::Retry);
    assert_eq!(issued(&actions), [seq[0] + 1]);
    assert!(state.notice.is_none());
}

#[test]
fn malformed_body_fails_the_current_query() {
    let mut state = mounted();
    assert!(complete(&mut state, 1, 200, b"<html>gateway</html>".to_vec()));

    assert_eq!(state.phase(), LoadPhase::Failed);
    let vm = state.compute_viewmodel(40, 120);
    let empty = vm.empty_state.unwrap();
    assert_eq!(empty.message, "Could not load titles");
}

#[test]
fn uncommitted_draft_never_reaches_the_provider() {
    let mut state = mounted();

    send(&mut state, Event::FocusSearch);
    for c in "isekai".chars() {
        let (_, actions) = send(&mut state, Event::Char(c));
        assert!(actions.is_empty());
    }
    send(&mut state, Event::LeaveSearch);

    let (_, actions) = send(&mut state, Event::OpenGenrePicker);
    assert!(actions.is_empty());
    assert_eq!(state.input_mode, InputMode::GenrePicker);

    for c in "mecha".chars() {
        send(&mut state, Event::Char(c));
    }
    let (_, actions) = send(&mut state, Event::ToggleGenre);
    let [Action::IssueQuery(query)] = actions.as_slice() else {
        panic!("expected one query, got {actions:?}");
    };
    assert_eq!(query.request.query, "");
    assert_eq!(query.request.genres, ["Mecha"]);
    assert_eq!(state.input.draft(), "isekai");
}

#[test]
fn new_query_closes_the_detail_view() {
    let mut state = mounted();
    complete(&mut state, 1, 200, body(&[record(1, "Cowboy Bebop", "8.78", "Action, Space")]));

    send(&mut state, Event::OpenDetail);
    assert!(state.focused.is_some());

    let vm = state.compute_viewmodel(40, 120);
    let detail = vm.detail.unwrap();
    assert_eq!(detail.name, "Cowboy Bebop");
    assert_eq!(detail.genres, "Action, Space");

    send(&mut state, Event::ReplaceGenres(vec!["Romance".to_string()]));
    assert!(state.focused.is_none());
    assert_eq!(state.phase(), LoadPhase::Loading);
}

#[test]
fn unknown_score_renders_as_not_available() {
    let mut state = mounted();
    complete(
        &mut state,
        1,
        200,
        body(&[record(99, "Obscure OVA", "Unknown", "")]),
    );

    let model = &state.results[0];
    assert!(model.rating.is_none());
    assert!(model.genre_tags.is_empty());

    let vm = state.compute_viewmodel(40, 120);
    assert_eq!(vm.cards[0].rating_label, "Score: N/A");
    assert!(vm.cards[0].half_stars.is_none());
}

#[test]
fn sequence_survives_the_request_context() {
    let context = request_context(42);
    assert_eq!(sequence_from_context(&context), Some(42));

    let foreign: BTreeMap<String, String> =
        [("request_seq".to_string(), "42".to_string())].into_iter().collect();
    assert_eq!(sequence_from_context(&foreign), None);
}

#[test]
fn permission_denied_never_issues() {
    let mut state = initialize(&Config::default());
    let (render, actions) = send(&mut state, Event::PermissionDenied);
    assert!(render);
    assert!(actions.is_empty());

    assert!(search(&mut state, "anything").is_empty());
    assert!(issued(&send(&mut state, Event::Retry).1).is_empty());
    assert_eq!(state.phase(), LoadPhase::Idle);
}
