//! Zellij plugin wrapper and entry point.
//!
//! Everything that touches the host lives here: permissions, subscriptions,
//! key decoding, `web_request` and `hide_self`. The library never calls the
//! host, which keeps it testable on the native target.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permission**: Request `WebAccess`; granting it mounts the app and
//!    issues the initial query
//! 3. **Update**: Translate host events, delegate to `handle_event`, run the
//!    returned actions
//! 4. **Render**: Record the pane width, then call the library renderer
//!
//! # Keybindings
//!
//! Browse:
//! - `h`/`j`/`k`/`l`, arrows: Move between cards
//! - `Enter`: Open the detail view
//! - `/`: Edit the search text
//! - `g`: Open the genre picker
//! - `x`: Clear genre filters
//! - `r`: Retry the current query
//! - `Esc`: Dismiss an error notice
//! - `q`: Close the plugin
//!
//! Search:
//! - `Enter`: Search
//! - `Esc`: Leave without searching
//! - `Ctrl+u`: Clear the draft
//!
//! Genre picker:
//! - `Ctrl+n`/`Ctrl+p`, arrows: Move
//! - `Enter`/`Tab`: Toggle genre
//! - `Ctrl+x`: Clear all genres
//! - `Esc`: Close
//!
//! Detail view:
//! - `Esc`/`Enter`/`q`: Back to the grid

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use animescope::provider::{encode_request, request_context, request_headers, sequence_from_context};
use animescope::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    app: animescope::AppState,

    /// Provider URL every query is posted to.
    endpoint: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: animescope::initialize(&default_config),
            endpoint: default_config.endpoint,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        animescope::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, "parsed configuration");
        self.app = animescope::initialize(&config);
        self.endpoint = config.endpoint;

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Self::map_permission_event(status)
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(cols);
        animescope::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keys by the innermost active surface: detail view, then the
    /// picker, then the search bar, then the grid.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        if self.app.focused.is_some() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::DismissDetail),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::GenrePicker => Some(match key.bare_key {
                BareKey::Char('n') if ctrl => Event::PickerDown,
                BareKey::Char('p') if ctrl => Event::PickerUp,
                BareKey::Char('x') if ctrl => Event::ClearGenres,
                BareKey::Down => Event::PickerDown,
                BareKey::Up => Event::PickerUp,
                BareKey::Enter | BareKey::Tab => Event::ToggleGenre,
                BareKey::Esc => Event::CloseGenrePicker,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search => Some(match key.bare_key {
                BareKey::Char('u') if ctrl => Event::ClearInput,
                BareKey::Enter => Event::CommitSearch,
                BareKey::Esc => Event::LeaveSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !ctrl => Event::Char(c),
                _ => return None,
            }),
            InputMode::Browse => Some(match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::MoveLeft,
                BareKey::Right | BareKey::Char('l') => Event::MoveRight,
                BareKey::Up | BareKey::Char('k') => Event::MoveUp,
                BareKey::Down | BareKey::Char('j') => Event::MoveDown,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('g') => Event::OpenGenrePicker,
                BareKey::Char('x') => Event::ClearGenres,
                BareKey::Char('r') => Event::Retry,
                BareKey::Esc => Event::DismissNotice,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    fn map_permission_event(status: PermissionStatus) -> Event {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("web access granted - mounting");
                Event::Mounted
            }
            PermissionStatus::Denied => Event::PermissionDenied,
        }
    }

    /// Results from requests this plugin did not tag are ignored.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(seq) = sequence_from_context(context) else {
            tracing::debug!(status, "ignoring web result without a query sequence");
            return None;
        };

        tracing::debug!(seq, status, body_len = body.len(), "web request result");
        Some(Event::QueryCompleted { seq, status, body })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::IssueQuery(query) => match encode_request(&query.request) {
                Ok(body) => {
                    tracing::debug!(seq = query.seq, endpoint = %self.endpoint, "posting query");
                    web_request(
                        &self.endpoint,
                        HttpVerb::Post,
                        request_headers(),
                        body,
                        request_context(query.seq),
                    );
                }
                Err(e) => {
                    tracing::error!(seq = query.seq, error = %e, "failed to encode query");
                }
            },
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
