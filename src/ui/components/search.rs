//! Search bar component renderer.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box and returns the row below it.
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Search: cowboy█  (unsaved)   │
/// └──────────────────────────────┘
/// ```
///
/// The border switches to the focus color while the bar takes keystrokes.
/// A draft that differs from the committed query is marked so it is clear
/// the results do not reflect it yet.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let caret = if search.is_focused { "█" } else { "" };
    let marker = if search.is_dirty { "  (Enter to search)" } else { "" };
    let search_text = truncate(
        &format!(" Search: {}{caret}", search.query),
        inner_width.saturating_sub(char_len(marker)),
    );
    let padding = inner_width.saturating_sub(char_len(&search_text) + char_len(marker));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{marker}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
