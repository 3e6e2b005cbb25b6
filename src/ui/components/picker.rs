//! Genre picker overlay renderer.

use crate::ui::helpers::{char_len, pad, position_cursor, render_highlighted_text, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GenrePickerView, OVERLAY_MARGIN};

const TOP_ROW: usize = 4;
const MAX_WIDTH: usize = 44;

/// Renders the picker as a bordered list anchored at the left margin.
///
/// ```text
/// ╭ Genres (2 selected) ─────────╮
/// │ Filter: sh█                  │
/// ├──────────────────────────────┤
/// │ [x] Shounen                  │
/// │ [ ] Shoujo                   │
/// ╰──────────────────────────────╯
/// ```
pub fn render_picker(picker: &GenrePickerView, theme: &Theme, cols: usize, bottom_limit: usize) {
    let box_width = cols.saturating_sub(OVERLAY_MARGIN * 2).min(MAX_WIDTH);
    let inner = box_width.saturating_sub(4);
    if inner < 8 || bottom_limit <= TOP_ROW + 4 {
        return;
    }

    let border = theme.colors.search_bar_focus.as_str();
    let col = OVERLAY_MARGIN + 1;

    let title = truncate(&format!(" Genres ({} selected) ", picker.selected_count), inner + 1);
    position_cursor(TOP_ROW, col);
    print!("{}╭{title}{}╮{}", Theme::fg(border), "─".repeat((inner + 2).saturating_sub(char_len(&title))), Theme::reset());

    let query = truncate(&format!("Filter: {}█", picker.query), inner);
    position_cursor(TOP_ROW + 1, col);
    print!("{}│{} {query}", Theme::fg(border), Theme::fg(&theme.colors.text_normal));
    pad(inner.saturating_sub(char_len(&query)));
    print!(" {}│{}", Theme::fg(border), Theme::reset());

    position_cursor(TOP_ROW + 2, col);
    print!("{}├{}┤{}", Theme::fg(border), "─".repeat(inner + 2), Theme::reset());

    let mut row = TOP_ROW + 3;
    let last_entry_row = bottom_limit.saturating_sub(2);

    if picker.entries.is_empty() {
        position_cursor(row, col);
        let text = truncate("No matching genres", inner);
        print!("{}│{} {}{text}", Theme::fg(border), Theme::reset(), Theme::fg(&theme.colors.text_dim));
        pad(inner.saturating_sub(char_len(&text)));
        print!(" {}│{}", Theme::fg(border), Theme::reset());
        row += 1;
    }

    for entry in &picker.entries {
        if row > last_entry_row {
            break;
        }

        let style = if entry.is_cursor {
            format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        let check = if entry.is_checked { "[x] " } else { "[ ] " };
        let genre = truncate(&entry.genre, inner.saturating_sub(check.len()));

        position_cursor(row, col);
        print!("{}│{} {style}{check}", Theme::fg(border), Theme::reset());
        render_highlighted_text(&genre, &entry.highlight_ranges, theme, &style);
        pad(inner.saturating_sub(check.len() + char_len(&genre)));
        print!("{} {}│{}", Theme::reset(), Theme::fg(border), Theme::reset());
        row += 1;
    }

    position_cursor(row, col);
    print!("{}╰{}╯{}", Theme::fg(border), "─".repeat(inner + 2), Theme::reset());
}
