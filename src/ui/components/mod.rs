//! Composable UI component renderers.
//!
//! Each component prints its part of the frame at explicit cursor positions
//! and returns the next free row where that is meaningful.
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Filter Bar]
//! [Status Line]
//! [Card Grid or Empty State]
//! [Border]
//! [Footer]
//! ```
//!
//! The detail view and the genre picker are overlays drawn last, on top of
//! the grid.

mod detail;
mod empty;
mod filters;
mod footer;
mod grid;
mod header;
mod picker;
mod search;
mod status;

use crate::ui::helpers::{bar_cells, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmotionBar, UIViewModel, STAR_COUNT};

/// Width of the emotion label column.
const EMOTION_LABEL_WIDTH: usize = 9;

/// Renders the full frame for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = search::render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = filters::render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    current_row = status::render_status(current_row, &vm.status, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        grid::render_grid(current_row, &vm.cards, vm.columns, theme);
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(picker) = &vm.picker {
        picker::render_picker(picker, theme, cols, border_row);
    }
    if let Some(detail) = &vm.detail {
        detail::render_detail(detail, theme, cols, border_row);
    }
}

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Prints a star bar of [`STAR_COUNT`] stars, `half_stars` halves filled.
///
/// Returns the number of columns printed.
fn render_star_bar(half_stars: Option<usize>, theme: &Theme) -> usize {
    let Some(half_stars) = half_stars else {
        return 0;
    };

    let full = (half_stars / 2).min(STAR_COUNT);
    let half = usize::from(half_stars % 2 == 1 && full < STAR_COUNT);
    let empty = STAR_COUNT - full - half;

    print!("{}", Theme::fg(&theme.colors.rating_fg));
    print!("{}", "★".repeat(full));
    if half == 1 {
        print!("⯪");
    }
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", "☆".repeat(empty));
    print!("{}", Theme::reset());
    STAR_COUNT
}

/// Prints one labelled emotion bar spanning exactly `width` columns.
fn render_emotion_row(bar: &EmotionBar, width: usize, theme: &Theme) {
    let bar_width = width.saturating_sub(EMOTION_LABEL_WIDTH + 5);
    let (filled, empty) = bar_cells(bar.value, bar_width);

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{:<EMOTION_LABEL_WIDTH$} ", bar.label);
    print!("{}", Theme::fg(&theme.colors.emotion_bar_fg));
    print!("{}", "█".repeat(filled));
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "░".repeat(empty));
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!(" {:>3.0}", bar.value);
    print!("{}", Theme::reset());

    let used = EMOTION_LABEL_WIDTH + 1 + bar_width + 4;
    pad(width.saturating_sub(used));
}
