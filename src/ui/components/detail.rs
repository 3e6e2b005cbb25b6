//! Detail overlay renderer.

use super::{render_emotion_row, render_star_bar};
use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, OVERLAY_MARGIN};

/// First row of the overlay, just below the header border.
const TOP_ROW: usize = 4;

/// Widest the emotion bars get, so they stay readable on wide panes.
const MAX_EMOTION_WIDTH: usize = 60;

/// Bordered box that prints one padded line at a time.
struct Frame<'a> {
    row: usize,
    last_row: usize,
    col: usize,
    inner: usize,
    border: &'a str,
}

impl Frame<'_> {
    /// Content rows left before the bottom border.
    const fn remaining(&self) -> usize {
        self.last_row.saturating_sub(self.row)
    }

    /// Prints one line; `body` prints the content and returns its width.
    fn line(&mut self, body: impl FnOnce() -> usize) {
        if self.row >= self.last_row {
            return;
        }

        position_cursor(self.row, self.col);
        print!("{}│{} ", Theme::fg(self.border), Theme::reset());
        let used = body();
        pad(self.inner.saturating_sub(used));
        print!(" {}│{}", Theme::fg(self.border), Theme::reset());
        self.row += 1;
    }

    fn edge(&self, row: usize, left: &str, right: &str) {
        position_cursor(row, self.col);
        print!(
            "{}{left}{}{right}{}",
            Theme::fg(self.border),
            "─".repeat(self.inner + 2),
            Theme::reset()
        );
    }
}

/// Renders the focused title over the grid, from [`TOP_ROW`] to the row
/// above `bottom_limit`.
///
/// Synopsis lines that do not fit are cut and the last visible one ends in
/// `...`.
pub fn render_detail(detail: &DetailView, theme: &Theme, cols: usize, bottom_limit: usize) {
    let inner = cols.saturating_sub(OVERLAY_MARGIN * 2 + 4);
    let last_row = bottom_limit.saturating_sub(1);
    if inner == 0 || last_row <= TOP_ROW + 1 {
        return;
    }

    let mut frame = Frame {
        row: TOP_ROW + 1,
        last_row,
        col: OVERLAY_MARGIN + 1,
        inner,
        border: &theme.colors.card_selected_border,
    };
    frame.edge(TOP_ROW, "╭", "╮");

    frame.line(|| {
        let name = truncate(&detail.name, inner);
        print!("{}{}{name}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
        char_len(&name)
    });
    frame.line(|| {
        let mut used = render_star_bar(detail.half_stars, theme);
        if used > 0 {
            print!(" ");
            used += 1;
        }
        let label = truncate(&detail.rating_label, inner.saturating_sub(used));
        print!("{}{label}{}", Theme::fg(&theme.colors.rating_fg), Theme::reset());
        used + char_len(&label)
    });
    frame.line(|| {
        let genres = truncate(&format!("Genres: {}", detail.genres), inner);
        print!("{}{genres}{}", Theme::fg(&theme.colors.chip_fg), Theme::reset());
        char_len(&genres)
    });
    frame.line(|| 0);

    let bar_width = inner.min(MAX_EMOTION_WIDTH);
    for bar in &detail.emotions {
        frame.line(|| {
            render_emotion_row(bar, bar_width, theme);
            bar_width
        });
    }
    frame.line(|| 0);
    frame.line(|| {
        print!("{}{}Synopsis{}", Theme::bold(), Theme::fg(&theme.colors.text_dim), Theme::reset());
        char_len("Synopsis")
    });

    let shown = detail.synopsis_lines.len().min(frame.remaining());
    for (idx, text) in detail.synopsis_lines.iter().take(shown).enumerate() {
        let cut = idx + 1 == shown && shown < detail.synopsis_lines.len();
        frame.line(|| {
            let text = if cut {
                truncate(&format!("{text}..."), inner)
            } else {
                truncate(text, inner)
            };
            print!("{}{text}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
            char_len(&text)
        });
    }

    while frame.remaining() > 0 {
        frame.line(|| 0);
    }
    frame.edge(last_row, "╰", "╯");
}
