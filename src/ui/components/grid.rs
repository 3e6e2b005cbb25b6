//! Card grid renderer.
//!
//! ```text
//! ╭───────────────────────────────────╮
//! │ Cowboy Bebop                      │
//! │ ★★★★★★★★★☆ Score: 8.78            │
//! │ Action · Adventure · Sci-Fi       │
//! │ Anger     ███░░░░░░░░░░░░░░░░  17 │
//! │ ...                               │
//! ╰───────────────────────────────────╯
//! ```

use super::{render_emotion_row, render_star_bar};
use crate::app::state::card_inner_width;
use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CARD_HEIGHT, CARD_WIDTH};

/// Separator between genre chips on a card.
const CHIP_SEPARATOR: &str = " · ";

/// Renders `cards` row-major in a grid of `columns`, starting at `row`.
pub fn render_grid(row: usize, cards: &[CardItem], columns: usize, theme: &Theme) {
    for (idx, card) in cards.iter().enumerate() {
        let card_row = row + (idx / columns) * CARD_HEIGHT;
        let card_col = 1 + (idx % columns) * CARD_WIDTH;
        render_card(card_row, card_col, card, theme);
    }
}

fn render_card(row: usize, col: usize, card: &CardItem, theme: &Theme) {
    let inner = card_inner_width();
    let border = if card.is_selected {
        &theme.colors.card_selected_border
    } else {
        &theme.colors.card_border
    };

    position_cursor(row, col);
    print!("{}╭{}╮{}", Theme::fg(border), "─".repeat(inner + 2), Theme::reset());

    let mut line = row + 1;
    let open = |line: usize| {
        position_cursor(line, col);
        print!("{}│{} ", Theme::fg(border), Theme::reset());
    };
    let close = || print!(" {}│{}", Theme::fg(border), Theme::reset());

    open(line);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    print!("{}", card.name);
    print!("{}", Theme::reset());
    pad(inner.saturating_sub(char_len(&card.name)));
    close();
    line += 1;

    open(line);
    let mut used = render_star_bar(card.half_stars, theme);
    if used > 0 {
        print!(" ");
        used += 1;
    }
    let label = truncate(&card.rating_label, inner.saturating_sub(used));
    print!("{}{label}{}", Theme::fg(&theme.colors.rating_fg), Theme::reset());
    pad(inner.saturating_sub(used + char_len(&label)));
    close();
    line += 1;

    open(line);
    let chips = truncate(&card.genre_tags.join(CHIP_SEPARATOR), inner);
    print!("{}{chips}{}", Theme::fg(&theme.colors.chip_fg), Theme::reset());
    pad(inner.saturating_sub(char_len(&chips)));
    close();
    line += 1;

    for bar in &card.emotions {
        open(line);
        render_emotion_row(bar, inner, theme);
        close();
        line += 1;
    }

    position_cursor(line, col);
    print!("{}╰{}╯{}", Theme::fg(border), "─".repeat(inner + 2), Theme::reset());
}
