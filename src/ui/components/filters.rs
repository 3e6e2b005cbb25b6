//! Genre filter bar renderer.

use crate::ui::helpers::{char_len, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the selected genres as chips on one line.
///
/// Chips that do not fit are summarized as `+N more`.
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    const LABEL: &str = "  Genres: ";

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{LABEL}");
    let mut used = char_len(LABEL);

    if filters.chips.is_empty() {
        print!("all (press g to filter)");
        used += 23;
    } else {
        for (idx, chip) in filters.chips.iter().enumerate() {
            let width = char_len(chip) + 3;
            let remaining = filters.chips.len() - idx;
            let overflow = format!("+{remaining} more");

            if used + width + char_len(&overflow) + 1 > cols && idx + 1 < filters.chips.len() {
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("{overflow}");
                used += char_len(&overflow);
                break;
            }

            print!("{}", Theme::fg(&theme.colors.chip_fg));
            if let Some(bg) = &theme.colors.chip_bg {
                print!("{}", Theme::bg(bg));
            }
            print!(" {chip} ");
            print!("{} ", Theme::reset());
            used += width;
        }
    }

    print!("{}", Theme::reset());
    pad(cols.saturating_sub(used));
    row + 1
}
