//! Status line renderer.

use crate::ui::helpers::{char_len, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusInfo, StatusKind};

pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let color = match status.kind {
        StatusKind::Info => &theme.colors.text_dim,
        StatusKind::Loading => &theme.colors.loading_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };
    let text = truncate(&format!("  {}", status.text), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{text}");
    print!("{}", Theme::reset());
    pad(cols.saturating_sub(char_len(&text)));
    row + 1
}
