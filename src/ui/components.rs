//! Shared UI components (status bar, help dialog, modal placement).
//!
use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{Keymap, format_action};
use crate::app::{AppState, InputMode};

/// Render the bottom status bar with mode, counts, and the last store error.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let list = &app.user_list;
    let mut spans = vec![Span::raw(format!(
        " mode: {mode}  users:{}  shown:{}  page:{}/{}",
        list.source().len(),
        list.filtered().len(),
        list.current_page(),
        list.page_count(),
    ))];
    if list.loading() {
        spans.push(Span::raw("  loading…"));
    }
    if let Some(err) = &app.last_error {
        spans.push(Span::styled(format!("  error: {err}"), Style::default().fg(app.theme.error_fg)));
    }
    let p = Paragraph::new(Line::from(spans)).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Rectangle of `width`x`height` centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the keybindings reference, grouped by action.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(30);
    let height = 24u16.min(area.height.saturating_sub(2)).max(8);
    let rect = centered_rect(width, height, area);

    let mut by_action: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        by_action.entry(format_action(action)).or_default().push(Keymap::format_key(mods, code));
    }

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (action, mut keys) in by_action {
        keys.sort();
        lines.push(Line::from(vec![
            Span::raw(format!("  {action:>16} │ ")),
            Span::styled(keys.join(", "), Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  1-9 jump to page; Esc closes a temporary drawer"));
    lines.push(Line::raw("  search: type to filter by email, Enter keeps, Esc clears"));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_shrinks_to_area() {
        let area = Rect { x: 2, y: 1, width: 20, height: 6 };
        let r = centered_rect(40, 4, area);
        assert_eq!(r, Rect { x: 2, y: 2, width: 20, height: 4 });
    }
}
