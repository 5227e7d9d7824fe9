use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::app::sidebar::{ACTIVE_ITEM, DrawerVariant, EXPANDED_WIDTH, SIDEBAR_ITEMS};

/// Draw the drawer. A permanent drawer fills `slot`; a temporary one is
/// an overlay over the left edge of `screen` and is skipped while closed.
pub fn render_sidebar(f: &mut Frame, slot: Rect, screen: Rect, app: &AppState, variant: DrawerVariant) {
    let (area, expanded) = match variant {
        DrawerVariant::Permanent => (slot, app.sidebar.open),
        DrawerVariant::Temporary if app.sidebar.open => {
            let overlay = Rect { width: EXPANDED_WIDTH.min(screen.width), ..screen };
            f.render_widget(Clear, overlay);
            (overlay, true)
        }
        DrawerVariant::Temporary => return,
    };
    if area.width == 0 {
        return;
    }

    let base = Style::default().fg(app.theme.sidebar_fg).bg(app.theme.sidebar_bg);
    let mut lines = vec![Line::raw("")];
    if expanded {
        lines.push(Line::from(Span::styled(format!(" @{}", app.operator), base.add_modifier(Modifier::BOLD))));
        lines.push(Line::raw(""));
    }
    for (idx, (title, glyph)) in SIDEBAR_ITEMS.iter().enumerate() {
        let style = if idx == ACTIVE_ITEM {
            base.fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            base
        };
        let text = if expanded { format!(" {glyph} {title}") } else { format!(" {glyph}") };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let p = Paragraph::new(lines)
        .style(base)
        .block(Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(p, area);
}
