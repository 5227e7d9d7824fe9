use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::{AddUserField, AppState, InputMode, ModalState};
use crate::ui::components::centered_rect;

/// Title plus the email search field.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let searching = app.input_mode == InputMode::Search;
    let query = app.user_list.filter_text();
    let field = if query.is_empty() && !searching {
        Span::styled("Search by email", Style::default().fg(app.theme.muted))
    } else {
        Span::styled(query.to_string(), Style::default().fg(app.theme.text))
    };
    let mut spans = vec![
        Span::styled(" Team  ", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("/ "),
        field,
    ];
    if searching {
        spans.push(Span::styled("▏", Style::default().fg(app.theme.highlight_fg)));
    }
    spans.push(Span::styled("   [n] Add user", Style::default().fg(app.theme.muted)));

    let p = Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.header_bg)).block(
        Block::default()
            .title("userdesk")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if searching { app.theme.highlight_fg } else { app.theme.border })),
    );
    f.render_widget(p, area);
}

/// Rows of the current page; the cursor row is highlighted.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.user_list;
    let rows = list.visible().iter().enumerate().map(|(i, u)| {
        let style = if i == list.cursor() {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![Cell::from(u.id.to_string()), Cell::from(u.name.clone()), Cell::from(u.email.clone())]).style(style)
    });

    let widths = [Constraint::Length(6), Constraint::Percentage(40), Constraint::Percentage(60)];
    let header = Row::new(vec!["ID", "NAME", "EMAIL"]).style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));
    let title = if list.loading() { "Users (loading…)" } else { "Users" };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);
    f.render_widget(table, area);
}

/// Pager line: `‹ 1 [2] 3 ›`. No page is bracketed when the current page is
/// past the last one.
pub fn render_pager(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.user_list;
    let mut spans = vec![Span::styled(" ‹ ", Style::default().fg(app.theme.muted))];
    for page in 1..=list.page_count() {
        if page == list.current_page() {
            spans.push(Span::styled(
                format!("[{page}] "),
                Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!("{page} "), Style::default().fg(app.theme.text)));
        }
    }
    spans.push(Span::styled("›", Style::default().fg(app.theme.muted)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_user_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    match state {
        ModalState::AddUser { field, draft, error } => {
            let rect = centered_rect(56, 9, area);
            let marker = |which: AddUserField| if *field == which { "▶" } else { " " };
            let mut lines = vec![
                Line::raw(format!("{} Name:  {}", marker(AddUserField::Name), draft.name)),
                Line::raw(format!("{} Email: {}", marker(AddUserField::Email), draft.email)),
                Line::raw(""),
            ];
            match error {
                Some(msg) => lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(app.theme.error_fg)))),
                None => lines.push(Line::raw("")),
            }
            lines.push(Line::from(Span::styled(
                "Tab: switch field  Enter: save  Esc: cancel",
                Style::default().fg(app.theme.muted),
            )));
            let p = Paragraph::new(lines)
                .block(Block::default().title("Add user").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
        ModalState::DeleteConfirm { id, name, selected } => {
            let rect = centered_rect(50, 7, area);
            let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
            let no = if *selected == 1 { "[No]" } else { " No " };
            let body = format!("Delete user '{name}' (id {id})?\n\n  {yes}    {no}");
            let p = Paragraph::new(body)
                .block(Block::default().title("Confirm delete").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
        ModalState::Help { .. } => {}
    }
}
