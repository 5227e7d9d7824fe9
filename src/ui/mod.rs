//! Rendering: drawer on the left, user list on the right, modals on top.
//!
pub mod components;
pub mod sidebar;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::sidebar::variant_for_width;
use crate::app::{AppState, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let screen = f.area();
    let variant = variant_for_width(screen.width, app.lg_breakpoint);
    let drawer_w = app.sidebar.reserved_width(variant).min(screen.width);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(drawer_w), Constraint::Min(10)])
        .split(screen);
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1), Constraint::Length(1)])
        .split(columns[1]);

    users::render_header(f, main[0], app);
    users::render_users_table(f, main[1], app);
    users::render_pager(f, main[2], app);
    components::render_status_bar(f, main[3], app);

    sidebar::render_sidebar(f, columns[0], screen, app, variant);

    match &app.modal {
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, screen, app, *scroll),
        Some(state) => users::render_user_modal(f, screen, app, state),
        None => {}
    }
}
