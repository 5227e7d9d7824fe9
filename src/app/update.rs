//! Event loop and key handling.
//!
//! Normal mode resolves keys through the [`Keymap`](crate::app::keymap::Keymap);
//! an unbound digit `1`-`9` jumps to that page. Search mode edits the filter
//! and modal mode drives whichever dialog is open.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::sidebar::{DrawerVariant, variant_for_width};
use crate::app::{AddUserField, AppState, InputMode, ModalState};
use crate::ui;

/// Draw, drain store notifications, handle one key; repeat until quit.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    app.mount();

    while !app.should_quit {
        app.drain_updates();
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let width = terminal.size()?.width;
                    handle_key(app, key, width);
                }
                _ => {}
            }
        }
    }

    tracing::info!(uptime_ms = app.started_at.elapsed().as_millis() as u64, "leaving event loop");
    Ok(())
}

/// Route a key press by input mode. `width` is the terminal width, which
/// decides whether Esc closes a temporary drawer.
pub fn handle_key(app: &mut AppState, key: KeyEvent, width: u16) {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key, width),
        InputMode::Search => handle_search_key(app, key.code),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent, width: u16) {
    if key.code == KeyCode::Esc
        && app.sidebar.open
        && variant_for_width(width, app.lg_breakpoint) == DrawerVariant::Temporary
    {
        app.sidebar.close();
        return;
    }

    let Some(action) = app.keymap.resolve(&key) else {
        if let KeyCode::Char(c @ '1'..='9') = key.code {
            if let Some(page) = c.to_digit(10) {
                app.user_list.select_page(page as usize);
            }
        }
        return;
    };
    match action {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::NewUser => app.open_add_modal(),
        KeyAction::DeleteSelection => {
            if let Some(user) = app.user_list.selected() {
                app.modal = Some(ModalState::DeleteConfirm { id: user.id, name: user.name.clone(), selected: 1 });
                app.input_mode = InputMode::Modal;
            }
        }
        KeyAction::ToggleSidebar => app.sidebar.toggle(),
        KeyAction::Refresh => app.store.fetch_users(),
        KeyAction::MoveUp => app.user_list.move_up(),
        KeyAction::MoveDown => app.user_list.move_down(),
        KeyAction::PrevPage => {
            app.user_list.prev_page();
        }
        KeyAction::NextPage => {
            app.user_list.next_page();
        }
        KeyAction::FirstPage => {
            app.user_list.first_page();
        }
        KeyAction::LastPage => {
            app.user_list.last_page();
        }
        KeyAction::Ignore => {}
    }
}

/// Every edit re-filters immediately. Enter keeps the text, Esc clears it.
fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.user_list.set_filter("");
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.user_list.pop_filter_char(),
        KeyCode::Char(c) => app.user_list.push_filter_char(c),
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::AddUser { field, draft, error }) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                *field = match field {
                    AddUserField::Name => AddUserField::Email,
                    AddUserField::Email => AddUserField::Name,
                };
            }
            KeyCode::Backspace => {
                match field {
                    AddUserField::Name => draft.name.pop(),
                    AddUserField::Email => draft.email.pop(),
                };
            }
            KeyCode::Char(c) => match field {
                AddUserField::Name => draft.name.push(c),
                AddUserField::Email => draft.email.push(c),
            },
            KeyCode::Enter => match draft.validated() {
                Ok(clean) => {
                    app.store.add_user(clean);
                    app.close_modal();
                }
                Err(e) => *error = Some(e.to_string()),
            },
            _ => {}
        },
        Some(ModalState::DeleteConfirm { id, selected, .. }) => match code {
            KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = 1 - (*selected).min(1);
            }
            KeyCode::Char('y') => {
                let id = *id;
                app.user_list.request_delete(app.store.as_ref(), id);
                app.close_modal();
            }
            KeyCode::Enter => {
                if *selected == 0 {
                    let id = *id;
                    app.user_list.request_delete(app.store.as_ref(), id);
                }
                app.close_modal();
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => app.close_modal(),
        },
        None => app.input_mode = InputMode::Normal,
    }
}
