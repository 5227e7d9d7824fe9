//! Application state types and entry glue.
//!
//! Defines the state of the dashboard (user list, drawer, modal, input mode)
//! and re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod sidebar;
pub mod update;
pub mod user_list;

use ratatui::style::Color;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crate::store::{NewUser, StoreState, UserId, UserStore};
use keymap::Keymap;
use sidebar::{DEFAULT_LG_BREAKPOINT, SidebarState};
use user_list::UserList;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub sidebar_bg: Color,
    pub sidebar_fg: Color,
    pub error_fg: Color,
}

const THEME_KEYS: &[&str] = &[
    "text",
    "muted",
    "title",
    "border",
    "header_bg",
    "header_fg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
    "sidebar_bg",
    "sidebar_fg",
    "error_fg",
];

impl Theme {
    /// Catppuccin Mocha palette; the drawer uses the darker crust tones.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0x89, 0xb4, 0xfa),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            sidebar_bg: Color::Rgb(0x11, 0x11, 0x1b),
            sidebar_fg: Color::Rgb(0xff, 0xff, 0xff),
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "sidebar_bg" => &mut self.sidebar_bg,
            "sidebar_fg" => &mut self.sidebar_fg,
            "error_fg" => &mut self.error_fg,
            _ => return None,
        })
    }

    /// Load a key=value theme file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(slot), Some(color)) = (theme.slot(key.trim()), parse_color(val)) {
                *slot = color;
            }
        }
        Some(theme)
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdesk theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for key in THEME_KEYS {
            if let Some(color) = copy.slot(key) {
                let _ = writeln!(&mut buf, "{key} = {}", color_to_str(*color));
            }
        }
        std::fs::write(path, buf)
    }

    /// Load `path`, or write the default theme there if it does not exist.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(path, error = %e, "could not write default theme");
        }
        t
    }
}

/// Parse `#RRGGBB`, `RRGGBB` or `reset`.
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        Color::Reset => "reset".to_string(),
        Color::Black => "#000000".to_string(),
        Color::White => "#FFFFFF".to_string(),
        Color::Gray => "#B3B3B3".to_string(),
        Color::DarkGray => "#4D4D4D".to_string(),
        other => {
            tracing::debug!(color = ?other, "named color written as reset");
            "reset".to_string()
        }
    }
}

/// Field focused in the add-user form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddUserField {
    Name,
    Email,
}

/// Modal dialogs. The add-user form is the list's "modal open" flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    AddUser {
        field: AddUserField,
        draft: NewUser,
        error: Option<String>,
    },
    DeleteConfirm {
        id: UserId,
        name: String,
        /// 0 = Yes, 1 = No
        selected: usize,
    },
    Help {
        scroll: u16,
    },
}

/// Settings assembled from the command line.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub lg_breakpoint: u16,
    pub theme_path: Option<String>,
    pub keybinds_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { lg_breakpoint: DEFAULT_LG_BREAKPOINT, theme_path: None, keybinds_path: None }
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub store: Box<dyn UserStore>,
    updates: Receiver<StoreState>,
    pub user_list: UserList,
    pub last_error: Option<String>,
    pub sidebar: SidebarState,
    pub lg_breakpoint: u16,
    pub operator: String,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub should_quit: bool,
}

impl AppState {
    /// Subscribe to `store` and build the list from its current snapshot.
    pub fn new(store: Box<dyn UserStore>, config: &AppConfig) -> Self {
        let updates = store.subscribe();
        let snapshot = store.state();
        let theme = config.theme_path.as_deref().map(Theme::load_or_init).unwrap_or_else(Theme::mocha);
        let keymap = config.keybinds_path.as_deref().map(Keymap::load_or_init).unwrap_or_default();
        Self {
            started_at: Instant::now(),
            user_list: UserList::new(&snapshot),
            last_error: snapshot.error.clone(),
            store,
            updates,
            sidebar: SidebarState::default(),
            lg_breakpoint: config.lg_breakpoint,
            operator: current_operator(),
            input_mode: InputMode::Normal,
            modal: None,
            theme,
            keymap,
            should_quit: false,
        }
    }

    pub fn mount(&self) {
        self.user_list.mount(self.store.as_ref());
    }

    /// Apply every pending store notification. Returns how many were applied.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.updates.try_recv() {
                Ok(state) => {
                    self.user_list.sync(&state);
                    self.last_error = state.error;
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("store subscription closed");
                    break;
                }
            }
        }
        applied
    }

    pub fn open_add_modal(&mut self) {
        self.modal = Some(ModalState::AddUser { field: AddUserField::Name, draft: NewUser::default(), error: None });
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn is_add_modal_open(&self) -> bool {
        matches!(self.modal, Some(ModalState::AddUser { .. }))
    }
}

/// Name of the logged-in UNIX user, shown in the drawer header.
pub fn current_operator() -> String {
    users::get_current_username()
        .and_then(|n| n.into_string().ok())
        .unwrap_or_else(|| "operator".to_string())
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parsing_accepts_hex_and_reset() {
        assert_eq!(parse_color("#0a0B0c"), Some(Color::Rgb(10, 11, 12)));
        assert_eq!(parse_color(" ffffff "), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("Reset"), Some(Color::Reset));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("zzzzzz"), None);
    }
}
