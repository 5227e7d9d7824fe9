//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! The file format is one `<Action> = <KeySpec>` per line; bindings in the
//! file are layered over the defaults, so a file only needs the keys it changes.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic actions available in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the keybindings reference.
    OpenHelp,
    /// Focus the email search field.
    StartSearch,
    /// Open the add-user form.
    NewUser,
    /// Ask to delete the user under the cursor.
    DeleteSelection,
    /// Open or close the navigation drawer.
    ToggleSidebar,
    /// Reload users from the store.
    Refresh,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    /// Bound but does nothing.
    Ignore,
}

const ACTION_NAMES: &[(KeyAction, &str)] = &[
    (KeyAction::Quit, "Quit"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::NewUser, "NewUser"),
    (KeyAction::DeleteSelection, "DeleteSelection"),
    (KeyAction::ToggleSidebar, "ToggleSidebar"),
    (KeyAction::Refresh, "Refresh"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::PrevPage, "PrevPage"),
    (KeyAction::NextPage, "NextPage"),
    (KeyAction::FirstPage, "FirstPage"),
    (KeyAction::LastPage, "LastPage"),
    (KeyAction::Ignore, "Ignore"),
];

/// Mapping from `(KeyModifiers, KeyCode)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows plus vim-style hjkl, single-letter commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('b')), KeyAction::ToggleSidebar);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        bindings.insert((M::NONE, Home), KeyAction::FirstPage);
        bindings.insert((M::NONE, End), KeyAction::LastPage);

        Self { bindings }
    }

    /// Load `path` if it exists; otherwise write the defaults there and use them.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::debug!(path, error = %e, "could not write default keybinds");
        }
        km
    }

    /// Parse a keybinds file on top of the defaults. Unparseable lines are skipped.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_str_layered(&contents))
    }

    fn from_str_layered(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "ignoring keybind line"),
            }
        }
        map
    }

    /// Write every current binding, sorted by action, as a reference file.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdesk keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, Home, End, Delete, /\n");
        buf.push_str("# Digits 1-9 jump to that page unless bound to an action here.\n\n");

        let mut rows: Vec<(&str, String)> = self
            .all_bindings()
            .into_iter()
            .map(|((mods, code), action)| (format_action(action), Self::format_key(mods, code)))
            .collect();
        rows.sort();
        for (action, key) in rows {
            let _ = writeln!(&mut buf, "{action} = {key}");
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Human-readable key spec such as `Ctrl+q` or `PageDown`.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{code:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTION_NAMES.iter().find(|(_, name)| *name == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES.iter().find(|(action, _)| *action == a).map(|(_, name)| *name).unwrap_or("Ignore")
}
