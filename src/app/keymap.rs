//! Keybinding configuration: defaults, optional `keybinds.conf` overrides,
//! and resolution of key presses to actions.
//!
//! The file format is one binding per line, `<Action> = <KeySpec>`, with `#`
//! comments. Bindings in the file are layered on top of the defaults.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the search box.
    StartSearch,
    /// Move the sort selector to the next key.
    CycleSort,
    SortByName,
    SortByEmail,
    SortByPhone,
    /// Switch between light and dark palettes.
    ToggleTheme,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Open the detail overlay for the focused card.
    OpenDetails,
    /// Close whichever overlay is open.
    CloseDetails,
    OpenHelp,
    Ignore,
}

/// Mapping from `(KeyModifiers, KeyCode)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows and vim-style keys for movement, single
    /// letters for commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('s')), KeyAction::CycleSort);
        bindings.insert((M::NONE, Char('1')), KeyAction::SortByName);
        bindings.insert((M::NONE, Char('2')), KeyAction::SortByEmail);
        bindings.insert((M::NONE, Char('3')), KeyAction::SortByPhone);
        bindings.insert((M::NONE, Char('t')), KeyAction::ToggleTheme);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Enter), KeyAction::OpenDetails);
        bindings.insert((M::NONE, Esc), KeyAction::CloseDetails);
        bindings.insert((M::NONE, Backspace), KeyAction::CloseDetails);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::MoveLeft);
        bindings.insert((M::NONE, Right), KeyAction::MoveRight);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::MoveLeft);
        bindings.insert((M::NONE, Char('l')), KeyAction::MoveRight);
        // Some terminals report '?' with SHIFT held
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        Self { bindings }
    }

    /// Defaults, overridden from `path` when one is given and readable.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            None => Self::default(),
            Some(p) => Self::from_file(p).unwrap_or_else(|| {
                warn!(path = %p.display(), "keybinds file unreadable; using defaults");
                Self::default()
            }),
        }
    }

    /// Parse a keybinds file on top of the defaults.
    ///
    /// Returns `None` if the file cannot be read. Lines that do not parse are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    pub fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => debug!(line, "skipping keybinding line"),
            }
        }
        map
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Snapshot of all bindings, sorted by action then key for stable display.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        let mut all: Vec<_> = self.bindings.iter().map(|(k, v)| (*k, *v)).collect();
        all.sort_by_key(|((m, c), a)| (format_action(*a), Self::format_key(*m, *c)));
        all
    }

    /// Keys bound to `action`, formatted and joined with ", ".
    pub fn keys_for(&self, action: KeyAction) -> String {
        let mut keys: Vec<String> = self
            .all_bindings()
            .into_iter()
            .filter(|(_, a)| *a == action)
            .map(|((m, c), _)| Self::format_key(m, c))
            .collect();
        keys.dedup();
        keys.join(", ")
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+c" or "Enter".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Backspace => "Backspace".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
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
        "Esc" | "Escape" => Esc,
        "Backspace" => Backspace,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
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
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "CycleSort" => Some(KeyAction::CycleSort),
        "SortByName" => Some(KeyAction::SortByName),
        "SortByEmail" => Some(KeyAction::SortByEmail),
        "SortByPhone" => Some(KeyAction::SortByPhone),
        "ToggleTheme" => Some(KeyAction::ToggleTheme),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "MoveLeft" => Some(KeyAction::MoveLeft),
        "MoveRight" => Some(KeyAction::MoveRight),
        "OpenDetails" => Some(KeyAction::OpenDetails),
        "CloseDetails" => Some(KeyAction::CloseDetails),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::CycleSort => "CycleSort",
        KeyAction::SortByName => "SortByName",
        KeyAction::SortByEmail => "SortByEmail",
        KeyAction::SortByPhone => "SortByPhone",
        KeyAction::ToggleTheme => "ToggleTheme",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::MoveLeft => "MoveLeft",
        KeyAction::MoveRight => "MoveRight",
        KeyAction::OpenDetails => "OpenDetails",
        KeyAction::CloseDetails => "CloseDetails",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_resolve_common_keys() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('t'))),
            Some(KeyAction::ToggleTheme)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Enter)),
            Some(KeyAction::OpenDetails)
        );
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('x'))), None);
    }

    #[test]
    fn config_overrides_and_skips_garbage() {
        let km = Keymap::from_config_str(
            "# comment\nToggleTheme = d\nQuit = Ctrl+x\nNotAnAction = z\nMoveUp = NotAKey\n\n",
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('d'))),
            Some(KeyAction::ToggleTheme)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('x'))),
            Some(KeyAction::Quit)
        );
        // defaults survive
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('t'))),
            Some(KeyAction::ToggleTheme)
        );
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('z'))), None);
    }

    #[test]
    fn format_key_renders_ctrl_and_names() {
        assert_eq!(Keymap::format_key(KeyModifiers::CONTROL, KeyCode::Char('c')), "Ctrl+c");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::Esc), "Esc");
        assert_eq!(Keymap::format_key(KeyModifiers::NONE, KeyCode::Char('/')), "/");
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::Quit), "Ctrl+c, q");
        assert_eq!(km.keys_for(KeyAction::MoveUp), "Up, k");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let km = Keymap::load(Some(Path::new("/nonexistent/keybinds.conf")));
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Char('q'))),
            Some(KeyAction::Quit)
        );
    }
}
