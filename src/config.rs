//! User configuration: keybindings, table sizing and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/vu-deck/config.toml` (default `~/.config/vu-deck/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::record::SearchField;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the pipeline page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    ColumnLeft,
    ColumnRight,
    CycleSort,
    FocusSearch,
    RowMenu,
    Notifications,
    SwitchPage,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help line and the file).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::PrevPage,
        Action::NextPage,
        Action::ColumnLeft,
        Action::ColumnRight,
        Action::CycleSort,
        Action::FocusSearch,
        Action::RowMenu,
        Action::Notifications,
        Action::SwitchPage,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Previous Row",
            Action::MoveDown => "Next Row",
            Action::PrevPage => "Previous Page",
            Action::NextPage => "Next Page",
            Action::ColumnLeft => "Column Left",
            Action::ColumnRight => "Column Right",
            Action::CycleSort => "Sort Column",
            Action::FocusSearch => "Search",
            Action::RowMenu => "Row Actions",
            Action::Notifications => "Notifications",
            Action::SwitchPage => "Switch Page",
            Action::OpenSettings => "Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::PrevPage => "prev_page",
            Action::NextPage => "next_page",
            Action::ColumnLeft => "column_left",
            Action::ColumnRight => "column_right",
            Action::CycleSort => "cycle_sort",
            Action::FocusSearch => "focus_search",
            Action::RowMenu => "row_menu",
            Action::Notifications => "notifications",
            Action::SwitchPage => "switch_page",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Capture a pressed key as a binding (modifiers masked to CTRL/ALT/SHIFT).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & MODIFIER_MASK,
        }
    }

    /// Only CTRL/ALT/SHIFT are compared.  Shift on a character key is
    /// already folded into the character (`?` vs `/`), so it is ignored
    /// there unless the binding asks for it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut theirs = event.modifiers & MODIFIER_MASK;
        if matches!(event.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            theirs.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == theirs
    }

    fn write_modifiers(&self, s: &mut String) {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        self.write_modifiers(&mut s);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "S-Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        self.write_modifiers(&mut s);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Single characters keep their case: `N` and `n` are different keys.
        if key_part.chars().count() == 1 {
            return Some(KeyBind::new(KeyCode::Char(key_part.chars().next()?), modifiers));
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') => KeyCode::F(s[1..].parse().ok()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── page size ─────────

/// How many rows a table page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSizeMode {
    /// Derived from the table height and the row height.
    Auto,
    Fixed(usize),
}

impl PageSizeMode {
    /// Values offered by the settings popup, in cycle order.
    pub const CYCLE: &[PageSizeMode] = &[
        PageSizeMode::Auto,
        PageSizeMode::Fixed(5),
        PageSizeMode::Fixed(8),
        PageSizeMode::Fixed(12),
    ];

    pub fn label(self) -> String {
        match self {
            PageSizeMode::Auto => "auto".into(),
            PageSizeMode::Fixed(n) => n.to_string(),
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s == "auto" {
            return Some(PageSizeMode::Auto);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Some(PageSizeMode::Fixed(n)),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub page_size: PageSizeMode,
    /// Terminal lines per table row (1 = dense).
    pub row_height: u16,
    /// Fade cards and charts in as they scroll into view.
    pub animations: bool,
    /// Field the pipeline search box matches against.
    pub search_field: SearchField,
    /// Where `save` writes; `None` keeps the config in memory only.
    path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            page_size: PageSizeMode::Auto,
            row_height: 1,
            animations: true,
            search_field: SearchField::Name,
            path: None,
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(PrevPage, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('['), n)]);
        m.insert(NextPage, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(']'), n)]);
        m.insert(ColumnLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ColumnRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(CycleSort, vec![KeyBind::new(Char('s'), n)]);
        m.insert(FocusSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(RowMenu, vec![KeyBind::new(Enter, n), KeyBind::new(Char('m'), n)]);
        m.insert(Notifications, vec![KeyBind::new(Char('n'), n)]);
        m.insert(SwitchPage, vec![KeyBind::new(Char('p'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for &action in Action::ALL {
            let Some(binds) = self.bindings.get(&action) else {
                continue;
            };
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Bind `bind` to `action`, removing it from any other action first.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: rows | {}/{}: page | {}: sort | {}: search | {}: actions | {}: settings",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::PrevPage),
            self.short_binding(Action::NextPage),
            self.short_binding(Action::CycleSort),
            self.short_binding(Action::FocusSearch),
            self.short_binding(Action::RowMenu),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), %err, "config unreadable, using defaults");
                }
                Self::default()
            }
        };
        config.path = Some(path);
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.serialise()).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Save, logging instead of failing (settings toggles use this).
    pub fn save_or_warn(&self) {
        if let Err(err) = self.save() {
            tracing::warn!(%err, "could not persist settings");
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Table settings.
            match key {
                "page_size" => {
                    if let Some(mode) = PageSizeMode::parse(value) {
                        config.page_size = mode;
                    }
                    continue;
                }
                "row_height" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.row_height = v.clamp(1, 3);
                    }
                    continue;
                }
                "animations" => {
                    config.animations = value == "true";
                    continue;
                }
                "search_field" => {
                    if let Some(field) = SearchField::from_key(value) {
                        config.search_field = field;
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# vu-deck configuration".to_string(),
            String::new(),
            "# Table settings".to_string(),
            format!("page_size = {}", self.page_size.label()),
            format!("row_height = {}", self.row_height),
            format!("animations = {}", self.animations),
            format!("search_field = {}", self.search_field.key()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/vu-deck/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
