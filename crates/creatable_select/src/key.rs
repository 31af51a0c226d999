//! Key events and keybindings for the select field's text input.
//!
//! Keys render to the same names bindings are written with (`"up"`,
//! `"enter"`, `"ctrl+n"`, a single character for printable input), so a
//! [`Binding`] matches a [`Key`] by comparing strings.
//!
//! # Example
//!
//! ```rust
//! use creatable_select::key::{Binding, Key};
//!
//! let up = Binding::new().keys(&["up", "ctrl+p"]).help("↑", "previous");
//! assert!(up.matches(&Key::Up));
//! assert!(!up.matches(&Key::Char('k')));
//! ```

use std::fmt;

/// A key event delivered to the field's text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character.
    Char(char),
    /// Ctrl + letter.
    Ctrl(char),
    Enter,
    Tab,
    ShiftTab,
    Esc,
    Backspace,
    Up,
    Down,
    Home,
    End,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Ctrl(c) => write!(f, "ctrl+{}", c.to_ascii_lowercase()),
            Self::Enter => f.write_str("enter"),
            Self::Tab => f.write_str("tab"),
            Self::ShiftTab => f.write_str("shift+tab"),
            Self::Esc => f.write_str("escape"),
            Self::Backspace => f.write_str("backspace"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Help text shown for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"↑"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key names that trigger one action.
///
/// A binding with no keys, or one that was disabled, never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key names.
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|&k| k.to_string()).collect();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding.
    #[must_use]
    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.disabled = !enabled;
        self
    }

    /// Key names of this binding.
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// Help text of this binding.
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding can match.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Returns true if `key` triggers this binding.
    pub fn matches(&self, key: &Key) -> bool {
        if !self.enabled() {
            return false;
        }
        let name = key.to_string();
        self.keys.iter().any(|k| *k == name)
    }
}

/// Keybindings of the select field's text input.
///
/// Character keys are not bound by default: every printable character
/// is text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectKeyMap {
    /// Move the active item up (opens the list when closed).
    pub up: Binding,
    /// Move the active item down (opens the list when closed).
    pub down: Binding,
    /// Jump to the first item.
    pub goto_top: Binding,
    /// Jump to the last item.
    pub goto_bottom: Binding,
    /// Pick the active item.
    pub select: Binding,
    /// Close the list.
    pub close: Binding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new().keys(&["up", "ctrl+p"]).help("↑", "up"),
            down: Binding::new().keys(&["down", "ctrl+n"]).help("↓", "down"),
            goto_top: Binding::new().keys(&["home"]).help("home", "go to start"),
            goto_bottom: Binding::new().keys(&["end"]).help("end", "go to end"),
            select: Binding::new().keys(&["enter"]).help("enter", "select"),
            close: Binding::new().keys(&["escape"]).help("esc", "close"),
        }
    }
}

impl SelectKeyMap {
    /// Enabled bindings, in help order.
    pub fn key_binds(&self) -> Vec<&Binding> {
        [
            &self.up,
            &self.down,
            &self.goto_top,
            &self.goto_bottom,
            &self.select,
            &self.close,
        ]
        .into_iter()
        .filter(|b| b.enabled())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::Char('a').to_string(), "a");
        assert_eq!(Key::Ctrl('N').to_string(), "ctrl+n");
        assert_eq!(Key::Esc.to_string(), "escape");
        assert_eq!(Key::ShiftTab.to_string(), "shift+tab");
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let b = Binding::new().keys(&["enter"]).set_enabled(false);
        assert!(!b.matches(&Key::Enter));
        assert!(!Binding::new().matches(&Key::Enter));
    }

    #[test]
    fn test_default_keymap() {
        let km = SelectKeyMap::default();
        assert!(km.down.matches(&Key::Ctrl('n')));
        assert!(km.up.matches(&Key::Up));
        assert!(km.select.matches(&Key::Enter));
        assert!(km.close.matches(&Key::Esc));
        assert!(!km.down.matches(&Key::Char('j')));
        assert_eq!(km.key_binds().len(), 6);
    }
}
