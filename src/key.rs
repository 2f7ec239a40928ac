use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Upper-case letters are treated as the lower-case
    /// letter with SHIFT held when looked up in a keymap.
    Char(char),
    /// The Escape key, the default mode-exit key.
    Esc,
    /// Caps Lock, usable as the mode-exit key through configuration.
    CapsLock,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key.
    Backspace,
    /// The Tab key.
    Tab,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event.
///
/// Besides the key identity and modifiers, an event carries the text the
/// key produced (if any). The text decides whether a key feeds the repeat
/// count and what gets inserted in Insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
    /// The character the key produced, `None` for non-printing presses.
    pub text: Option<char>,
}

impl KeyEvent {
    /// Build an event, deriving the produced text the way a plain keyboard
    /// layout would.
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        let chorded = mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
        let text = match code {
            _ if chorded => None,
            KeyCode::Char(c) if mods.contains(Modifiers::SHIFT) => c.to_uppercase().next(),
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            KeyCode::Esc | KeyCode::CapsLock | KeyCode::Backspace => None,
        };
        Self { code, mods, text }
    }

    /// A plain character key with no modifiers.
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::empty())
    }

    /// Override the produced text, for hosts with their own layout handling.
    pub fn with_text(mut self, text: Option<char>) -> Self {
        self.text = text;
        self
    }

    /// The keymap lookup key for this event.
    pub fn combination(&self) -> KeyCombination {
        KeyCombination::new(self.code, self.mods)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }
}

/// A key identity plus modifiers, the lookup key of a [`Keymap`](crate::Keymap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyCombination {
    /// Normalizes upper-case letters to lower-case plus SHIFT, so `V` and
    /// `shift+v` are the same combination.
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        match code {
            KeyCode::Char(c) if c.is_uppercase() => {
                let lower = c.to_lowercase().next().unwrap_or(c);
                Self {
                    code: KeyCode::Char(lower),
                    mods: mods | Modifiers::SHIFT,
                }
            }
            _ => Self { code, mods },
        }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    pub fn shift(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::SHIFT)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "ctrl+"),
            (Modifiers::ALT, "alt+"),
            (Modifiers::META, "meta+"),
            (Modifiers::SHIFT, "shift+"),
        ] {
            if self.mods.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::CapsLock => f.write_str("capslock"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Tab => f.write_str("tab"),
        }
    }
}

/// Parses `"x"`, `"V"`, `"shift+v"`, `"ctrl+v"`, `"esc"`, `"capslock"`, ...
impl FromStr for KeyCombination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidKey(s.to_string());
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        // "ctrl++" names the plus key itself
        if s.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut mods = Modifiers::empty();
        for part in parts {
            mods |= match part.to_ascii_lowercase().as_str() {
                "shift" => Modifiers::SHIFT,
                "ctrl" | "control" => Modifiers::CTRL,
                "alt" => Modifiers::ALT,
                "meta" | "super" | "cmd" => Modifiers::META,
                _ => return Err(invalid()),
            };
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => match key.to_ascii_lowercase().as_str() {
                "esc" | "escape" => KeyCode::Esc,
                "capslock" | "caps_lock" => KeyCode::CapsLock,
                "enter" | "return" => KeyCode::Enter,
                "backspace" => KeyCode::Backspace,
                "tab" => KeyCode::Tab,
                "space" => KeyCode::Char(' '),
                _ => return Err(invalid()),
            },
        };
        Ok(Self::new(code, mods))
    }
}
