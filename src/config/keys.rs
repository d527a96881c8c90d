//! Keybinding types and vim-style key notation parsing
//!
//! Notation examples: `q`, `C-c`, `M-S-j`, `<Space>`, `<Right>`, `G`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::ui::action::Action;

/// A key combination (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a terminal key event to the canonical form used by the parser.
    ///
    /// Uppercase characters become lowercase + SHIFT so `G` in config matches
    /// Shift+g. Symbols such as `+` or `]` drop SHIFT, since terminals report
    /// it inconsistently for them.
    pub fn from_key_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: event.modifiers | KeyModifiers::SHIFT,
            },
            KeyCode::Char(c) if !c.is_ascii_alphanumeric() && c != ' ' => Self {
                code: event.code,
                modifiers: event.modifiers - KeyModifiers::SHIFT,
            },
            _ => Self {
                code: event.code,
                modifiers: event.modifiers,
            },
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C".into());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M".into());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S".into());
        }

        let key = match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Backspace => "bs".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        parts.push(key);

        write!(f, "{}", parts.join("-"))
    }
}

/// Error type for key parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("no key specified")]
    NoKey,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
    #[error("invalid special key: {0}")]
    InvalidSpecialKey(String),
}

/// Key to action mapping
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    pub bindings: HashMap<KeyCombo, Action>,
}

impl KeybindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, combo: KeyCombo, action: Action) {
        self.bindings.insert(combo, action);
    }

    pub fn get_action(&self, key: &KeyCombo) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Resolve a terminal key event to an action
    pub fn action_for_event(&self, event: &KeyEvent) -> Option<Action> {
        self.get_action(&KeyCombo::from_key_event(event))
    }

    /// First bound key for `action`, in a stable order, for display
    pub fn key_for(&self, action: Action) -> Option<KeyCombo> {
        let mut keys: Vec<KeyCombo> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| (key.modifiers.bits(), key.to_string()));
        keys.into_iter().next()
    }

    /// Layer user bindings on top of these.
    ///
    /// A user binding for an action replaces every default key of that action.
    pub fn merge(&mut self, other: KeybindingConfig) {
        for action in other.bindings.values() {
            self.bindings.retain(|_, bound| bound != action);
        }
        self.bindings.extend(other.bindings);
    }
}

/// Parse a vim-style key notation string into a KeyCombo
///
/// Supported notation:
/// - `C-x` for Ctrl+x, `M-x` for Alt+x, `S-x` for Shift+x, combinable
/// - `<CR>`, `<Esc>`, `<Tab>`, `<BS>`, `<Space>`
/// - `<Up>`, `<Down>`, `<Left>`, `<Right>`, `<Home>`, `<End>`
/// - `<F1>` through `<F12>`
/// - A bare uppercase letter means Shift + that letter
pub fn parse_key_notation(s: &str) -> Result<KeyCombo, KeyParseError> {
    let s = s.trim();

    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }

    if s.starts_with('<') && s.ends_with('>') && s.len() > 2 {
        return parse_special_key(&s[1..s.len() - 1]);
    }

    // A lone symbol such as "-" or "+" is a key, not a separator
    if s.chars().count() == 1 {
        let (code, needs_shift) = parse_key_code(s)?;
        let modifiers = if needs_shift {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Ok(KeyCombo::new(code, modifiers));
    }

    let (prefix, key_str) = match s.find('<') {
        // "M-<C-Right>": the bracketed key carries its own modifiers
        Some(pos) if pos > 0 && s.ends_with('>') && s[..pos].ends_with('-') => {
            (&s[..pos - 1], &s[pos..])
        }
        _ => match s.rsplit_once('-') {
            // "C--" binds Ctrl+minus
            Some((prefix, "")) => (prefix.strip_suffix('-').unwrap_or(prefix), "-"),
            Some((prefix, key)) => (prefix, key),
            None => ("", s),
        },
    };

    let mut modifiers = parse_modifiers(prefix)?;
    if key_str.is_empty() {
        return Err(KeyParseError::NoKey);
    }

    let (code, needs_shift) = if key_str.starts_with('<') && key_str.ends_with('>') {
        let combo = parse_special_key(&key_str[1..key_str.len() - 1])?;
        modifiers |= combo.modifiers;
        (combo.code, false)
    } else {
        parse_key_code(key_str)?
    };

    if needs_shift {
        modifiers |= KeyModifiers::SHIFT;
    }

    Ok(KeyCombo::new(code, modifiers))
}

fn parse_modifiers(prefix: &str) -> Result<KeyModifiers, KeyParseError> {
    let mut modifiers = KeyModifiers::NONE;
    if prefix.is_empty() {
        return Ok(modifiers);
    }
    for part in prefix.split('-') {
        match part {
            "C" => modifiers |= KeyModifiers::CONTROL,
            "M" => modifiers |= KeyModifiers::ALT,
            "S" => modifiers |= KeyModifiers::SHIFT,
            other => return Err(KeyParseError::InvalidModifier(other.to_string())),
        }
    }
    Ok(modifiers)
}

/// Parse the inside of `<...>`, which may carry its own modifiers (`<C-Right>`)
fn parse_special_key(inner: &str) -> Result<KeyCombo, KeyParseError> {
    let (prefix, name) = inner.rsplit_once('-').unwrap_or(("", inner));
    let modifiers = parse_modifiers(prefix)?;

    let code = match name.to_uppercase().as_str() {
        "CR" | "ENTER" | "RETURN" => KeyCode::Enter,
        "ESC" | "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "DEL" | "DELETE" => KeyCode::Delete,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "SPACE" => KeyCode::Char(' '),
        upper if upper.starts_with('F') && upper.len() > 1 => {
            let num: u8 = upper[1..]
                .parse()
                .map_err(|_| KeyParseError::InvalidKey(name.to_string()))?;
            if num == 0 || num > 12 {
                return Err(KeyParseError::InvalidKey(name.to_string()));
            }
            KeyCode::F(num)
        }
        _ => return Err(KeyParseError::InvalidSpecialKey(name.to_string())),
    };

    Ok(KeyCombo::new(code, modifiers))
}

/// Parse a single plain key.
/// Returns the KeyCode and whether SHIFT should be added (uppercase letters).
fn parse_key_code(s: &str) -> Result<(KeyCode, bool), KeyParseError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok((
            KeyCode::Char(c.to_ascii_lowercase()),
            c.is_ascii_uppercase(),
        )),
        _ => match s.to_uppercase().as_str() {
            "SPACE" => Ok((KeyCode::Char(' '), false)),
            "TAB" => Ok((KeyCode::Tab, false)),
            "ENTER" | "CR" | "RETURN" => Ok((KeyCode::Enter, false)),
            "ESC" | "ESCAPE" => Ok((KeyCode::Esc, false)),
            _ => Err(KeyParseError::InvalidKey(s.to_string())),
        },
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_notation(s)
    }
}
