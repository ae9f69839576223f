//! Hotkeys and operations: the vocabulary shared with the host.
//!
//! A [`Hotkey`] renders as `"<key>:<modifier>,<modifier>,..."`, the format
//! Slate's `bind` expects.  An [`Operation`] is the action a hotkey triggers;
//! it serialises as `{"kind": ..., "params": {...}}`, mirroring the host's
//! `operation(kind, params)` constructor.

use crate::layout::RectExpr;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Direction for focus switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Parse a direction string (case-insensitive, surrounding whitespace ignored).
fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// One entry in a hotkey's modifier list.
///
/// Grid chords hold a second key down alongside `alt,shift`, so a modifier
/// may also be an ordinary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Cmd,
    Key(String),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Alt => write!(f, "alt"),
            Modifier::Shift => write!(f, "shift"),
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Cmd => write!(f, "cmd"),
            Modifier::Key(k) => write!(f, "{}", k),
        }
    }
}

impl FromStr for Modifier {
    type Err = HotkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HotkeyParseError::EmptyModifier);
        }
        Ok(match s.to_lowercase().as_str() {
            "alt" | "option" => Modifier::Alt,
            "shift" => Modifier::Shift,
            "ctrl" | "control" => Modifier::Ctrl,
            "cmd" | "command" => Modifier::Cmd,
            _ => Modifier::Key(s.to_string()),
        })
    }
}

/// Whether `c` cannot stand alone as a key or modifier: `:` and `,` delimit
/// the hotkey notation, and whitespace is trimmed away on parse.
pub fn is_reserved_key(c: char) -> bool {
    c == ':' || c == ',' || c.is_whitespace()
}

/// A key combination in Slate notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: String,
    pub modifiers: Vec<Modifier>,
}

impl Hotkey {
    pub fn new(key: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// `<key>:alt,shift`: the modifier set used by singleton layouts.
    pub fn alt_shift(key: char) -> Self {
        Self::new(key, vec![Modifier::Alt, Modifier::Shift])
    }

    /// `<key>:<held>,alt,shift`: pressing `key` while `held` is down.
    pub fn chord(key: impl Into<String>, held: char) -> Self {
        Self::new(
            key,
            vec![Modifier::Key(held.to_string()), Modifier::Alt, Modifier::Shift],
        )
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        for (i, m) in self.modifiers.iter().enumerate() {
            let sep = if i == 0 { ':' } else { ',' };
            write!(f, "{}{}", sep, m)?;
        }
        Ok(())
    }
}

/// Error from parsing a hotkey string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyParseError {
    #[error("hotkey has no key")]
    EmptyKey,
    #[error("hotkey has an empty modifier")]
    EmptyModifier,
}

impl FromStr for Hotkey {
    type Err = HotkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, mods) = match s.split_once(':') {
            Some((k, m)) => (k.trim(), Some(m)),
            None => (s.trim(), None),
        };
        if key.is_empty() {
            return Err(HotkeyParseError::EmptyKey);
        }
        let modifiers = match mods {
            Some(m) => m
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<Modifier>, _>>()?,
            None => Vec::new(),
        };
        Ok(Self::new(key, modifiers))
    }
}

impl Serialize for Hotkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| DeError::custom(format!("invalid hotkey {:?}: {}", s, e)))
    }
}

/// An action the host performs when a hotkey fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "params", rename_all = "lowercase")]
pub enum Operation {
    /// Move and resize the focused window to a rectangle that the host
    /// evaluates against the current screen.
    Move(RectExpr),

    /// Shift focus to the neighbouring window in `direction`.
    Focus { direction: Direction },

    /// Swallow the keypress.
    Noop,
}

impl Operation {
    /// The `kind` string passed to the host's operation constructor.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Move(_) => "move",
            Operation::Focus { .. } => "focus",
            Operation::Noop => "noop",
        }
    }
}
