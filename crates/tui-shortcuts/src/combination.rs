//! Key combination parsing and matching.

use crate::event::KeyEvent;
use std::fmt;

/// A parsed key combination such as `"Ctrl+Shift+A"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Combination {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// The non-modifier key, if the text named one
    pub key: Option<String>,
}

impl Combination {
    /// Parse combination text.
    ///
    /// Supported formats:
    /// - `"Ctrl+S"`, `"control+s"` - Ctrl+S
    /// - `"Alt+S"` - Alt+S
    /// - `"Shift+Ctrl+A"` - modifiers in any order
    /// - `"Meta+K"`, `"Cmd+K"`, `"Win+K"` - Meta+K
    /// - `"Delete"`, `"Space"`, `"Enter"` - bare keys
    ///
    /// Returns `None` for empty text. Tokens that are not modifiers become
    /// the key; if several appear the last one wins.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }

        let mut combination = Self::default();
        for part in s.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => combination.ctrl = true,
                "alt" => combination.alt = true,
                "shift" => combination.shift = true,
                "meta" | "cmd" | "win" => combination.meta = true,
                _ => combination.key = Some(part.to_string()),
            }
        }

        Some(combination)
    }

    /// Check whether an event satisfies this combination.
    ///
    /// All four modifiers must agree, including ones the text did not
    /// mention. A combination without a key never matches.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.ctrl != event.ctrl
            || self.alt != event.alt
            || self.shift != event.shift
            || self.meta != event.meta
        {
            return false;
        }

        let Some(key) = &self.key else {
            return false;
        };

        let event_key = if event.key == " " {
            "Space"
        } else {
            event.key.as_str()
        };

        key.to_lowercase() == event_key.to_lowercase()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.meta {
            parts.push("Meta");
        }

        let key_str = self.key.as_deref().map(|k| {
            let mut chars = k.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_uppercase().to_string(),
                _ => k.to_string(),
            }
        });
        if let Some(key_str) = &key_str {
            parts.push(key_str);
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// Check whether an event satisfies the given combination text.
///
/// Absent or empty text never matches.
pub fn is_match(event: &KeyEvent, combination: Option<&str>) -> bool {
    combination
        .and_then(Combination::parse)
        .map(|c| c.matches(event))
        .unwrap_or(false)
}
