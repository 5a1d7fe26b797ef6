//! Keyboard-down events as seen by the dispatcher.

use crossterm::event::{KeyCode, KeyModifiers};

/// The element a key event originated from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    /// Element tag name (`input`, `textarea`, `div`, ...)
    pub tag_name: Option<String>,
    /// Whether the element accepts free-form text editing
    pub content_editable: bool,
}

impl EventTarget {
    /// A target with the given tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag.into()),
            content_editable: false,
        }
    }

    /// A content-editable element with the given tag name.
    pub fn content_editable(tag: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag.into()),
            content_editable: true,
        }
    }
}

/// Returns true when the target is a text entry element.
///
/// A missing target, or a target without a tag name, is never
/// considered a typing context.
pub fn is_typing_context(target: Option<&EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    let Some(tag) = target.tag_name.as_deref() else {
        return false;
    };

    tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("textarea")
        || target.content_editable
}

/// A keyboard-down event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Host key name (`"s"`, `"Enter"`, `" "`, `"Escape"`)
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Element that had focus when the key was pressed
    pub target: Option<EventTarget>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    /// Create an event with no modifiers and no target.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Set the originating element.
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Suppress the host's default handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching further listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// True once both default handling and propagation are suppressed.
    pub fn is_consumed(&self) -> bool {
        self.default_prevented && self.propagation_stopped
    }
}

/// Host key name for a crossterm key code.
fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        let modifiers = event.modifiers;
        Self {
            key: key_name(event.code),
            ctrl: modifiers.contains(KeyModifiers::CONTROL),
            alt: modifiers.contains(KeyModifiers::ALT),
            // crossterm reports BackTab without SHIFT on some terminals
            shift: modifiers.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab,
            meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}
