//! Attaching a manager to the host's keyboard stream.

use crate::event::{EventTarget, KeyEvent};
use crate::manager::ShortcutManager;
use crate::settings::SettingsProvider;

use crossterm::event::{Event, KeyEventKind};
use std::io;

/// A stream of keyboard-down events.
pub trait KeyEventSource {
    /// Block until the next keyboard-down event.
    ///
    /// Returns `Ok(None)` when the stream delivered a non-keyboard event.
    fn next_key_event(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Keyboard events from the terminal via crossterm.
#[derive(Debug, Default)]
pub struct CrosstermSource {
    /// Element that currently has focus, attached to every event
    focus: Option<EventTarget>,
}

impl CrosstermSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the focused element reported as the event target.
    pub fn set_focus(&mut self, target: Option<EventTarget>) {
        self.focus = target;
    }

    fn convert(&self, event: Event) -> Option<KeyEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let mut event = KeyEvent::from(key);
                event.target = self.focus.clone();
                Some(event)
            }
            _ => None,
        }
    }
}

impl KeyEventSource for CrosstermSource {
    fn next_key_event(&mut self) -> io::Result<Option<KeyEvent>> {
        let event = crossterm::event::read()?;
        Ok(self.convert(event))
    }
}

/// A manager subscribed to a keyboard source.
///
/// The manager sees each event before the application does.
pub struct KeyboardHost<S, E> {
    manager: ShortcutManager<S>,
    source: E,
}

impl<S: SettingsProvider, E: KeyEventSource> KeyboardHost<S, E> {
    /// Subscribe a manager to a source.
    pub fn new(manager: ShortcutManager<S>, source: E) -> Self {
        Self { manager, source }
    }

    pub fn manager(&self) -> &ShortcutManager<S> {
        &self.manager
    }

    pub fn source_mut(&mut self) -> &mut E {
        &mut self.source
    }

    /// Read and dispatch one event.
    ///
    /// Returns the event if the application should still handle it, that
    /// is when no shortcut consumed it.
    pub fn pump(&mut self) -> io::Result<Option<KeyEvent>> {
        let Some(mut event) = self.source.next_key_event()? else {
            return Ok(None);
        };

        self.manager.handle_key_event(&mut event);

        if event.propagation_stopped() {
            Ok(None)
        } else {
            Ok(Some(event))
        }
    }
}
