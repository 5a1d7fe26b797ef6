//! Application state and shortcut registration.

use crate::config;
use std::cell::RefCell;
use std::rc::Rc;
use tui_shortcuts::{
    ActionError, BindingOptions, CrosstermSource, EventTarget, KeyEvent, KeyboardHost,
    SettingsProvider, ShortcutManager, ShortcutSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Log,
    Input,
}

#[derive(Debug)]
pub struct State {
    pub focus: Focus,
    pub input: String,
    pub messages: Vec<String>,
    pub status: String,
    pub should_quit: bool,
}

impl State {
    fn new() -> Self {
        Self {
            focus: Focus::Log,
            input: String::new(),
            messages: Vec::new(),
            status: "Tab switches focus".to_string(),
            should_quit: false,
        }
    }
}

pub struct App {
    pub state: Rc<RefCell<State>>,
    host: KeyboardHost<ShortcutSettings, CrosstermSource>,
}

impl App {
    pub fn new() -> Self {
        let state = Rc::new(RefCell::new(State::new()));
        let manager = build_manager(config::load_settings(), &state);
        Self {
            state,
            host: KeyboardHost::new(manager, CrosstermSource::new()),
        }
    }

    /// Combination text shown in the help bar.
    pub fn shortcut_label(&self, key: &str) -> String {
        self.host
            .manager()
            .settings()
            .get_user_setting(key)
            .unwrap_or_else(|| "unset".to_string())
    }

    /// Wait for one key and handle it.
    pub fn tick(&mut self) -> std::io::Result<()> {
        let focus = self.state.borrow().focus;
        let target = match focus {
            Focus::Log => EventTarget::element("div"),
            Focus::Input => EventTarget::element("input"),
        };
        self.host.source_mut().set_focus(Some(target));

        if let Some(event) = self.host.pump()? {
            self.state.borrow_mut().handle_unbound(&event);
        }
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.state.borrow().should_quit
    }
}

impl State {
    /// Keys no shortcut consumed.
    fn handle_unbound(&mut self, event: &KeyEvent) {
        if event.key == "Tab" {
            self.focus = match self.focus {
                Focus::Log => Focus::Input,
                Focus::Input => Focus::Log,
            };
            return;
        }

        if self.focus != Focus::Input || event.ctrl || event.alt || event.meta {
            return;
        }

        match event.key.as_str() {
            "Backspace" => {
                self.input.pop();
            }
            "Escape" => self.focus = Focus::Log,
            key if key.chars().count() == 1 => self.input.push_str(key),
            _ => {}
        }
    }
}

fn build_manager(
    settings: ShortcutSettings,
    state: &Rc<RefCell<State>>,
) -> ShortcutManager<ShortcutSettings> {
    let mut manager = ShortcutManager::new(settings);

    let s = Rc::clone(state);
    manager.register(
        "quit",
        move |_| {
            s.borrow_mut().should_quit = true;
            Ok(())
        },
        BindingOptions::new().allow_in_typing(true),
    );

    let s = Rc::clone(state);
    manager.register(
        "save",
        move |_| {
            let mut state = s.borrow_mut();
            state.status = format!("Saved {} messages", state.messages.len());
            Ok(())
        },
        BindingOptions::new().allow_in_typing(true),
    );

    let s = Rc::clone(state);
    let has_input = Rc::clone(state);
    manager.register(
        "submit",
        move |_| {
            let mut state = s.borrow_mut();
            let message = std::mem::take(&mut state.input);
            state.messages.push(message);
            state.status = "Submitted".to_string();
            Ok(())
        },
        BindingOptions::new()
            .allow_in_typing(true)
            .with_context_check(move || !has_input.borrow().input.is_empty()),
    );

    let s = Rc::clone(state);
    manager.register(
        "clear",
        move |_| {
            let mut state = s.borrow_mut();
            state.messages.clear();
            state.status = "Cleared".to_string();
            Ok(())
        },
        BindingOptions::default(),
    );

    let s = Rc::clone(state);
    manager.register(
        "fail",
        move |_| {
            s.borrow_mut().status = "Action failed, see log".to_string();
            Err(ActionError::msg("demo failure"))
        },
        BindingOptions::default(),
    );

    manager
}
