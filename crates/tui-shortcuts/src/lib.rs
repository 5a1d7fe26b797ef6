//! # tui-shortcuts
//!
//! Single-combination keyboard shortcut dispatch for the TUI Suite.
//!
//! ## Features
//!
//! - Bindings keyed by setting name, resolved against user configuration on every keypress
//! - Human-readable combinations (`"Ctrl+Enter"`, `"Shift+Ctrl+A"`, `"Delete"`)
//! - Suppression while typing in text entry elements
//! - Per-binding context predicates
//! - Failing actions are logged and contained
//!
//! ```
//! use std::collections::HashMap;
//! use tui_shortcuts::{BindingOptions, KeyEvent, ShortcutManager};
//!
//! let mut settings = HashMap::new();
//! settings.insert("save".to_string(), "Ctrl+S".to_string());
//!
//! let mut manager = ShortcutManager::new(settings);
//! manager.register("save", |_| Ok(()), BindingOptions::default());
//!
//! let mut event = KeyEvent::new("s").with_ctrl();
//! assert!(manager.handle_key_event(&mut event));
//! assert!(event.is_consumed());
//! ```

mod binding;
mod combination;
mod event;
mod host;
mod manager;
mod settings;

pub use binding::{Action, ActionError, ActionResult, Binding, BindingOptions, ContextCheck};
pub use combination::{is_match, Combination};
pub use event::{is_typing_context, EventTarget, KeyEvent};
pub use host::{CrosstermSource, KeyEventSource, KeyboardHost};
pub use manager::ShortcutManager;
pub use settings::{SettingsError, SettingsProvider, ShortcutSettings};
