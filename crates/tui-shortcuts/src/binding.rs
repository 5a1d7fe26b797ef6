//! Registered shortcut bindings and their options.

use crate::event::KeyEvent;
use std::fmt;
use thiserror::Error;

/// Failure reported by a shortcut action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Failed(String),
    #[error("action panicked: {0}")]
    Panicked(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    /// Create a failure from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result returned by a shortcut action.
pub type ActionResult = Result<(), ActionError>;

/// Callback invoked with the triggering event.
pub type Action = Box<dyn FnMut(&KeyEvent) -> ActionResult>;

/// Predicate deciding whether a binding is currently eligible.
pub type ContextCheck = Box<dyn Fn() -> bool>;

/// Options controlling when a binding fires and what happens after.
pub struct BindingOptions {
    /// Evaluated on every event; the binding is skipped when it returns false
    pub context_check: ContextCheck,
    /// Fire even when focus is in a text entry element
    pub allow_in_typing: bool,
    /// Consume the event after the action completes
    pub prevent_default: bool,
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only fire while `check` returns true.
    pub fn with_context_check(mut self, check: impl Fn() -> bool + 'static) -> Self {
        self.context_check = Box::new(check);
        self
    }

    pub fn allow_in_typing(mut self, allow: bool) -> Self {
        self.allow_in_typing = allow;
        self
    }

    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            context_check: Box::new(|| true),
            allow_in_typing: false,
            prevent_default: true,
        }
    }
}

impl fmt::Debug for BindingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingOptions")
            .field("allow_in_typing", &self.allow_in_typing)
            .field("prevent_default", &self.prevent_default)
            .finish_non_exhaustive()
    }
}

/// A registered shortcut.
pub struct Binding {
    /// Key under which the active combination text is stored
    pub setting_key: String,
    pub(crate) action: Action,
    pub(crate) options: BindingOptions,
}

impl Binding {
    pub fn new(
        setting_key: impl Into<String>,
        action: impl FnMut(&KeyEvent) -> ActionResult + 'static,
        options: BindingOptions,
    ) -> Self {
        Self {
            setting_key: setting_key.into(),
            action: Box::new(action),
            options,
        }
    }

    /// Whether the binding may fire for the current typing state and context.
    pub(crate) fn is_eligible(&self, is_typing: bool) -> bool {
        if is_typing && !self.options.allow_in_typing {
            return false;
        }
        (self.options.context_check)()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("setting_key", &self.setting_key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
