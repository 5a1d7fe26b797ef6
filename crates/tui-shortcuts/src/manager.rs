//! Shortcut manager.

use crate::binding::{Action, ActionError, ActionResult, Binding, BindingOptions};
use crate::combination::is_match;
use crate::event::{is_typing_context, KeyEvent};
use crate::settings::SettingsProvider;

use indexmap::IndexMap;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Shortcut manager.
///
/// Holds the binding registry in registration order and dispatches
/// keyboard-down events to the first binding whose configured
/// combination matches.
pub struct ShortcutManager<S> {
    /// Where active combination text is looked up
    settings: S,
    /// Bindings by setting key, in registration order
    bindings: IndexMap<String, Binding>,
}

impl<S: SettingsProvider> ShortcutManager<S> {
    /// Create a manager with no bindings.
    pub fn new(settings: S) -> Self {
        Self {
            settings,
            bindings: IndexMap::new(),
        }
    }

    /// Register an action for a setting key.
    ///
    /// Replaces any binding previously registered under the same key.
    pub fn register(
        &mut self,
        setting_key: impl Into<String>,
        action: impl FnMut(&KeyEvent) -> ActionResult + 'static,
        options: BindingOptions,
    ) -> &mut Self {
        let binding = Binding::new(setting_key, action, options);
        let key = binding.setting_key.clone();

        if self.bindings.insert(key.clone(), binding).is_some() {
            tracing::debug!(setting_key = %key, "Replaced shortcut binding");
        } else {
            tracing::debug!(setting_key = %key, "Registered shortcut binding");
        }
        self
    }

    /// Get the settings provider.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Get the settings provider mutably.
    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    /// Handle a keyboard-down event.
    ///
    /// Returns true if an action ran to completion. At most one action
    /// runs per event.
    pub fn handle_key_event(&mut self, event: &mut KeyEvent) -> bool {
        let is_typing = is_typing_context(event.target.as_ref());

        for (setting_key, binding) in self.bindings.iter_mut() {
            if !binding.is_eligible(is_typing) {
                tracing::trace!(%setting_key, is_typing, "Shortcut not eligible");
                continue;
            }

            let combination = self
                .settings
                .get_user_setting(setting_key)
                .filter(|s| !s.is_empty());
            let Some(combination) = combination else {
                continue;
            };

            if !is_match(event, Some(combination.as_str())) {
                continue;
            }

            match invoke(&mut binding.action, event) {
                Ok(()) => {
                    if binding.options.prevent_default {
                        event.prevent_default();
                        event.stop_propagation();
                    }
                    tracing::debug!(%setting_key, %combination, "Shortcut dispatched");
                    return true;
                }
                Err(e) => {
                    // A failed action leaves the event unsuppressed and lets later
                    // bindings run; callers may expect suppression on any match.
                    tracing::error!(%setting_key, error = %e, "Shortcut action failed");
                }
            }
        }

        false
    }
}

/// Run an action, turning a panic into an error.
fn invoke(action: &mut Action, event: &KeyEvent) -> ActionResult {
    match panic::catch_unwind(AssertUnwindSafe(|| action(event))) {
        Ok(result) => result,
        Err(payload) => Err(ActionError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl<S> std::fmt::Debug for ShortcutManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutManager")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTarget;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&KeyEvent) -> ActionResult + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &KeyEvent| {
            inner.set(inner.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_match() {
        let mut manager = ShortcutManager::new(settings(&[("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager.register("save", save, BindingOptions::default());

        let mut event = KeyEvent::new("s").with_ctrl();
        assert!(manager.handle_key_event(&mut event));
        assert_eq!(saves.get(), 1);
        assert!(event.is_consumed());
    }

    #[test]
    fn test_no_match() {
        let mut manager = ShortcutManager::new(settings(&[("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager.register("save", save, BindingOptions::default());

        let mut event = KeyEvent::new("s");
        assert!(!manager.handle_key_event(&mut event));
        assert_eq!(saves.get(), 0);
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_first_registered_wins() {
        let mut manager =
            ShortcutManager::new(settings(&[("first", "Ctrl+S"), ("second", "ctrl+s")]));
        let (first, first_action) = counter();
        let (second, second_action) = counter();
        manager
            .register("first", first_action, BindingOptions::default())
            .register("second", second_action, BindingOptions::default());

        assert!(manager.handle_key_event(&mut KeyEvent::new("S").with_ctrl()));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_typing_context_suppresses() {
        let mut manager = ShortcutManager::new(settings(&[("delete", "Delete"), ("submit", "Ctrl+Enter")]));
        let (deletes, delete) = counter();
        let (submits, submit) = counter();
        manager
            .register("delete", delete, BindingOptions::default())
            .register("submit", submit, BindingOptions::new().allow_in_typing(true));

        let mut event = KeyEvent::new("Delete").with_target(EventTarget::element("input"));
        assert!(!manager.handle_key_event(&mut event));
        assert_eq!(deletes.get(), 0);

        let mut event = KeyEvent::new("Enter")
            .with_ctrl()
            .with_target(EventTarget::element("textarea"));
        assert!(manager.handle_key_event(&mut event));
        assert_eq!(submits.get(), 1);

        let mut event = KeyEvent::new("Delete").with_target(EventTarget::element("div"));
        assert!(manager.handle_key_event(&mut event));
        assert_eq!(deletes.get(), 1);
    }

    #[test]
    fn test_context_check() {
        let enabled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&enabled);
        let mut manager = ShortcutManager::new(settings(&[("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager.register(
            "save",
            save,
            BindingOptions::new().with_context_check(move || flag.get()),
        );

        assert!(!manager.handle_key_event(&mut KeyEvent::new("s").with_ctrl()));
        enabled.set(true);
        assert!(manager.handle_key_event(&mut KeyEvent::new("s").with_ctrl()));
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_eligibility_checked_before_lookup() {
        let lookups = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&lookups);
        let provider = move |key: &str| {
            seen.borrow_mut().push(key.to_string());
            Some("Ctrl+S".to_string())
        };

        let blocked_checks = Rc::new(Cell::new(0));
        let disabled_checks = Rc::new(Cell::new(0));
        let blocked = Rc::clone(&blocked_checks);
        let disabled = Rc::clone(&disabled_checks);

        let mut manager = ShortcutManager::new(provider);
        let (saves, save) = counter();
        manager
            .register(
                "blocked",
                |_| Ok(()),
                BindingOptions::new().with_context_check(move || {
                    blocked.set(blocked.get() + 1);
                    true
                }),
            )
            .register(
                "disabled",
                |_| Ok(()),
                BindingOptions::new()
                    .allow_in_typing(true)
                    .with_context_check(move || {
                        disabled.set(disabled.get() + 1);
                        false
                    }),
            )
            .register("save", save, BindingOptions::new().allow_in_typing(true));

        let mut event = KeyEvent::new("s")
            .with_ctrl()
            .with_target(EventTarget::element("input"));
        assert!(manager.handle_key_event(&mut event));

        assert_eq!(blocked_checks.get(), 0);
        assert_eq!(disabled_checks.get(), 1);
        assert_eq!(*lookups.borrow(), vec!["save".to_string()]);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_missing_setting_skipped() {
        let mut manager = ShortcutManager::new(settings(&[("save", ""), ("fallback", "Ctrl+S")]));
        let (saves, save) = counter();
        let (fallbacks, fallback) = counter();
        manager
            .register("save", save, BindingOptions::default())
            .register("unset", |_| Ok(()), BindingOptions::default())
            .register("fallback", fallback, BindingOptions::default());

        assert!(manager.handle_key_event(&mut KeyEvent::new("s").with_ctrl()));
        assert_eq!(saves.get(), 0);
        assert_eq!(fallbacks.get(), 1);
    }

    #[test]
    fn test_prevent_default_disabled() {
        let mut manager = ShortcutManager::new(settings(&[("peek", "Alt+P")]));
        manager.register("peek", |_| Ok(()), BindingOptions::new().prevent_default(false));

        let mut event = KeyEvent::new("p").with_alt();
        assert!(manager.handle_key_event(&mut event));
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut manager = ShortcutManager::new(settings(&[("save", "Ctrl+S"), ("open", "Ctrl+O")]));
        let (old, old_action) = counter();
        let (new, new_action) = counter();
        manager
            .register("save", old_action, BindingOptions::default())
            .register("open", |_| Ok(()), BindingOptions::default())
            .register("save", new_action, BindingOptions::new().prevent_default(false));

        let mut event = KeyEvent::new("s").with_ctrl();
        assert!(manager.handle_key_event(&mut event));
        assert_eq!(old.get(), 0);
        assert_eq!(new.get(), 1);
        assert!(!event.default_prevented());

        let keys: Vec<_> = manager.bindings.keys().cloned().collect();
        assert_eq!(keys, vec!["save".to_string(), "open".to_string()]);
    }

    #[test]
    fn test_failed_action_not_consumed() {
        let mut manager = ShortcutManager::new(settings(&[("broken", "Ctrl+S"), ("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager
            .register("broken", |_| Err(ActionError::msg("disk full")), BindingOptions::default())
            .register("save", save, BindingOptions::new().prevent_default(false));

        let mut event = KeyEvent::new("s").with_ctrl();
        assert!(manager.handle_key_event(&mut event));
        assert_eq!(saves.get(), 1);
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_panicking_action_contained() {
        let mut manager = ShortcutManager::new(settings(&[("boom", "Ctrl+B"), ("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager
            .register("boom", |_| panic!("boom"), BindingOptions::default())
            .register("save", save, BindingOptions::default());

        let mut event = KeyEvent::new("b").with_ctrl();
        assert!(!manager.handle_key_event(&mut event));
        assert!(!event.is_consumed());

        assert!(manager.handle_key_event(&mut KeyEvent::new("s").with_ctrl()));
        assert_eq!(saves.get(), 1);

        // still dispatchable after a panic
        assert!(!manager.handle_key_event(&mut KeyEvent::new("b").with_ctrl()));
    }

    #[test]
    fn test_settings_requeried() {
        let mut manager = ShortcutManager::new(settings(&[("save", "Ctrl+S")]));
        let (saves, save) = counter();
        manager.register("save", save, BindingOptions::default());

        manager
            .settings_mut()
            .insert("save".to_string(), "Alt+S".to_string());

        assert!(!manager.handle_key_event(&mut KeyEvent::new("s").with_ctrl()));
        assert!(manager.handle_key_event(&mut KeyEvent::new("s").with_alt()));
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_action_receives_event() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut manager = ShortcutManager::new(settings(&[("jump", "Space")]));
        manager.register(
            "jump",
            move |event: &KeyEvent| {
                *sink.borrow_mut() = Some(event.key.clone());
                Ok(())
            },
            BindingOptions::default(),
        );

        assert!(manager.handle_key_event(&mut KeyEvent::new(" ")));
        assert_eq!(seen.borrow().as_deref(), Some(" "));
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown panic");
    }
}
