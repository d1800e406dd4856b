//! OS color-scheme preference contracts and adapters.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Color scheme reported by the host OS or browser.
pub enum ColorScheme {
    /// Light appearance.
    #[default]
    Light,
    /// Dark appearance.
    Dark,
}

/// Listener invoked with the new scheme whenever the OS preference changes.
pub type ColorSchemeListener = Rc<dyn Fn(ColorScheme)>;

/// Handle for an active color-scheme subscription.
///
/// The listener is detached synchronously when the handle is dropped or
/// [`ColorSchemeSubscription::unsubscribe`] is called.
#[must_use = "dropping the subscription detaches the listener"]
pub struct ColorSchemeSubscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl ColorSchemeSubscription {
    /// Wraps a teardown callback.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Subscription with nothing to tear down.
    pub fn inert() -> Self {
        Self { teardown: None }
    }

    /// Detaches the listener now.
    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for ColorSchemeSubscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl std::fmt::Debug for ColorSchemeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorSchemeSubscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

/// Host service exposing the OS color-scheme preference.
pub trait ColorSchemeSource {
    /// Returns the current preferred scheme.
    fn preferred_scheme(&self) -> ColorScheme;

    /// Registers `listener` for preference changes.
    fn subscribe(&self, listener: ColorSchemeListener) -> ColorSchemeSubscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Source for hosts without a preference signal. Always light, never changes.
pub struct NoopColorSchemeSource;

impl ColorSchemeSource for NoopColorSchemeSource {
    fn preferred_scheme(&self) -> ColorScheme {
        ColorScheme::Light
    }

    fn subscribe(&self, _listener: ColorSchemeListener) -> ColorSchemeSubscription {
        ColorSchemeSubscription::inert()
    }
}

#[derive(Default)]
struct MemorySchemeState {
    scheme: ColorScheme,
    next_listener_id: u64,
    listeners: Vec<(u64, ColorSchemeListener)>,
}

#[derive(Clone, Default)]
/// In-memory source whose preference is driven programmatically (tests and headless hosts).
pub struct MemoryColorSchemeSource {
    inner: Rc<RefCell<MemorySchemeState>>,
}

impl MemoryColorSchemeSource {
    /// Creates a source reporting `scheme`.
    pub fn new(scheme: ColorScheme) -> Self {
        let source = Self::default();
        source.inner.borrow_mut().scheme = scheme;
        source
    }

    /// Changes the preference and notifies listeners when it differs from the current one.
    pub fn set_preferred_scheme(&self, scheme: ColorScheme) {
        let listeners = {
            let mut state = self.inner.borrow_mut();
            if state.scheme == scheme {
                return;
            }
            state.scheme = scheme;
            state
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect::<Vec<_>>()
        };
        for listener in listeners {
            listener(scheme);
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for MemoryColorSchemeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MemoryColorSchemeSource")
            .field("scheme", &state.scheme)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl ColorSchemeSource for MemoryColorSchemeSource {
    fn preferred_scheme(&self) -> ColorScheme {
        self.inner.borrow().scheme
    }

    fn subscribe(&self, listener: ColorSchemeListener) -> ColorSchemeSubscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<MemorySchemeState>> = Rc::downgrade(&self.inner);
        ColorSchemeSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
