//! Runtime provider and context wiring for the desktop session.
//!
//! This module owns the long-lived session signal, the runtime effect queue and the OS
//! color-scheme subscription. Rendering stays with the embedding UI crate.
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use leptos::*;
use platform_host::{ColorScheme, ColorSchemeListener, ColorSchemeSubscription, HostServices};

use crate::{
    effect_executor,
    model::WindowId,
    reducer::{reduce_session, DesktopAction, RuntimeEffect},
    session::DesktopSession,
};

#[derive(Clone, Copy)]
/// Leptos context for reading the desktop session and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle used to execute runtime side effects.
    pub host: StoredValue<HostServices>,
    /// Reactive desktop session signal.
    pub session: RwSignal<DesktopSession>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Window whose primary input should receive keyboard focus next.
    pub focus_request: RwSignal<Option<WindowId>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates signals for `session` in the current reactive owner.
    pub fn new(host: HostServices, session: DesktopSession) -> Self {
        let host = store_value(host);
        let session = create_rw_signal(session);
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
        let focus_request = create_rw_signal(None::<WindowId>);

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut next = session.get_untracked();
            match reduce_session(&mut next, action) {
                Ok(new_effects) => {
                    if session.with_untracked(|previous| *previous != next) {
                        session.set(next);
                    }
                    if !new_effects.is_empty() {
                        effects.update(|queue| queue.extend(new_effects));
                    }
                }
                Err(err) => logging::warn!("desktop reducer error: {err}"),
            }
        });

        Self {
            host,
            session,
            effects,
            focus_request,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Removes and returns every queued effect.
    pub fn take_effects(&self) -> Vec<RuntimeEffect> {
        let queued = self.effects.get_untracked();
        if !queued.is_empty() {
            self.effects.set(Vec::new());
        }
        queued
    }

    /// Drains the effect queue and executes it.
    pub async fn flush_effects(&self) {
        let queued = self.take_effects();
        effect_executor::execute(*self, queued).await;
    }

    /// Forwards OS color-scheme changes into the reducer until the returned handle is dropped.
    pub fn install_color_scheme_listener(&self) -> ColorSchemeSubscription {
        let dispatch = self.dispatch;
        let listener: ColorSchemeListener = Rc::new(move |scheme: ColorScheme| {
            dispatch.call(DesktopAction::SystemColorSchemeChanged {
                mode: scheme.into(),
            });
        });
        self.host
            .with_value(|host| host.color_scheme.subscribe(listener))
    }
}

/// Creates a [`DesktopRuntimeContext`] and provides it to descendants of the current owner.
pub fn provide_desktop_runtime(host: HostServices, session: DesktopSession) -> DesktopRuntimeContext {
    let runtime = DesktopRuntimeContext::new(host, session);
    provide_context(runtime.clone());
    runtime
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and runs its side effects.
pub fn DesktopProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Session built by the entry layer, usually via [`crate::boot_session`].
    session: DesktopSession,
    children: Children,
) -> impl IntoView {
    let runtime = provide_desktop_runtime(host_services, session);
    let subscription = runtime.install_color_scheme_listener();
    on_cleanup(move || drop(subscription));
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`], or `None` outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> Option<DesktopRuntimeContext> {
    use_context::<DesktopRuntimeContext>()
}
