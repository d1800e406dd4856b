//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{persistence, reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the queue before spawning so dispatches made while a batch is in flight start a new one.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());
        spawn_local(execute(runtime, queued));
    });
}

/// Executes one batch. Settings are written at most once per batch, from the latest session.
pub async fn execute(runtime: DesktopRuntimeContext, effects: Vec<RuntimeEffect>) {
    let mut persist = false;
    for effect in effects {
        match effect {
            RuntimeEffect::PersistSettings => persist = true,
            RuntimeEffect::FocusWindowInput(window_id) => {
                runtime.focus_request.set(Some(window_id));
            }
        }
    }

    if persist {
        let settings = runtime.session.with_untracked(|session| session.settings());
        let host = runtime.host.get_value();
        if let Err(err) = persistence::persist_settings(host.prefs.as_ref(), &settings).await {
            logging::warn!("desktop settings persist failed: {err}");
        }
    }
}
