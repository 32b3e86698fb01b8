use clario_core::model::SessionSnapshot;
use dioxus::prelude::*;

/// Shared view of the current `(user, loading)` pair.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionHandle {
    snapshot: Signal<SessionSnapshot>,
}

impl SessionHandle {
    /// Reading subscribes the calling scope or effect.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        *self.snapshot.read()
    }

    pub fn set(&self, snapshot: SessionSnapshot) {
        let mut signal = self.snapshot;
        if *signal.peek() != snapshot {
            signal.set(snapshot);
        }
    }
}

#[component]
pub fn SessionProvider(initial: SessionSnapshot, children: Element) -> Element {
    let snapshot = use_signal(|| initial);
    use_context_provider(|| SessionHandle { snapshot });

    rsx! { {children} }
}

#[must_use]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}
