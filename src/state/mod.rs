//! Reactive stores mirroring server state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each store owns a `tokio::sync::watch` channel holding its state. Readers
//! take snapshots with `state()` or follow changes through `subscribe()`;
//! actions take `&self`, call a resource module and reconcile the result
//! into the channel.
//!
//! DESIGN
//! ======
//! In-flight work is tracked with a drop guard so `loading` falls back to
//! false on success, failure and cancellation alike. Two overlapping actions
//! reconcile in completion order; nothing is deduplicated.

pub mod admin_settings;
pub mod appointment_types;
pub mod auth;
pub mod weekly_availability;

use tokio::sync::watch;

/// State carrying an in-flight flag.
pub(crate) trait Loading {
    fn set_loading(&mut self, loading: bool);
}

/// Raises `loading` on creation and lowers it on drop.
pub(crate) struct LoadingGuard<'a, S: Loading> {
    state: &'a watch::Sender<S>,
}

impl<'a, S: Loading> LoadingGuard<'a, S> {
    pub(crate) fn begin(state: &'a watch::Sender<S>) -> Self {
        state.send_modify(|s| s.set_loading(true));
        Self { state }
    }
}

impl<S: Loading> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.set_loading(false));
    }
}
