//! User-facing notifications (toasts).
//!
//! SYSTEM CONTEXT
//! ==============
//! Resource modules report the outcome of user-visible operations here. The
//! sink is injected so a UI can render toasts while the CLI just logs them.
//! Emitting a toast is a side effect only; it never changes control flow.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// One notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, title: title.into(), description: None }
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, title: title.into(), description: None }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Sink that forwards toasts to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        let description = toast.description.as_deref().unwrap_or_default();
        match toast.kind {
            ToastKind::Success => tracing::info!(title = %toast.title, description, "toast"),
            ToastKind::Error => tracing::warn!(title = %toast.title, description, "toast"),
        }
    }
}

/// Sink that keeps toasts until a renderer drains them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => std::mem::take(&mut *toasts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Pending toasts without removing them.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(toasts) => toasts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}
