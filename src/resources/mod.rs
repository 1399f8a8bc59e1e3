//! Resource API modules, one per backend resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module maps a resource's operations onto [`ApiClient`] paths and
//! verbs and reports outcomes to the injected [`Notifier`]: success toasts
//! for mutations, error toasts for failures. Errors always propagate
//! unchanged so callers can still react (abort a form, re-enable a button).
//!
//! [`ApiClient`]: crate::net::api::ApiClient

pub mod admin_settings;
pub mod appointment_types;
pub mod auth;
pub mod client_facing;
pub mod weekly_availabilities;

use crate::net::error::ClientError;
use crate::notify::{Notifier, Toast};

/// Emit an error toast for a failed operation and hand the error back.
pub(crate) fn report_failure(notifier: &dyn Notifier, title: &str, description: &str, error: ClientError) -> ClientError {
    tracing::warn!(error = %error, operation = title, "api operation failed");
    notifier.notify(Toast::error(title).with_description(description));
    error
}

/// Emit a success toast.
pub(crate) fn report_success(notifier: &dyn Notifier, title: &str, description: Option<&str>) {
    let toast = Toast::success(title);
    let toast = match description {
        Some(description) => toast.with_description(description),
        None => toast,
    };
    notifier.notify(toast);
}
