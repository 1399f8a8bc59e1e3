//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user store applies the same redirect rule after every auth state
//! change. Routing itself is injected through [`Navigator`] so the rule can
//! drive a browser router, a CLI, or a test double.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Mutex;

use crate::state::auth::AuthState;

/// Prefix of every page that requires a signed-in user.
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Router seam.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}

/// Where the auth rule wants to send a visitor on `path`, if anywhere.
///
/// Nothing happens until the current-user check has settled. After that,
/// signed-out visitors are kept out of the dashboard and signed-in users
/// are kept inside it.
#[must_use]
pub fn redirect_target(state: &AuthState, path: &str) -> Option<&'static str> {
    if !state.settled {
        return None;
    }
    let in_dashboard = path.starts_with(DASHBOARD_PATH);
    match (&state.user, in_dashboard) {
        (None, true) => Some(LOGIN_PATH),
        (Some(_), false) => Some(DASHBOARD_PATH),
        _ => None,
    }
}

/// Apply [`redirect_target`] to the navigator's current location.
pub fn apply_route_guard(state: &AuthState, navigator: &dyn Navigator) {
    let path = navigator.current_path();
    if let Some(target) = redirect_target(state, &path) {
        tracing::debug!(from = %path, to = target, "auth redirect");
        navigator.push(target);
    }
}

/// In-process navigator that records history.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self { history: Mutex::new(vec![initial_path.into()]) }
    }

    /// Every visited path, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        match self.history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history().pop().unwrap_or_else(|| HOME_PATH.to_owned())
    }

    fn push(&self, path: &str) {
        match self.history.lock() {
            Ok(mut history) => history.push(path.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(path.to_owned()),
        }
    }
}
