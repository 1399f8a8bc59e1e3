//! # booking-client
//!
//! Client-side data layer for the booking application: an authenticated
//! REST client, one API module per backend resource, reactive stores that
//! mirror server state, and small conversion/formatting helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Caller action -> store action -> resource module -> [`net::api::ApiClient`]
//! -> [`net::transport::Transport`] -> JSON -> store state update -> watchers.

pub mod config;
pub mod net;
pub mod notify;
pub mod resources;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use net::api::{ApiClient, RequestOptions};
pub use net::error::ClientError;
pub use net::session::SessionToken;
