//! Networking modules for the authenticated REST client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` builds and decodes requests, `transport` moves bytes, `session`
//! owns the bearer token, `tracked` wraps `api` with observable request
//! flags, and `types` defines the shared wire schema.

pub mod api;
pub mod error;
pub mod session;
pub mod tracked;
pub mod transport;
pub mod types;
