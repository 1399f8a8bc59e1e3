//! Utility helpers shared across stores, resources and the CLI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure calculation and presentation helpers live here so they stay free of
//! I/O and can be tested in isolation. `storage` is the one exception: it is
//! the persistence seam the session token sits on.

pub mod auth;
pub mod conversions;
pub mod format;
pub mod storage;
