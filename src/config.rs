//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::net::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5150";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const FALLBACK_TIMEZONE: &str = "UTC";

const STORAGE_DIR_NAME: &str = "booking-client";
const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the `/api/...` paths are resolved against, without trailing slash.
    pub base_url: String,
    /// IANA zone name sent in the `timezone` header.
    pub timezone: String,
    /// File backing persisted client storage (session token).
    pub storage_path: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BOOKING_BASE_URL`: default `http://127.0.0.1:5150`
    /// - `BOOKING_TIMEZONE`: detected system zone, else `UTC`
    /// - `BOOKING_STORAGE_PATH`: `<data dir>/booking-client/storage.json`
    /// - `BOOKING_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BOOKING_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or no storage location
    /// can be determined.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = normalize_base_url(
            std::env::var("BOOKING_BASE_URL")
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;
        let timezone = std::env::var("BOOKING_TIMEZONE")
            .ok()
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(detect_timezone);
        let storage_path = match std::env::var_os("BOOKING_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()?,
        };
        let timeouts = Timeouts {
            request_secs: env_parse_u64("BOOKING_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("BOOKING_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, timezone, storage_path, timeouts })
    }

    /// Replace the base URL, applying the same validation as [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ClientError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

/// System IANA zone name, or `UTC` when it cannot be determined.
#[must_use]
pub fn detect_timezone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!(error = %e, "failed to detect timezone, using UTC");
            FALLBACK_TIMEZONE.to_owned()
        }
    }
}

/// Default on-disk location for persisted client storage.
///
/// # Errors
///
/// Returns an error when the platform exposes no data directory.
pub fn default_storage_path() -> Result<PathBuf, ClientError> {
    dirs::data_dir()
        .map(|dir| dir.join(STORAGE_DIR_NAME).join(STORAGE_FILE_NAME))
        .ok_or_else(|| ClientError::Config("no data directory; set BOOKING_STORAGE_PATH".into()))
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!("base url must be http(s): {raw}")));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
