//! Display formatting for durations, availability times and timestamps.
//!
//! DESIGN
//! ======
//! Output is a fixed English rendering rather than locale-aware. Timestamps
//! are shown in the offset they carry; the server already stamps them in
//! the caller's `timezone`.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Default slider granularity, in minutes.
pub const DEFAULT_WINDOW_STEP: i64 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationFormat {
    /// `1h 30m`
    #[default]
    Short,
    /// `1 hours 30 minutes`
    Long,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid timestamp: {0}")]
    Parse(#[from] time::error::Parse),
    #[error("timestamp formatting failed: {0}")]
    Format(#[from] time::error::Format),
}

/// Render a duration. Hours are omitted when zero.
#[must_use]
pub fn format_duration(minutes: i64, format: DurationFormat) -> String {
    let (hour_unit, minute_unit) = match format {
        DurationFormat::Short => ("h", "m"),
        DurationFormat::Long => (" hours", " minutes"),
    };
    let hours = minutes.div_euclid(60);
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}{hour_unit} {mins}{minute_unit}")
    } else {
        format!("{mins}{minute_unit}")
    }
}

/// Render minutes-from-midnight as `H:MM` (`540` is `9:00`, `1440` is `24:00`).
#[must_use]
pub fn availability_time(minutes: i32) -> String {
    format!("{}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Slider input for [`window_calculator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowInput {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: i64,
}

impl WindowInput {
    #[must_use]
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self { value, min, max, step: DEFAULT_WINDOW_STEP }
    }

    #[must_use]
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }
}

/// Clamp `value` into `[min, max]`, round to the nearest minute (halves
/// round up) and then up to the next multiple of `step`. A non-positive
/// `step` skips the last stage. Results that would overflow `i64` saturate
/// to the largest representable multiple of `step`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn window_calculator(input: WindowInput) -> i64 {
    let clamped = input.value.max(input.min).min(input.max);
    let rounded = (clamped + 0.5).floor() as i64;
    if input.step <= 0 {
        return rounded;
    }
    let steps = rounded.div_euclid(input.step) + i64::from(rounded.rem_euclid(input.step) != 0);
    steps
        .checked_mul(input.step)
        .unwrap_or(i64::MAX - i64::MAX.rem_euclid(input.step))
}

/// `Jan 5, 2026`
///
/// # Errors
///
/// Returns [`FormatError::Parse`] when `timestamp` is not RFC 3339.
pub fn format_date(timestamp: &str) -> Result<String, FormatError> {
    date_label(OffsetDateTime::parse(timestamp, &Rfc3339)?)
}

/// `Jan 5, 2026, 3:04 PM`
///
/// # Errors
///
/// Returns [`FormatError::Parse`] when `timestamp` is not RFC 3339.
pub fn format_date_time(timestamp: &str) -> Result<String, FormatError> {
    date_time_label(OffsetDateTime::parse(timestamp, &Rfc3339)?)
}

/// [`format_date`] for an already-parsed timestamp.
///
/// # Errors
///
/// Returns [`FormatError::Format`] if the value cannot be rendered.
pub fn date_label(value: OffsetDateTime) -> Result<String, FormatError> {
    value
        .format(format_description!("[month repr:short] [day padding:none], [year]"))
        .map_err(FormatError::from)
}

/// [`format_date_time`] for an already-parsed timestamp.
///
/// # Errors
///
/// Returns [`FormatError::Format`] if the value cannot be rendered.
pub fn date_time_label(value: OffsetDateTime) -> Result<String, FormatError> {
    value
        .format(format_description!(
            "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
        ))
        .map_err(FormatError::from)
}
