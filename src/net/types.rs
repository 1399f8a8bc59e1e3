//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON bodies field for field so serde
//! round-trips stay lossless. Timestamps travel as RFC 3339 strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

// =============================================================================
// AUTH
// =============================================================================

/// Account role granted by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(alias = "admin")]
    Admin,
    #[default]
    #[serde(alias = "user")]
    User,
}

/// Authenticated user as returned by login, register, current-user and
/// magic-link verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Public user identifier.
    pub pid: String,
    pub name: String,
    pub is_verified: bool,
    pub email: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicLinkParams {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotParams {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetParams {
    /// Reset token delivered by the forgot-password email.
    pub token: String,
    pub password: String,
}

// =============================================================================
// APPOINTMENT TYPES
// =============================================================================

/// A named bookable service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentType {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub duration_in_minutes: i32,
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppointmentTypeParams {
    pub duration_in_minutes: i32,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAppointmentTypeParams {
    pub duration_in_minutes: i32,
    pub display_name: String,
}

// =============================================================================
// ADMIN SETTINGS
// =============================================================================

/// Singleton server configuration. The API key arrives masked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    pub id: i32,
    pub allow_new_registrations: bool,
    pub google_cloud_api_key: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Partial update; absent fields are left untouched by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettingsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_new_registrations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cloud_api_key: Option<String>,
}

// =============================================================================
// WEEKLY AVAILABILITY
// =============================================================================

/// Stored availability window, in minutes from Monday 00:00.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub id: i32,
    pub from: i32,
    pub to: i32,
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Window expressed in minutes from the start of its own day (0..=1440).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAvailabilityDay {
    pub from: i32,
    pub to: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub normalized: NormalizedAvailabilityDay,
    pub model: WeeklyAvailability,
}

/// Zero-indexed weekday, Monday first, as the server numbers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub fn index(self) -> i32 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.name() == lowered || day.name()[..3] == lowered)
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

/// Availability windows grouped by weekday. Fetched and replaced as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailabilityByWeekday {
    pub monday: Vec<AvailabilityDay>,
    pub tuesday: Vec<AvailabilityDay>,
    pub wednesday: Vec<AvailabilityDay>,
    pub thursday: Vec<AvailabilityDay>,
    pub friday: Vec<AvailabilityDay>,
    pub saturday: Vec<AvailabilityDay>,
    pub sunday: Vec<AvailabilityDay>,
}

impl WeeklyAvailabilityByWeekday {
    #[must_use]
    pub fn day(&self, weekday: Weekday) -> &[AvailabilityDay] {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    /// Total number of windows across the week.
    #[must_use]
    pub fn window_count(&self) -> usize {
        Weekday::ALL.iter().map(|day| self.day(*day).len()).sum()
    }

    /// Look up a window by its stored id.
    #[must_use]
    pub fn find(&self, id: i32) -> Option<(Weekday, &AvailabilityDay)> {
        Weekday::ALL.iter().find_map(|day| {
            self.day(*day)
                .iter()
                .find(|window| window.model.id == id)
                .map(|window| (*day, window))
        })
    }
}

/// Create/update body: a day-relative window plus the weekday it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailabilityParams {
    pub normalized: NormalizedAvailabilityDay,
    /// Zero-indexed weekday (0 = Monday).
    pub weekday: i32,
}

impl WeeklyAvailabilityParams {
    #[must_use]
    pub fn new(weekday: Weekday, from: i32, to: i32) -> Self {
        Self { normalized: NormalizedAvailabilityDay { from, to }, weekday: weekday.index() }
    }

    /// Window start in minutes from Monday 00:00.
    #[must_use]
    pub fn week_start(&self) -> i32 {
        self.normalized.from + self.weekday * MINUTES_PER_DAY
    }

    /// Window end in minutes from Monday 00:00.
    #[must_use]
    pub fn week_end(&self) -> i32 {
        self.normalized.to + self.weekday * MINUTES_PER_DAY
    }
}

// =============================================================================
// DURATIONS
// =============================================================================

/// A duration split into whole days, hours, and minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysHoursMinutes {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}
