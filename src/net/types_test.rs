use super::*;

fn sample_window(id: i32, from: i32, to: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "from": from,
        "to": to,
        "user_id": 1,
        "created_at": "2025-10-15T01:34:48.123456+00:00",
        "updated_at": "2025-10-15T01:34:48+00:00"
    })
}

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_login_response() {
    let json = serde_json::json!({
        "token": "jwt",
        "pid": "11111111-2222-3333-4444-555555555555",
        "name": "Ada",
        "is_verified": true,
        "email": "ada@example.com",
        "role": "Admin"
    });
    let user: User = serde_json::from_value(json).unwrap();
    assert_eq!(user.token, "jwt");
    assert!(user.is_admin());
}

#[test]
fn role_accepts_lowercase_alias() {
    let role: Role = serde_json::from_str("\"user\"").unwrap();
    assert_eq!(role, Role::User);
}

// =============================================================
// AppointmentType
// =============================================================

#[test]
fn appointment_type_parses_rfc3339_timestamps() {
    let json = serde_json::json!({
        "id": 3,
        "name": "intro-call",
        "display_name": "Intro call",
        "duration_in_minutes": 30,
        "user_id": 1,
        "created_at": "2025-10-15T01:34:48.123456+00:00",
        "updated_at": "2025-10-16T09:00:00Z"
    });
    let item: AppointmentType = serde_json::from_value(json).unwrap();
    assert_eq!(item.id, 3);
    assert_eq!(item.updated_at.hour(), 9);
}

#[test]
fn admin_settings_params_omit_absent_fields() {
    let params = AdminSettingsParams { allow_new_registrations: Some(false), google_cloud_api_key: None };
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json, serde_json::json!({ "allow_new_registrations": false }));
}

// =============================================================
// Weekly availability
// =============================================================

#[test]
fn by_weekday_find_and_count() {
    let json = serde_json::json!({
        "monday": [{ "normalized": { "from": 540, "to": 1020 }, "model": sample_window(1, 540, 1020) }],
        "tuesday": [],
        "wednesday": [{ "normalized": { "from": 60, "to": 120 }, "model": sample_window(7, 2940, 3000) }],
        "thursday": [],
        "friday": [],
        "saturday": [],
        "sunday": []
    });
    let week: WeeklyAvailabilityByWeekday = serde_json::from_value(json).unwrap();
    assert_eq!(week.window_count(), 2);

    let (day, window) = week.find(7).unwrap();
    assert_eq!(day, Weekday::Wednesday);
    assert_eq!(window.normalized.from, 60);
    assert!(week.find(99).is_none());
}

#[test]
fn params_serialize_weekday_index() {
    let params = WeeklyAvailabilityParams::new(Weekday::Friday, 480, 720);
    let json = serde_json::to_value(params).unwrap();
    assert_eq!(json, serde_json::json!({ "normalized": { "from": 480, "to": 720 }, "weekday": 4 }));
}

#[test]
fn params_week_offsets() {
    let params = WeeklyAvailabilityParams::new(Weekday::Tuesday, 60, 120);
    assert_eq!(params.week_start(), 1440 + 60);
    assert_eq!(params.week_end(), 1440 + 120);
}

#[test]
fn weekday_index_round_trip() {
    for day in Weekday::ALL {
        assert_eq!(Weekday::from_index(day.index()), Some(day));
    }
    assert_eq!(Weekday::from_index(7), None);
    assert_eq!(Weekday::from_index(-1), None);
}

#[test]
fn weekday_parses_full_and_short_names() {
    assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
    assert_eq!("sun".parse::<Weekday>().unwrap(), Weekday::Sunday);
    assert!("someday".parse::<Weekday>().is_err());
}
