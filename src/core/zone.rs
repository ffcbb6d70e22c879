//! IANA timezone helpers

use chrono::{DateTime, Local, Offset, Utc};
use chrono_tz::Tz;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneError {
    pub name: String,
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown timezone identifier: {:?}", self.name)
    }
}

impl std::error::Error for ZoneError {}

pub fn parse_zone(name: &str) -> Result<Tz, ZoneError> {
    name.parse::<Tz>().map_err(|_| ZoneError {
        name: name.to_string(),
    })
}

/// Seconds east of UTC for `zone` at `now`.
pub fn utc_offset_seconds(zone: Tz, now: DateTime<Utc>) -> i32 {
    now.with_timezone(&zone).offset().fix().local_minus_utc()
}

/// Seconds east of UTC for the machine running the app, at `now`.
pub fn viewer_offset_seconds(now: DateTime<Utc>) -> i32 {
    now.with_timezone(&Local).offset().local_minus_utc()
}

/// `UTC+09:00`, `UTC-03:30`, `UTC+00:00`
pub fn utc_offset_label(zone: Tz, now: DateTime<Utc>) -> String {
    let offset = utc_offset_seconds(zone, now);
    let sign = if offset >= 0 { '+' } else { '-' };
    let abs = offset.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// Difference between the city's clock and the viewer's, e.g. `+13h` or `-4h 30m`.
pub fn viewer_offset_label(zone: Tz, now: DateTime<Utc>, viewer_offset: i32) -> String {
    let diff = utc_offset_seconds(zone, now) - viewer_offset;
    if diff == 0 {
        return "Same as your local time".to_string();
    }
    let sign = if diff > 0 { '+' } else { '-' };
    let abs = diff.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    if minutes > 0 {
        format!("{}{}h {}m", sign, hours, minutes)
    } else {
        format!("{}{}h", sign, hours)
    }
}

/// `America/Sao_Paulo` -> `America`, `Etc/GMT` -> `Etc`
pub fn region_label(zone_name: &str) -> String {
    zone_name
        .split('/')
        .next()
        .unwrap_or(zone_name)
        .replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn winter() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_zone_valid() {
        assert_eq!(parse_zone("Asia/Tokyo").unwrap(), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_parse_zone_invalid() {
        let err = parse_zone("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.name, "Mars/Olympus_Mons");
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_utc_offset_label() {
        assert_eq!(utc_offset_label(chrono_tz::Asia::Tokyo, winter()), "UTC+09:00");
        assert_eq!(
            utc_offset_label(chrono_tz::America::New_York, winter()),
            "UTC-05:00"
        );
        assert_eq!(utc_offset_label(chrono_tz::Asia::Kolkata, winter()), "UTC+05:30");
        assert_eq!(utc_offset_label(chrono_tz::Europe::London, winter()), "UTC+00:00");
    }

    #[test]
    fn test_utc_offset_follows_daylight_saving() {
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(utc_offset_label(chrono_tz::Europe::London, summer), "UTC+01:00");
    }

    #[test]
    fn test_viewer_offset_label() {
        let tokyo = chrono_tz::Asia::Tokyo;
        assert_eq!(viewer_offset_label(tokyo, winter(), 9 * 3600), "Same as your local time");
        assert_eq!(viewer_offset_label(tokyo, winter(), -4 * 3600), "+13h");
        assert_eq!(
            viewer_offset_label(chrono_tz::Asia::Kolkata, winter(), 10 * 3600),
            "-4h 30m"
        );
    }

    #[test]
    fn test_viewer_offset_follows_given_instant() {
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        for now in [winter(), summer] {
            let expected = Local.offset_from_utc_datetime(&now.naive_utc()).local_minus_utc();
            assert_eq!(viewer_offset_seconds(now), expected);
        }
    }

    #[test]
    fn test_region_label() {
        assert_eq!(region_label("America/Sao_Paulo"), "America");
        assert_eq!(region_label("Etc/GMT"), "Etc");
        assert_eq!(region_label("New_Zone"), "New Zone");
    }
}
