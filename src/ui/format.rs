//! Text shown in the panels

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::core::TimeOfDay;
use crate::weather::WeatherReport;

/// `2:05:09 PM`
pub fn clock_label<Z: TimeZone>(instant: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    instant.format("%-I:%M:%S %p").to_string()
}

/// `Wednesday, January 10, 2024`
pub fn date_label<Z: TimeZone>(instant: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    instant.format("%A, %B %-d, %Y").to_string()
}

/// Sun events happen at half past `hour`: `5:30 AM`, `6:30 PM`.
pub fn sun_event_label(hour: u32) -> String {
    let hour = hour % 24;
    let (display, suffix) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:30 {}", display, suffix)
}

pub fn time_of_day_icon(bucket: TimeOfDay) -> &'static str {
    match bucket {
        TimeOfDay::Dawn => "🌅",
        TimeOfDay::Morning => "☀",
        TimeOfDay::Afternoon => "🌤",
        TimeOfDay::Dusk => "🌇",
        TimeOfDay::Evening => "🌃",
        TimeOfDay::Night => "🌙",
    }
}

pub fn temperature_label(report: &WeatherReport) -> String {
    format!("{}°C", report.temperature_c)
}

pub fn wind_label(report: &WeatherReport) -> String {
    format!("{} km/h", report.wind_speed_kmh)
}

pub fn humidity_label(report: &WeatherReport) -> String {
    format!("{}%", report.humidity_pct)
}

/// Message timestamps in the viewer's own timezone.
pub fn message_time_label(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %-I:%M %p")
        .to_string()
}

pub fn composer_hint(city: Option<&str>) -> String {
    format!(
        "Share a thought, story, or message about {}...",
        city.unwrap_or("this place")
    )
}

pub fn time_scale_label(scale: f32) -> String {
    if scale.fract().abs() < 1e-3 {
        format!("{}x", scale as i64)
    } else {
        format!("{:.2}x", scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherCondition;

    fn tokyo_afternoon() -> DateTime<chrono_tz::Tz> {
        Utc.with_ymd_and_hms(2024, 1, 10, 5, 5, 9)
            .unwrap()
            .with_timezone(&chrono_tz::Asia::Tokyo)
    }

    #[test]
    fn test_clock_label_twelve_hour() {
        assert_eq!(clock_label(&tokyo_afternoon()), "2:05:09 PM");
        let midnight = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 1).unwrap();
        assert_eq!(clock_label(&midnight), "12:00:01 AM");
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(&tokyo_afternoon()), "Wednesday, January 10, 2024");
    }

    #[test]
    fn test_sun_event_label() {
        assert_eq!(sun_event_label(5), "5:30 AM");
        assert_eq!(sun_event_label(6), "6:30 AM");
        assert_eq!(sun_event_label(12), "12:30 PM");
        assert_eq!(sun_event_label(18), "6:30 PM");
        assert_eq!(sun_event_label(0), "12:30 AM");
    }

    #[test]
    fn test_weather_labels() {
        let report = WeatherReport {
            temperature_c: 27,
            condition: WeatherCondition::Cloudy,
            humidity_pct: 64,
            wind_speed_kmh: 12,
            sunrise_hour: 6,
            sunset_hour: 17,
        };
        assert_eq!(temperature_label(&report), "27°C");
        assert_eq!(wind_label(&report), "12 km/h");
        assert_eq!(humidity_label(&report), "64%");
    }

    #[test]
    fn test_composer_hint() {
        assert!(composer_hint(Some("Cairo")).contains("about Cairo..."));
        assert!(composer_hint(None).contains("this place"));
    }

    #[test]
    fn test_time_scale_label() {
        assert_eq!(time_scale_label(1.0), "1x");
        assert_eq!(time_scale_label(60.0), "60x");
        assert_eq!(time_scale_label(2.5), "2.50x");
    }

    #[test]
    fn test_every_bucket_has_icon() {
        for bucket in TimeOfDay::ALL {
            assert!(!time_of_day_icon(bucket).is_empty());
        }
    }
}
