//! Time-of-day classification
//!
//! Buckets a local wall-clock hour into one of six phases of the day and
//! derives the presentation tokens (gradient, text contrast) from the bucket
//! alone, so styling only changes at bucket boundaries.

use bevy::color::Color;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Afternoon,
    Dusk,
    Evening,
    Night,
}

impl TimeOfDay {
    /// All buckets in the order they occur through a day, starting at dawn.
    pub const ALL: [TimeOfDay; 6] = [
        TimeOfDay::Dawn,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Dusk,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Minutes are ignored; hours outside 0..24 fall into `Night`.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=6 => TimeOfDay::Dawn,
            7..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=18 => TimeOfDay::Dusk,
            19..=22 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    pub fn gradient(&self) -> Gradient {
        gradient_of(*self)
    }

    pub fn contrast(&self) -> Contrast {
        contrast_of(*self)
    }
}

/// Classify a local instant by its hour of day.
pub fn bucket_of<T: Timelike>(instant: &T) -> TimeOfDay {
    TimeOfDay::from_hour(instant.hour())
}

/// Ordered sRGB colour stops of a top-to-bottom background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    stops: &'static [[u8; 3]],
}

const DAWN_STOPS: &[[u8; 3]] = &[[0xff, 0x7e, 0x5f], [0xfe, 0xb4, 0x7b]];
const MORNING_STOPS: &[[u8; 3]] = &[[0x4d, 0xa0, 0xb0], [0xd3, 0x9d, 0x38]];
const AFTERNOON_STOPS: &[[u8; 3]] = &[[0x21, 0x93, 0xb0], [0x6d, 0xd5, 0xed]];
const DUSK_STOPS: &[[u8; 3]] = &[[0x35, 0x5c, 0x7d], [0x6c, 0x5b, 0x7b], [0xc0, 0x6c, 0x84]];
const EVENING_STOPS: &[[u8; 3]] = &[[0x2c, 0x3e, 0x50], [0x4c, 0xa1, 0xaf]];
const NIGHT_STOPS: &[[u8; 3]] = &[[0x23, 0x25, 0x26], [0x41, 0x43, 0x45]];

pub fn gradient_of(bucket: TimeOfDay) -> Gradient {
    let stops = match bucket {
        TimeOfDay::Dawn => DAWN_STOPS,
        TimeOfDay::Morning => MORNING_STOPS,
        TimeOfDay::Afternoon => AFTERNOON_STOPS,
        TimeOfDay::Dusk => DUSK_STOPS,
        TimeOfDay::Evening => EVENING_STOPS,
        TimeOfDay::Night => NIGHT_STOPS,
    };
    Gradient { stops }
}

impl Gradient {
    pub fn stops(&self) -> &'static [[u8; 3]] {
        self.stops
    }

    pub fn bottom(&self) -> Color {
        stop_color(self.stops[self.stops.len() - 1])
    }

    /// Mean relative luminance of the stops, 0.0 (black) to 1.0 (white).
    pub fn luminance(&self) -> f32 {
        let sum: f32 = self
            .stops
            .iter()
            .map(|[r, g, b]| {
                (0.2126 * *r as f32 + 0.7152 * *g as f32 + 0.0722 * *b as f32) / 255.0
            })
            .sum();
        sum / self.stops.len() as f32
    }

    /// CSS form, handy for logs and exports.
    pub fn css(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|[r, g, b]| format!("#{:02x}{:02x}{:02x}", r, g, b))
            .collect();
        format!("linear-gradient(to bottom, {})", stops.join(", "))
    }
}

fn stop_color([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

/// Which text colour family stays legible on a bucket's gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contrast {
    /// Light background, dark text.
    DarkText,
    /// Dark background, light text.
    LightText,
}

pub fn contrast_of(bucket: TimeOfDay) -> Contrast {
    match bucket {
        TimeOfDay::Dawn | TimeOfDay::Morning | TimeOfDay::Afternoon => Contrast::DarkText,
        TimeOfDay::Dusk | TimeOfDay::Evening | TimeOfDay::Night => Contrast::LightText,
    }
}

impl Contrast {
    pub fn is_light_background(&self) -> bool {
        matches!(self, Contrast::DarkText)
    }

    pub fn text_color(&self) -> Color {
        match self {
            Contrast::DarkText => Color::srgb(0.08, 0.09, 0.11),
            Contrast::LightText => Color::srgb(0.96, 0.96, 0.97),
        }
    }
}

/// Daylight is 06:00 up to (not including) 18:00.
pub fn is_daytime<T: Timelike>(instant: &T) -> bool {
    (6..18).contains(&instant.hour())
}

/// 0.0 at midnight, 0.5 at noon.
pub fn daytime_progress<T: Timelike>(instant: &T) -> f32 {
    (instant.hour() * 60 + instant.minute()) as f32 / (24.0 * 60.0)
}

/// One classification of a city's current local time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSample {
    pub instant: DateTime<Tz>,
    pub bucket: TimeOfDay,
    pub gradient: Gradient,
    pub contrast: Contrast,
}

impl TimeSample {
    pub fn at(now_utc: DateTime<Utc>, zone: Tz) -> Self {
        let instant = now_utc.with_timezone(&zone);
        let bucket = bucket_of(&instant);
        Self {
            instant,
            bucket,
            gradient: gradient_of(bucket),
            contrast: contrast_of(bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn at_hour(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 30, 0).unwrap()
    }

    #[test]
    fn test_bucket_boundaries() {
        let cases = [
            (4, TimeOfDay::Night),
            (5, TimeOfDay::Dawn),
            (6, TimeOfDay::Dawn),
            (7, TimeOfDay::Morning),
            (11, TimeOfDay::Morning),
            (12, TimeOfDay::Afternoon),
            (16, TimeOfDay::Afternoon),
            (17, TimeOfDay::Dusk),
            (18, TimeOfDay::Dusk),
            (19, TimeOfDay::Evening),
            (22, TimeOfDay::Evening),
            (23, TimeOfDay::Night),
            (0, TimeOfDay::Night),
        ];
        for (hour, expected) in cases {
            assert_eq!(bucket_of(&at_hour(hour)), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_every_hour_has_exactly_one_bucket() {
        let mut counts = [0usize; 6];
        for hour in 0..24 {
            let bucket = TimeOfDay::from_hour(hour);
            let idx = TimeOfDay::ALL.iter().position(|b| *b == bucket).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts, [2, 5, 5, 2, 4, 6]);
        assert_eq!(counts.iter().sum::<usize>(), 24);
    }

    #[test]
    fn test_minutes_do_not_affect_bucket() {
        let early = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let late = NaiveTime::from_hms_opt(6, 59, 59).unwrap();
        assert_eq!(bucket_of(&early), bucket_of(&late));
    }

    #[test]
    fn test_contrast_partition() {
        for bucket in TimeOfDay::ALL {
            let light = contrast_of(bucket).is_light_background();
            let expected = matches!(
                bucket,
                TimeOfDay::Dawn | TimeOfDay::Morning | TimeOfDay::Afternoon
            );
            assert_eq!(light, expected, "{}", bucket.label());
        }
    }

    #[test]
    fn test_gradients_are_distinct() {
        for (i, a) in TimeOfDay::ALL.iter().enumerate() {
            for b in TimeOfDay::ALL.iter().skip(i + 1) {
                assert_ne!(a.gradient(), b.gradient());
            }
        }
    }

    #[test]
    fn test_light_gradients_are_brighter_than_dark_ones() {
        let (light, dark): (Vec<TimeOfDay>, Vec<TimeOfDay>) = TimeOfDay::ALL
            .into_iter()
            .partition(|b| b.contrast().is_light_background());
        for l in &light {
            for d in &dark {
                assert!(l.gradient().luminance() > d.gradient().luminance());
            }
        }
        let night = TimeOfDay::Night.gradient().luminance();
        for bucket in TimeOfDay::ALL {
            assert!(bucket.gradient().luminance() >= night);
        }
    }

    #[test]
    fn test_gradient_css() {
        assert_eq!(
            TimeOfDay::Night.gradient().css(),
            "linear-gradient(to bottom, #232526, #414345)"
        );
        assert_eq!(TimeOfDay::Dusk.gradient().stops().len(), 3);
    }

    #[test]
    fn test_is_daytime() {
        assert!(!is_daytime(&at_hour(5)));
        assert!(is_daytime(&at_hour(6)));
        assert!(is_daytime(&at_hour(17)));
        assert!(!is_daytime(&at_hour(18)));
    }

    #[test]
    fn test_daytime_progress() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!((daytime_progress(&noon) - 0.5).abs() < 1e-6);
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(daytime_progress(&midnight), 0.0);
    }

    #[test]
    fn test_time_sample_uses_city_zone() {
        // 05:00 UTC is 14:00 in Tokyo
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 5, 0, 0).unwrap();
        let sample = TimeSample::at(now, chrono_tz::Asia::Tokyo);
        assert_eq!(sample.instant.hour(), 14);
        assert_eq!(sample.bucket, TimeOfDay::Afternoon);
        assert_eq!(sample.contrast, Contrast::DarkText);
        assert_eq!(sample.gradient, TimeOfDay::Afternoon.gradient());
    }
}
