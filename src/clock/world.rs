//! The app's notion of "now"

use bevy::prelude::*;
use chrono::{DateTime, Duration, Utc};

/// UTC instant all city clocks are derived from.
///
/// Follows the system clock at `time_scale == 1.0`; larger scales fast-forward
/// through the day so bucket changes can be watched.
#[derive(Resource)]
pub struct WorldClock {
    pub current_utc: DateTime<Utc>,
    pub time_scale: f32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            current_utc: Utc::now(),
            time_scale: 1.0,
        }
    }
}

impl WorldClock {
    #[cfg(test)]
    pub fn fixed(current_utc: DateTime<Utc>) -> Self {
        Self {
            current_utc,
            time_scale: 1.0,
        }
    }

    pub fn advance(&mut self, delta_secs: f32) {
        let scaled = (delta_secs * self.time_scale).max(0.0);
        let whole = scaled.trunc() as i64;
        let nanos = ((scaled - scaled.trunc()) * 1_000_000_000.0) as i64;
        if whole != 0 {
            self.current_utc += Duration::seconds(whole);
        }
        if nanos != 0 {
            self.current_utc += Duration::nanoseconds(nanos);
        }
    }

    pub fn reset_to_now(&mut self) {
        self.current_utc = Utc::now();
        self.time_scale = 1.0;
    }
}

pub fn advance_world_clock(time: Res<Time>, mut clock: ResMut<WorldClock>) {
    let delta = time.delta_secs();
    clock.advance(delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_world_clock_default() {
        let clock = WorldClock::default();
        assert_eq!(clock.time_scale, 1.0);
        assert!(clock.current_utc.timestamp() > 0);
    }

    #[test]
    fn test_advance_scales_delta() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut clock = WorldClock::fixed(start);
        clock.time_scale = 60.0;
        clock.advance(2.0);
        assert_eq!(clock.current_utc, start + Duration::minutes(2));
    }

    #[test]
    fn test_advance_ignores_negative_scale() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut clock = WorldClock::fixed(start);
        clock.time_scale = -5.0;
        clock.advance(1.0);
        assert_eq!(clock.current_utc, start);
    }

    #[test]
    fn test_reset_to_now() {
        let start = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let mut clock = WorldClock::fixed(start);
        clock.time_scale = 900.0;
        clock.reset_to_now();
        assert_eq!(clock.time_scale, 1.0);
        assert!((Utc::now() - clock.current_utc).num_seconds().abs() < 5);
    }
}
