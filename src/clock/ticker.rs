//! Per-second local time ticker for the displayed city
//!
//! Only one ticker is ever live. Starting a ticker for a new city replaces the
//! previous one and bumps the generation; the display only accepts ticks of
//! the generation it was bound to, so a tick produced for a previous city can
//! never reach the screen.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::Duration;

use crate::core::TimeSample;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub generation: u64,
    pub city: usize,
    pub sample: TimeSample,
}

#[derive(Debug, Clone)]
struct CityTicker {
    generation: u64,
    city: usize,
    zone: Tz,
    elapsed: Duration,
}

#[derive(Resource, Debug)]
pub struct LocalTimeTicker {
    interval: Duration,
    active: Option<CityTicker>,
    next_generation: u64,
}

impl Default for LocalTimeTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl LocalTimeTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            active: None,
            next_generation: 1,
        }
    }

    /// Cancel any running ticker and start one for `city`. Returns the first
    /// tick immediately.
    pub fn start(&mut self, city: usize, zone: Tz, now: DateTime<Utc>) -> Tick {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.active = Some(CityTicker {
            generation,
            city,
            zone,
            elapsed: Duration::ZERO,
        });
        Tick {
            generation,
            city,
            sample: TimeSample::at(now, zone),
        }
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    #[cfg(test)]
    pub fn active_city(&self) -> Option<usize> {
        self.active.as_ref().map(|t| t.city)
    }

    #[cfg(test)]
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|t| t.generation)
    }

    /// Feed elapsed real time; yields at most one tick per call. Several
    /// missed intervals collapse into one tick.
    pub fn advance(&mut self, delta: Duration, now: DateTime<Utc>) -> Option<Tick> {
        let interval = self.interval;
        let ticker = self.active.as_mut()?;
        ticker.elapsed += delta;
        if ticker.elapsed < interval {
            return None;
        }
        let rem = ticker.elapsed.as_nanos() % interval.as_nanos();
        ticker.elapsed = Duration::from_nanos(rem as u64);
        Some(Tick {
            generation: ticker.generation,
            city: ticker.city,
            sample: TimeSample::at(now, ticker.zone),
        })
    }
}

/// The local time currently shown for the selected city.
#[derive(Resource, Debug, Default)]
pub struct DisplayedTime {
    bound_generation: Option<u64>,
    current: Option<Tick>,
}

impl DisplayedTime {
    /// Accept ticks from `generation` only; drops whatever was shown.
    pub fn bind(&mut self, first: Tick) {
        self.bound_generation = Some(first.generation);
        self.current = Some(first);
    }

    pub fn clear(&mut self) {
        self.bound_generation = None;
        self.current = None;
    }

    /// Returns false and ignores the tick if it belongs to another generation.
    pub fn accept(&mut self, tick: Tick) -> bool {
        if self.bound_generation != Some(tick.generation) {
            return false;
        }
        self.current = Some(tick);
        true
    }

    pub fn current(&self) -> Option<&Tick> {
        self.current.as_ref()
    }
}

pub fn tick_local_time(
    time: Res<Time>,
    clock: Res<super::WorldClock>,
    mut ticker: ResMut<LocalTimeTicker>,
    mut displayed: ResMut<DisplayedTime>,
) {
    if let Some(tick) = ticker.advance(time.delta(), clock.current_utc) {
        if !displayed.accept(tick) {
            warn!("Dropped a local time tick from a cancelled ticker");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeOfDay;
    use chrono::{Duration as ChronoDuration, TimeZone, Timelike};

    const TOKYO: Tz = chrono_tz::Asia::Tokyo;
    const LONDON: Tz = chrono_tz::Europe::London;

    fn fake_now() -> DateTime<Utc> {
        // 14:00 in Tokyo, 05:00 in London
        Utc.with_ymd_and_hms(2024, 1, 10, 5, 0, 0).unwrap()
    }

    #[test]
    fn test_start_returns_immediate_sample() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        let tick = ticker.start(0, TOKYO, fake_now());
        assert_eq!(tick.city, 0);
        assert_eq!(tick.sample.bucket, TimeOfDay::Afternoon);
        assert!(tick.sample.contrast.is_light_background());
        assert_eq!(ticker.active_city(), Some(0));
    }

    #[test]
    fn test_ticks_once_per_interval() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        ticker.start(0, TOKYO, fake_now());

        assert!(ticker.advance(Duration::from_millis(400), fake_now()).is_none());
        assert!(ticker.advance(Duration::from_millis(400), fake_now()).is_none());
        let tick = ticker.advance(Duration::from_millis(400), fake_now());
        assert!(tick.is_some());
        // 200ms carried over
        assert!(ticker.advance(Duration::from_millis(700), fake_now()).is_none());
        assert!(ticker.advance(Duration::from_millis(100), fake_now()).is_some());
    }

    #[test]
    fn test_missed_intervals_collapse() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        ticker.start(0, TOKYO, fake_now());
        assert!(ticker.advance(Duration::from_millis(3500), fake_now()).is_some());
        assert!(ticker.advance(Duration::from_millis(400), fake_now()).is_none());
        assert!(ticker.advance(Duration::from_millis(100), fake_now()).is_some());
    }

    #[test]
    fn test_stopped_ticker_is_silent() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        ticker.start(0, TOKYO, fake_now());
        ticker.stop();
        assert!(ticker.advance(Duration::from_secs(5), fake_now()).is_none());
        assert_eq!(ticker.generation(), None);
    }

    #[test]
    fn test_city_switch_cancels_previous_ticker() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        let mut displayed = DisplayedTime::default();
        let mut now = fake_now();

        displayed.bind(ticker.start(0, TOKYO, now));
        now += ChronoDuration::seconds(1);
        let stale = ticker.advance(Duration::from_secs(1), now).unwrap();
        assert_eq!(stale.city, 0);

        // Switch before the Tokyo tick is delivered
        displayed.bind(ticker.start(1, LONDON, now));
        assert!(!displayed.accept(stale));
        assert_eq!(displayed.current().unwrap().city, 1);

        for _ in 0..10 {
            now += ChronoDuration::seconds(1);
            let tick = ticker.advance(Duration::from_secs(1), now).unwrap();
            assert_eq!(tick.city, 1);
            assert_eq!(tick.sample.instant.timezone(), LONDON);
            assert!(displayed.accept(tick));
        }

        let shown = displayed.current().unwrap();
        assert_eq!(shown.city, 1);
        assert_eq!(shown.sample.instant.hour(), 5);
        assert_eq!(shown.sample.bucket, TimeOfDay::Dawn);
    }

    #[test]
    fn test_cleared_display_rejects_everything() {
        let mut ticker = LocalTimeTicker::new(Duration::from_secs(1));
        let mut displayed = DisplayedTime::default();
        displayed.bind(ticker.start(0, TOKYO, fake_now()));
        displayed.clear();
        let tick = ticker.advance(Duration::from_secs(1), fake_now()).unwrap();
        assert!(!displayed.accept(tick));
        assert!(displayed.current().is_none());
    }
}
