//! Weather data types and resources.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    PartlyCloudy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::PartlyCloudy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Rainy => "🌧",
            WeatherCondition::PartlyCloudy => "⛅",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current conditions at a location. Sunrise and sunset are local hours; both
/// events happen at half past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: i32,
    pub condition: WeatherCondition,
    pub humidity_pct: u32,
    pub wind_speed_kmh: u32,
    pub sunrise_hour: u32,
    pub sunset_hour: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherStatus {
    Pending,
    Ready(WeatherReport),
    Failed(String),
}

impl WeatherStatus {
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherStatus::Ready(report) => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum WeatherCommand {
    Fetch {
        city: usize,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug)]
pub enum WeatherResult {
    Report { city: usize, report: WeatherReport },
    Error { city: usize, error: String },
}

#[derive(Resource)]
pub struct WeatherChannels {
    pub cmd_tx: Sender<WeatherCommand>,
    pub res_rx: Arc<Mutex<Receiver<WeatherResult>>>,
}

/// Latest weather per city, keyed by catalog index.
#[derive(Resource, Debug, Default)]
pub struct WeatherBoard {
    entries: HashMap<usize, WeatherStatus>,
}

impl WeatherBoard {
    pub fn status(&self, city: usize) -> Option<&WeatherStatus> {
        self.entries.get(&city)
    }

    /// Mark a request in flight. A report already on screen stays visible
    /// until the refreshed one arrives.
    pub fn begin_request(&mut self, city: usize) {
        let entry = self.entries.entry(city).or_insert(WeatherStatus::Pending);
        if !matches!(entry, WeatherStatus::Ready(_)) {
            *entry = WeatherStatus::Pending;
        }
    }

    pub fn apply(&mut self, result: WeatherResult) {
        match result {
            WeatherResult::Report { city, report } => {
                self.entries.insert(city, WeatherStatus::Ready(report));
            }
            WeatherResult::Error { city, error } => {
                self.entries.insert(city, WeatherStatus::Failed(error));
            }
        }
    }
}

/// Refresh bookkeeping for the displayed city.
#[derive(Resource)]
pub struct WeatherRefresh {
    pub interval: Duration,
    pub last_request: Option<(usize, Instant)>,
}

impl WeatherRefresh {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    /// Whether `city` needs a new request at `now`.
    pub fn is_due(&self, city: usize, now: Instant) -> bool {
        match self.last_request {
            Some((last_city, at)) if last_city == city => {
                now.duration_since(at) >= self.interval
            }
            _ => true,
        }
    }
}
