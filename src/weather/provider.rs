//! Weather sources.
//!
//! All randomness lives in [`MockWeatherProvider`]; the rest of the app only
//! sees [`WeatherProvider`].

use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::weather::types::{WeatherCondition, WeatherReport};

pub trait WeatherProvider: Send + 'static {
    fn current(&mut self, latitude: f64, longitude: f64) -> Result<WeatherReport>;
}

/// Random but plausible weather. Ignores the location.
pub struct MockWeatherProvider {
    rng: ChaCha8Rng,
}

impl MockWeatherProvider {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from `seed` when given, otherwise from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        Self::seeded(seed.unwrap_or_else(rand::random::<u64>))
    }
}

impl WeatherProvider for MockWeatherProvider {
    fn current(&mut self, _latitude: f64, _longitude: f64) -> Result<WeatherReport> {
        let condition = WeatherCondition::ALL[self.rng.gen_range(0..WeatherCondition::ALL.len())];
        Ok(WeatherReport {
            temperature_c: self.rng.gen_range(15..35),
            condition,
            humidity_pct: self.rng.gen_range(40..80),
            wind_speed_kmh: self.rng.gen_range(5..25),
            sunrise_hour: self.rng.gen_range(5..7),
            sunset_hour: self.rng.gen_range(17..19),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_values_in_range() {
        let mut provider = MockWeatherProvider::seeded(7);
        for _ in 0..500 {
            let r = provider.current(35.6895, 139.6917).unwrap();
            assert!((15..35).contains(&r.temperature_c));
            assert!((40..80).contains(&r.humidity_pct));
            assert!((5..25).contains(&r.wind_speed_kmh));
            assert!((5..7).contains(&r.sunrise_hour));
            assert!((17..19).contains(&r.sunset_hour));
        }
    }

    #[test]
    fn test_seeded_provider_is_deterministic() {
        let mut a = MockWeatherProvider::seeded(42);
        let mut b = MockWeatherProvider::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.current(0.0, 0.0).unwrap(), b.current(0.0, 0.0).unwrap());
        }
    }

    #[test]
    fn test_every_condition_occurs() {
        let mut provider = MockWeatherProvider::seeded(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(provider.current(0.0, 0.0).unwrap().condition);
        }
        assert_eq!(seen.len(), WeatherCondition::ALL.len());
    }
}
