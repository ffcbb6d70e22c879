//! Weather module (mock provider on a worker thread).

use bevy::prelude::*;

pub mod fetcher;
pub mod provider;
pub mod systems;
pub mod types;

pub use provider::{MockWeatherProvider, WeatherProvider};
pub use types::{WeatherBoard, WeatherCondition, WeatherReport, WeatherStatus};

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeatherBoard>()
            .add_systems(Startup, systems::setup_weather_worker)
            .add_systems(
                Update,
                (systems::request_weather, systems::apply_weather_results).chain(),
            );
    }
}
