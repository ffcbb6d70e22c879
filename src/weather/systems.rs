//! Weather systems for requesting and applying reports.

use bevy::prelude::*;
use std::time::Instant;

use crate::cities::{CityCatalog, CitySelection};
use crate::config::AppConfig;
use crate::weather::fetcher::start_weather_worker;
use crate::weather::provider::MockWeatherProvider;
use crate::weather::types::{
    WeatherBoard, WeatherChannels, WeatherCommand, WeatherRefresh, WeatherResult,
};

pub fn setup_weather_worker(mut commands: Commands, config: Res<AppConfig>) {
    let provider = MockWeatherProvider::new(config.weather_seed);
    let channels = start_weather_worker(provider, config.weather_delay());
    info!(
        "Weather worker started (refresh every {}s)",
        config.weather_refresh_secs
    );
    commands.insert_resource(channels);
    commands.insert_resource(WeatherRefresh::new(config.weather_refresh()));
}

/// Ask for weather when a city becomes displayed and again every refresh
/// interval while it stays displayed.
pub fn request_weather(
    selection: Res<CitySelection>,
    catalog: Res<CityCatalog>,
    channels: Option<Res<WeatherChannels>>,
    refresh: Option<ResMut<WeatherRefresh>>,
    mut board: ResMut<WeatherBoard>,
) {
    let (Some(channels), Some(mut refresh)) = (channels, refresh) else {
        return;
    };
    let Some(index) = selection.current else {
        return;
    };
    let Some(city) = catalog.get(index) else {
        return;
    };

    let now = Instant::now();
    if !refresh.is_due(index, now) {
        return;
    }
    refresh.last_request = Some((index, now));

    let sent = channels.cmd_tx.send(WeatherCommand::Fetch {
        city: index,
        latitude: city.latitude(),
        longitude: city.longitude(),
    });
    match sent {
        Ok(()) => {
            debug!("Requested weather for {}", city.name);
            board.begin_request(index);
        }
        Err(_) => warn!("Weather worker is gone; no weather for {}", city.name),
    }
}

pub fn apply_weather_results(
    channels: Option<Res<WeatherChannels>>,
    mut board: ResMut<WeatherBoard>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        if let WeatherResult::Error { city, error } = &msg {
            warn!("Weather for city {} failed: {}", city, error);
        }
        board.apply(msg);
    }
}
