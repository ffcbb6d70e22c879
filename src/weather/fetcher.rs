//! Weather worker.
//!
//! Runs the provider on its own thread so the simulated network delay never
//! blocks a frame.

use bevy::log::{error, info};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use crate::weather::provider::WeatherProvider;
use crate::weather::types::{WeatherChannels, WeatherCommand, WeatherResult};

pub fn start_weather_worker<P: WeatherProvider>(
    mut provider: P,
    delay: Duration,
) -> WeatherChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WeatherCommand>();
    let (res_tx, res_rx) = mpsc::channel::<WeatherResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                error!("Weather worker could not start a runtime: {}", err);
                return;
            }
        };

        rt.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let WeatherCommand::Fetch {
                    city,
                    latitude,
                    longitude,
                } = cmd;

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let msg = match provider.current(latitude, longitude) {
                    Ok(report) => WeatherResult::Report { city, report },
                    Err(err) => WeatherResult::Error {
                        city,
                        error: err.to_string(),
                    },
                };
                if res_tx.send(msg).is_err() {
                    break;
                }
            }
            info!("Weather worker stopped");
        });
    });

    WeatherChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}
