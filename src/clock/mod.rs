//! City clocks
//!
//! Keeps the world clock running and drives the per-second local time ticker
//! for whichever city is displayed.

use bevy::prelude::*;

pub mod ticker;
pub mod world;

pub use ticker::{DisplayedTime, LocalTimeTicker, Tick, tick_local_time};
pub use world::{WorldClock, advance_world_clock};

use crate::cities::{CityCatalog, CitySelection};
use crate::config::AppConfig;

/// Plugin for the world clock and the displayed city's ticker
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldClock>()
            .init_resource::<DisplayedTime>()
            .add_systems(Startup, setup_ticker)
            .add_systems(
                Update,
                (
                    advance_world_clock,
                    restart_ticker_on_selection,
                    tick_local_time,
                )
                    .chain(),
            );
    }
}

fn setup_ticker(mut commands: Commands, config: Res<AppConfig>) {
    commands.insert_resource(LocalTimeTicker::new(config.tick_interval()));
}

/// Tear the ticker down and restart it whenever the selected city changes.
pub fn restart_ticker_on_selection(
    selection: Res<CitySelection>,
    catalog: Res<CityCatalog>,
    clock: Res<WorldClock>,
    mut ticker: ResMut<LocalTimeTicker>,
    mut displayed: ResMut<DisplayedTime>,
) {
    if !selection.is_changed() {
        return;
    }

    match selection.current.and_then(|i| catalog.zone(i).map(|zone| (i, zone))) {
        Some((index, zone)) => {
            let first = ticker.start(index, zone, clock.current_utc);
            debug!(
                "Local time ticker restarted for city {} (generation {})",
                index, first.generation
            );
            displayed.bind(first);
        }
        None => {
            ticker.stop();
            displayed.clear();
        }
    }
}
