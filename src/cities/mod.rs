//! Cities module
//!
//! Owns the city catalog, the current selection and the pins on the globe.

use bevy::prelude::*;

pub mod catalog;
pub mod data;
pub mod markers;

pub use catalog::{CatalogError, City, CityCatalog};
pub use markers::{CityMarker, MarkerProjector, MarkerSpec, marker_specs};

use crate::config::AppConfig;
use crate::core::GeoProjector;

/// The displayed city, as an index into the [`CityCatalog`]. `None` lets the
/// globe spin freely.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CitySelection {
    pub current: Option<usize>,
}

impl CitySelection {
    pub fn select(&mut self, index: usize) {
        self.current = Some(index);
    }
}

/// Plugin for city markers and selection
pub struct CitiesPlugin;

impl Plugin for CitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CitySelection>()
            .add_systems(
                Startup,
                (
                    initialize_selection,
                    markers::spawn_city_markers.after(crate::globe::earth::spawn_globe),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    markers::handle_marker_clicks,
                    markers::highlight_selected_marker,
                )
                    .chain(),
            );
    }
}

/// Resolve the configured start city and the marker projector
fn initialize_selection(
    mut commands: Commands,
    config: Res<AppConfig>,
    catalog: Res<CityCatalog>,
    mut selection: ResMut<CitySelection>,
) {
    commands.insert_resource(MarkerProjector(GeoProjector::with_offset(config.marker_offset)));

    selection.current = match config.initial_city.as_deref() {
        Some(id) => {
            let found = catalog.position(id);
            if found.is_none() {
                warn!("Configured initial city {:?} is not in the catalog", id);
            }
            found
        }
        None => None,
    };
}
