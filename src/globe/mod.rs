//! Globe module
//!
//! The textured Earth and the systems that turn it towards the selected city.

use bevy::prelude::*;

pub mod earth;
pub mod rotation;

pub use earth::{GlobeRoot, GlobeSurface};
pub use rotation::{GlobeOrientation, GlobeRotationPlugin, RotationTransition};

/// Plugin for the globe mesh and its rotation
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GlobeRotationPlugin)
            .add_systems(Startup, earth::spawn_globe)
            .add_systems(Update, earth::watch_globe_texture);
    }
}
