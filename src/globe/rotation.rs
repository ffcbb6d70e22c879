//! Globe rotation: linear transitions towards the selected city
//! and a slow idle spin when nothing is selected.

use bevy::prelude::*;
use std::f64::consts::{PI, TAU};
use std::time::Duration;

use crate::cities::{CityCatalog, CitySelection, MarkerProjector};
use crate::config::AppConfig;
use crate::core::projection::{step_orientation, transition_progress};
use crate::core::{GeoProjector, Orientation};

/// Current pitch/yaw/roll of the globe root, kept separately from the
/// `Transform` so transitions can restart from a mid-way orientation.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct GlobeOrientation(pub Orientation);

/// An in-flight rotation. `target` is sampled once when the transition starts.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RotationTransition {
    pub start: Orientation,
    pub target: Orientation,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl RotationTransition {
    pub fn new(start: Orientation, target: Orientation, duration: Duration) -> Self {
        Self {
            start,
            target,
            elapsed_ms: 0.0,
            duration_ms: duration.as_secs_f64() * 1000.0,
        }
    }

    pub fn advance(&mut self, delta_ms: f64) -> Orientation {
        self.elapsed_ms += delta_ms.max(0.0);
        step_orientation(&self.start, &self.target, self.elapsed_ms, self.duration_ms)
    }

    pub fn is_finished(&self) -> bool {
        transition_progress(self.elapsed_ms, self.duration_ms) >= 1.0
    }
}

/// Registers the per-frame rotation systems
pub struct GlobeRotationPlugin;

impl Plugin for GlobeRotationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                start_rotation_for_selection,
                animate_globe_rotation,
                auto_rotate,
                sync_globe_transform,
            )
                .chain(),
        );
    }
}

/// Same angle in (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Yaw added per second of idle spin for a full turn every `period_secs`.
pub fn auto_rotate_rate(period_secs: f32) -> f64 {
    if period_secs <= 0.0 {
        return 0.0;
    }
    TAU / period_secs as f64
}

pub fn start_rotation_for_selection(
    mut commands: Commands,
    selection: Res<CitySelection>,
    catalog: Res<CityCatalog>,
    projector: Res<MarkerProjector>,
    config: Res<AppConfig>,
    globe: Query<(Entity, &GlobeOrientation)>,
) {
    if !selection.is_changed() {
        return;
    }
    let Some(city) = selection.current.and_then(|i| catalog.get(i)) else {
        return;
    };
    let Ok((entity, current)) = globe.single() else {
        return;
    };

    let point = projector.project(city.longitude(), city.latitude());
    let target = GeoProjector::target_orientation(&point);
    let mut start = current.0;
    start.yaw = wrap_angle(start.yaw);
    debug!(
        "Rotating globe to {} (pitch {:.3}, yaw {:.3})",
        city.name, target.pitch, target.yaw
    );
    commands.entity(entity).insert(RotationTransition::new(
        start,
        target,
        config.rotation_duration(),
    ));
}

pub fn animate_globe_rotation(
    mut commands: Commands,
    time: Res<Time>,
    mut globe: Query<(Entity, &mut GlobeOrientation, &mut RotationTransition)>,
) {
    let delta_ms = time.delta_secs_f64() * 1000.0;
    for (entity, mut orientation, mut transition) in globe.iter_mut() {
        orientation.0 = transition.advance(delta_ms);
        if transition.is_finished() {
            commands.entity(entity).remove::<RotationTransition>();
        }
    }
}

pub fn auto_rotate(
    time: Res<Time>,
    selection: Res<CitySelection>,
    config: Res<AppConfig>,
    mut globe: Query<&mut GlobeOrientation, Without<RotationTransition>>,
) {
    if selection.current.is_some() {
        return;
    }
    let step = auto_rotate_rate(config.auto_rotate_period_secs) * time.delta_secs_f64();
    for mut orientation in globe.iter_mut() {
        orientation.0.yaw = wrap_angle(orientation.0.yaw + step);
    }
}

pub fn sync_globe_transform(
    mut globe: Query<(&GlobeOrientation, &mut Transform), Changed<GlobeOrientation>>,
) {
    for (orientation, mut transform) in globe.iter_mut() {
        transform.rotation = orientation.0.to_quat();
    }
}
