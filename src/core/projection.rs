//! Geographic projection onto the globe
//!
//! Maps `(longitude, latitude)` pairs onto a sphere slightly larger than the
//! rendered globe so that markers sit above the surface, and derives the
//! rotation used to swing a marker towards the camera.

use bevy::math::{DVec3, EulerRot, Quat, Vec3};
use std::f64::consts::PI;

/// Radius of the sphere markers are placed on, relative to the unit globe.
pub const MARKER_OFFSET: f64 = 1.05;

const PITCH_GAIN: f64 = -0.5;
const YAW_GAIN: f64 = 2.0;

/// A point on the marker sphere in globe-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ProjectedPoint {
    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Bevy transforms are f32
    pub fn as_vec3(&self) -> Vec3 {
        self.as_dvec3().as_vec3()
    }

    pub fn magnitude(&self) -> f64 {
        self.as_dvec3().length()
    }
}

/// Euler rotation of the globe, in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Per-axis linear interpolation. `t` is not clamped.
    pub fn lerp(&self, target: &Orientation, t: f64) -> Orientation {
        Orientation {
            pitch: self.pitch + (target.pitch - self.pitch) * t,
            yaw: self.yaw + (target.yaw - self.yaw) * t,
            roll: self.roll + (target.roll - self.roll) * t,
        }
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.pitch as f32,
            self.yaw as f32,
            self.roll as f32,
        )
    }
}

/// Projects geographic coordinates onto a sphere of radius `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProjector {
    offset: f64,
}

impl Default for GeoProjector {
    fn default() -> Self {
        Self {
            offset: MARKER_OFFSET,
        }
    }
}

impl GeoProjector {
    pub fn with_offset(offset: f64) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Project a `(longitude, latitude)` pair given in degrees.
    ///
    /// Inputs are not range checked. At latitude ±90 every longitude lands on
    /// the same pole point.
    pub fn project(&self, longitude: f64, latitude: f64) -> ProjectedPoint {
        let phi = (90.0 - latitude) * (PI / 180.0);
        let theta = (longitude + 180.0) * (PI / 180.0);

        let x = -phi.sin() * theta.cos();
        let z = phi.sin() * theta.sin();
        let y = phi.cos();

        ProjectedPoint {
            x: x * self.offset,
            y: y * self.offset,
            z: z * self.offset,
        }
    }

    /// Heuristic "face the marker" rotation for the globe.
    ///
    /// Pitch follows the point's height and yaw follows twice its horizontal
    /// component; roll is always zero. This is not an exact look-at transform.
    pub fn target_orientation(point: &ProjectedPoint) -> Orientation {
        Orientation {
            pitch: point.y * PITCH_GAIN,
            yaw: point.x * YAW_GAIN,
            roll: 0.0,
        }
    }
}

pub fn project(longitude: f64, latitude: f64) -> ProjectedPoint {
    GeoProjector::default().project(longitude, latitude)
}

pub fn target_orientation(point: &ProjectedPoint) -> Orientation {
    GeoProjector::target_orientation(point)
}

/// Fraction of a transition that has elapsed, clamped to `[0, 1]`.
pub fn transition_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Orientation `elapsed_ms` into a linear transition from `start` to `target`.
pub fn step_orientation(
    start: &Orientation,
    target: &Orientation,
    elapsed_ms: f64,
    duration_ms: f64,
) -> Orientation {
    let progress = transition_progress(elapsed_ms, duration_ms);
    if progress >= 1.0 {
        return *target;
    }
    start.lerp(target, progress)
}

/// Inverse of [`GeoProjector::project`] for a unit direction, as `(u, v)`
/// texture coordinates of an equirectangular map (u = 0 at longitude -180).
pub fn equirect_uv(direction: Vec3) -> (f32, f32) {
    let n = direction.normalize();
    let (x, y, z) = (n.x as f64, n.y as f64, n.z as f64);
    let phi = y.clamp(-1.0, 1.0).acos();
    let mut theta = z.atan2(-x);
    if theta < 0.0 {
        theta += 2.0 * PI;
    }
    ((theta / (2.0 * PI)) as f32, (phi / PI) as f32)
}
