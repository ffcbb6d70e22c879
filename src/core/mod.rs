//! Core computations
//!
//! Pure functions shared by the scene and the UI:
//! - Geographic projection onto the marker sphere and the globe-facing rotation
//! - Time-of-day buckets and the presentation tokens derived from them
//! - Timezone parsing and offset labels

pub mod projection;
pub mod time_of_day;
pub mod zone;

pub use projection::{GeoProjector, Orientation, ProjectedPoint};
pub use time_of_day::{Contrast, Gradient, TimeOfDay, TimeSample};
