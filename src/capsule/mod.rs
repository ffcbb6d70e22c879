//! Time capsule module
//!
//! A per-session message board tied to city names, plus the state of the
//! composer form.

use bevy::prelude::*;
use chrono::{DateTime, Utc};

pub mod board;

pub use board::{CapsuleMessage, MessageBoard, SubmitError};

/// Text currently typed into the composer form.
#[derive(Resource, Debug, Default)]
pub struct CapsuleComposer {
    pub author: String,
    pub message: String,
    pub last_error: Option<SubmitError>,
}

impl CapsuleComposer {
    pub fn can_submit(&self, city: Option<&str>) -> bool {
        board::validate(city, &self.author, &self.message).is_ok()
    }

    /// Post the draft to `board`. On success the message is cleared and the
    /// author kept for the next one.
    pub fn submit(
        &mut self,
        board: &mut MessageBoard,
        city: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), SubmitError> {
        match board.submit(city, &self.author, &self.message, now) {
            Ok(stored) => {
                info!("Time capsule message left in {}", stored.city);
                self.message.clear();
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err);
                Err(err)
            }
        }
    }
}

pub struct CapsulePlugin;

impl Plugin for CapsulePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MessageBoard>()
            .init_resource::<CapsuleComposer>();
    }
}
