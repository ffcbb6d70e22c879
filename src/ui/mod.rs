//! User interface module
//!
//! This module handles UI state management, panels, and systems for the
//! egui-based user interface.

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub mod format;
pub mod panels;
pub mod state;
pub mod systems;

pub use state::{PanelTab, Theme, ThemeState, UiState};
pub use systems::ui_system;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        let theme = ThemeState::default();
        app.init_resource::<UiState>()
            .insert_resource(ClearColor(theme.gradient.bottom()))
            .insert_resource(theme)
            .add_systems(
                Update,
                systems::update_theme.after(crate::clock::tick_local_time),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (systems::apply_egui_theme, ui_system).chain(),
            );
    }
}
