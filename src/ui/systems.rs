//! UI systems for the egui interface

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use chrono::Utc;

use crate::capsule::{CapsuleComposer, MessageBoard};
use crate::cities::{CityCatalog, CitySelection};
use crate::clock::{DisplayedTime, WorldClock};
use crate::core::zone::viewer_offset_seconds;
use crate::globe::GlobeSurface;
use crate::ui::panels::{self, SelectorAction};
use crate::ui::state::{PanelTab, Theme, ThemeState, UiState};
use crate::weather::WeatherBoard;

/// Time-scale steps used by the `[` and `]` shortcuts
const TIME_SCALE_STEPS: [f32; 6] = [1.0, 10.0, 60.0, 300.0, 900.0, 3600.0];

#[derive(SystemParam)]
pub struct CapsuleParams<'w> {
    board: ResMut<'w, MessageBoard>,
    composer: ResMut<'w, CapsuleComposer>,
}

/// Main UI system that renders all the egui panels
pub fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<UiState>,
    mut clock: ResMut<WorldClock>,
    mut selection: ResMut<CitySelection>,
    mut capsule: CapsuleParams,
    catalog: Res<CityCatalog>,
    displayed: Res<DisplayedTime>,
    weather: Res<WeatherBoard>,
    surface: Option<Res<GlobeSurface>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut next = selection.current;
    if !ctx.wants_keyboard_input() {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::P) {
                state.show_panel = !state.show_panel;
            }
            if i.key_pressed(egui::Key::OpenBracket) {
                clock.time_scale = step_time_scale(clock.time_scale, false);
            }
            if i.key_pressed(egui::Key::CloseBracket) {
                clock.time_scale = step_time_scale(clock.time_scale, true);
            }
            if i.key_pressed(egui::Key::N) {
                clock.reset_to_now();
            }
            if i.key_pressed(egui::Key::Escape) {
                next = None;
            }
            let step = if i.key_pressed(egui::Key::ArrowRight) {
                Some(true)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Some(false)
            } else {
                None
            };
            if let Some(forward) = step {
                next = Some(cycle_city(&catalog, next, forward));
            }
        });
    }

    egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
        panels::render_header(ui, &mut clock, &mut state);
    });

    egui::TopBottomPanel::bottom("city_selector_panel").show(ctx, |ui| {
        match panels::render_city_selector(ui, &catalog, &clock, next) {
            Some(SelectorAction::Select(index)) => next = Some(index),
            Some(SelectorAction::Clear) => next = None,
            None => {}
        }
    });
    apply_selection(&mut selection, next);

    if !state.show_panel {
        return;
    }

    let city_name = selection
        .current
        .and_then(|i| catalog.get(i))
        .map(|c| c.name.clone());
    egui::SidePanel::right("city_panel")
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            panels::render_tabs(ui, &mut state);
            egui::ScrollArea::vertical().show(ui, |ui| match state.tab {
                PanelTab::CityInfo => {
                    panels::render_city_info(
                        ui,
                        &catalog,
                        &selection,
                        displayed.current(),
                        &weather,
                        clock.current_utc,
                        viewer_offset_seconds(clock.current_utc),
                    );
                    if surface.as_ref().is_some_and(|s| s.texture_failed) {
                        panels::render_texture_notice(ui);
                    }
                }
                PanelTab::TimeCapsule => {
                    let CapsuleParams { board, composer } = &mut capsule;
                    panels::render_time_capsule(
                        ui,
                        city_name.as_deref(),
                        composer,
                        board,
                        Utc::now(),
                    );
                }
            });
        });
}

/// Only a different city counts as a selection change.
pub fn apply_selection(selection: &mut ResMut<CitySelection>, current: Option<usize>) -> bool {
    selection.set_if_neq(CitySelection { current })
}

/// Next (or previous) city; with nothing selected, the first (or last).
pub fn cycle_city(catalog: &CityCatalog, current: Option<usize>, forward: bool) -> usize {
    match (current, forward) {
        (Some(i), true) => catalog.next_index(i),
        (Some(i), false) => catalog.previous_index(i),
        (None, true) => 0,
        (None, false) => catalog.len().saturating_sub(1),
    }
}

pub fn step_time_scale(current: f32, faster: bool) -> f32 {
    if faster {
        TIME_SCALE_STEPS
            .iter()
            .copied()
            .find(|s| *s > current + 1e-3)
            .unwrap_or(TIME_SCALE_STEPS[TIME_SCALE_STEPS.len() - 1])
    } else {
        TIME_SCALE_STEPS
            .iter()
            .rev()
            .copied()
            .find(|s| *s < current - 1e-3)
            .unwrap_or(TIME_SCALE_STEPS[0])
    }
}

/// Follow the displayed city's local time with the window styling
pub fn update_theme(
    displayed: Res<DisplayedTime>,
    mut theme: ResMut<ThemeState>,
    mut clear_color: ResMut<ClearColor>,
) {
    if !displayed.is_changed() {
        return;
    }
    let Some(tick) = displayed.current() else {
        return;
    };
    let mut next = *theme;
    if next.update(&tick.sample) {
        *theme = next;
        debug!(
            "Theme now {:?} ({})",
            theme.theme,
            tick.sample.gradient.css()
        );
        clear_color.0 = theme.gradient.bottom();
    }
}

pub fn apply_egui_theme(mut contexts: EguiContexts, theme: Res<ThemeState>) {
    if !theme.is_changed() {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let visuals = match theme.theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
}
