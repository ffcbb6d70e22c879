//! UI panel components and utilities
use bevy::prelude::*;
use bevy_egui::egui::{self, Color32};
use chrono::{DateTime, Utc};

use crate::capsule::{CapsuleComposer, MessageBoard};
use crate::cities::{CityCatalog, CitySelection};
use crate::clock::{Tick, WorldClock};
use crate::core::zone::{region_label, utc_offset_label, viewer_offset_label};
use crate::core::time_of_day::daytime_progress;
use crate::core::{Gradient, TimeSample};
use crate::ui::format;
use crate::ui::state::{PanelTab, UiState};
use crate::weather::{WeatherBoard, WeatherStatus};

/// Convert Bevy Color to egui Color32
pub fn bevy_to_egui_color(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Vertical gradient filling `rect`, one band per pair of stops.
pub fn gradient_mesh(rect: egui::Rect, gradient: &Gradient) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    let stops = gradient.stops();
    let last = stops.len().saturating_sub(1).max(1) as f32;
    for (i, [r, g, b]) in stops.iter().enumerate() {
        let y = rect.top() + rect.height() * (i as f32 / last);
        let color = Color32::from_rgb(*r, *g, *b);
        mesh.colored_vertex(egui::pos2(rect.left(), y), color);
        mesh.colored_vertex(egui::pos2(rect.right(), y), color);
    }
    for band in 0..stops.len().saturating_sub(1) as u32 {
        let top = band * 2;
        mesh.add_triangle(top, top + 1, top + 2);
        mesh.add_triangle(top + 1, top + 3, top + 2);
    }
    mesh
}

pub fn render_header(ui: &mut egui::Ui, clock: &mut WorldClock, state: &mut UiState) {
    ui.horizontal(|ui| {
        ui.heading("One Day Around the World");
        ui.separator();
        ui.label("Explore cities across time zones and see what's happening right now");
    });
    ui.horizontal(|ui| {
        ui.strong("UTC:");
        ui.monospace(clock.current_utc.format("%Y-%m-%d %H:%M:%S").to_string());
        ui.separator();

        ui.label("Speed:");
        ui.add(egui::Slider::new(&mut clock.time_scale, 1.0..=3600.0).logarithmic(true));
        ui.label(format::time_scale_label(clock.time_scale));
        if ui.button("1x").clicked() {
            clock.time_scale = 1.0;
        }
        if ui.button("Now").clicked() {
            clock.reset_to_now();
        }
        ui.separator();

        let toggle = if state.show_panel {
            "Hide Panel (P)"
        } else {
            "Show Panel (P)"
        };
        if ui.small_button(toggle).clicked() {
            state.show_panel = !state.show_panel;
        }
    });
}

/// What the city selector asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    Select(usize),
    Clear,
}

/// One button per city, labelled with the phase of its day right now.
pub fn render_city_selector(
    ui: &mut egui::Ui,
    catalog: &CityCatalog,
    clock: &WorldClock,
    current: Option<usize>,
) -> Option<SelectorAction> {
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for (index, city, zone) in catalog.iter() {
            let sample = TimeSample::at(clock.current_utc, zone);
            let selected = current == Some(index);
            let mut text = egui::RichText::new(format!(
                "{} {}",
                format::time_of_day_icon(sample.bucket),
                city.name
            ));
            if selected {
                text = text.strong();
            }
            if ui
                .selectable_label(selected, text)
                .on_hover_text(format!(
                    "{} ({})",
                    format::clock_label(&sample.instant),
                    sample.bucket.label()
                ))
                .clicked()
                && !selected
            {
                action = Some(SelectorAction::Select(index));
            }
        }
        ui.separator();
        if ui
            .add_enabled(current.is_some(), egui::Button::new("Spin (Esc)"))
            .clicked()
        {
            action = Some(SelectorAction::Clear);
        }
    });
    action
}

pub fn render_tabs(ui: &mut egui::Ui, state: &mut UiState) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.tab, PanelTab::CityInfo, "City Info");
        ui.selectable_value(&mut state.tab, PanelTab::TimeCapsule, "Time Capsule");
    });
    ui.separator();
}

pub fn render_city_info(
    ui: &mut egui::Ui,
    catalog: &CityCatalog,
    selection: &CitySelection,
    tick: Option<&Tick>,
    weather: &WeatherBoard,
    now: DateTime<Utc>,
    viewer_offset: i32,
) {
    let Some((index, city, zone)) = selection
        .current
        .and_then(|i| Some((i, catalog.get(i)?, catalog.zone(i)?)))
    else {
        ui.label("Select a city on the globe or in the list below.");
        return;
    };
    let Some(tick) = tick.filter(|t| t.city == index) else {
        ui.spinner();
        return;
    };
    let sample = &tick.sample;
    let status = weather.status(index);

    let background = ui.painter().add(egui::Shape::Noop);
    let card = egui::Frame::new()
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.visuals_mut().override_text_color =
                Some(bevy_to_egui_color(sample.contrast.text_color()));

            ui.heading(format!("📍 {}, {}", city.name, city.country));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format::clock_label(&sample.instant)).size(22.0));
                ui.label(sample.bucket.label());
            });
            ui.label(format::date_label(&sample.instant));
            ui.add(egui::ProgressBar::new(daytime_progress(&sample.instant)).show_percentage())
                .on_hover_text("Share of the local day gone by");

            if let Some(report) = status.and_then(WeatherStatus::report) {
                ui.horizontal(|ui| {
                    ui.label(format!("🌄 {}", format::sun_event_label(report.sunrise_hour)));
                    ui.add_space(16.0);
                    ui.label(format!("🌆 {}", format::sun_event_label(report.sunset_hour)));
                });
            }

            ui.separator();
            render_weather(ui, status);
        });
    ui.painter().set(
        background,
        egui::Shape::mesh(gradient_mesh(card.response.rect, &sample.gradient)),
    );

    ui.add_space(8.0);
    ui.label(city.description.as_str());
    ui.add_space(6.0);
    ui.strong("Did you know?");
    for fact in &city.trivia {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            ui.label(fact.as_str());
        });
    }

    ui.separator();
    ui.strong("Local Time Zone");
    ui.label(format!("{} ({})", city.timezone, region_label(&city.timezone)));
    ui.label(format!(
        "Time difference from UTC: {}",
        utc_offset_label(zone, now)
    ));
    ui.label(format!(
        "Time difference from your local time: {}",
        viewer_offset_label(zone, now, viewer_offset)
    ));
}

fn render_weather(ui: &mut egui::Ui, status: Option<&WeatherStatus>) {
    match status {
        Some(WeatherStatus::Ready(report)) => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(report.condition.icon()).size(28.0));
                ui.label(report.condition.label());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format::temperature_label(report))
                            .size(22.0)
                            .strong(),
                    );
                });
            });
            egui::Grid::new("weather_grid")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    ui.label("💨 Wind");
                    ui.label("💧 Humidity");
                    ui.end_row();
                    ui.label(format::wind_label(report));
                    ui.label(format::humidity_label(report));
                    ui.end_row();
                });
        }
        Some(WeatherStatus::Failed(err)) => {
            ui.label(format!("Weather unavailable: {}", err));
        }
        Some(WeatherStatus::Pending) | None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading weather...");
            });
        }
    }
}

pub fn render_time_capsule(
    ui: &mut egui::Ui,
    city: Option<&str>,
    composer: &mut CapsuleComposer,
    board: &mut MessageBoard,
    now: DateTime<Utc>,
) {
    match city {
        Some(name) => ui.heading(format!("Time Capsule - {}", name)),
        None => ui.heading("Time Capsule"),
    };

    ui.label("Your Name");
    ui.add(
        egui::TextEdit::singleline(&mut composer.author)
            .hint_text("Who are you?")
            .desired_width(f32::INFINITY),
    );
    ui.label("Your Message");
    ui.add(
        egui::TextEdit::multiline(&mut composer.message)
            .hint_text(format::composer_hint(city))
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    let enabled = composer.can_submit(city);
    if ui
        .add_enabled(enabled, egui::Button::new("Leave Your Mark"))
        .clicked()
    {
        if let Err(err) = composer.submit(board, city, now) {
            debug!("Time capsule message rejected: {}", err);
        }
    }
    if let Some(err) = composer.last_error {
        ui.colored_label(Color32::RED, err.to_string());
    }

    ui.add_space(12.0);
    let mut any = false;
    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for msg in board.for_city(city) {
                any = true;
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.strong(msg.author.as_str());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.weak(format::message_time_label(msg.timestamp));
                        });
                    });
                    ui.label(msg.message.as_str());
                });
            }
            if !any {
                ui.vertical_centered(|ui| {
                    ui.weak("Be the first to leave a message here!");
                });
            }
        });
}

pub fn render_texture_notice(ui: &mut egui::Ui) {
    ui.separator();
    ui.colored_label(
        Color32::from_rgb(0xe0, 0xa0, 0x30),
        "Earth texture could not be loaded; showing a plain globe.",
    );
}
