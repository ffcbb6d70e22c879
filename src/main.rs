use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod capsule;
mod cities;
mod clock;
mod config;
mod core;
mod globe;
mod ui;
mod weather;

use capsule::CapsulePlugin;
use cities::{CitiesPlugin, CityCatalog};
use clock::ClockPlugin;
use config::AppConfig;
use globe::GlobePlugin;
use ui::UiPlugin;
use weather::WeatherPlugin;

const CAMERA_RADIUS: f32 = 2.5;
const CAMERA_MIN_RADIUS: f32 = 1.5;
const CAMERA_MAX_RADIUS: f32 = 4.0;

#[derive(Component)]
pub struct MainCamera;

// Setup scene and cameras
pub fn setup(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(CAMERA_RADIUS),
        yaw: Some(0.0),
        pitch: Some(0.0),
        zoom_lower_limit: CAMERA_MIN_RADIUS,
        zoom_upper_limit: Some(CAMERA_MAX_RADIUS),
        // Orbit and zoom only
        pan_sensitivity: 0.0,
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, CAMERA_RADIUS).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 2.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<CityCatalog> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = CityCatalog::load(path)?;
            info!("Loaded {} cities from {}", catalog.len(), path.display());
            Ok(catalog)
        }
        None => Ok(CityCatalog::builtin()?),
    }
}

fn main() -> anyhow::Result<()> {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "One Day Around the World".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Logging is up from here on. An unknown timezone in the catalog stops
    // the app before the window opens.
    let config = AppConfig::load_or_default();
    let catalog = load_catalog(&config)?;
    info!("City catalog ready with {} cities", catalog.len());
    app.insert_resource(config);
    app.insert_resource(catalog);

    app.add_plugins(EguiPlugin::default());
    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    // Add our custom plugins
    app.add_plugins(GlobePlugin);
    app.add_plugins(CitiesPlugin);
    app.add_plugins(ClockPlugin);
    app.add_plugins(WeatherPlugin);
    app.add_plugins(CapsulePlugin);
    app.add_plugins(UiPlugin);

    app.add_systems(Startup, setup);

    app.run();
    Ok(())
}
