//! City pins on the globe
//!
//! The layout is computed as plain [`MarkerSpec`] values; the systems below
//! are the only place that turns them into meshes.

use bevy::picking::prelude::*;
use bevy::prelude::*;

use crate::cities::{CityCatalog, CitySelection};
use crate::core::{GeoProjector, ProjectedPoint};
use crate::globe::GlobeRoot;

const PIN_HEAD_RADIUS: f32 = 0.018;
const PIN_HEAD_OFFSET: f32 = 0.04;
const PIN_BODY_RADIUS: f32 = 0.015;
const PIN_BODY_HEIGHT: f32 = 0.08;
const PIN_BODY_OFFSET: f32 = -0.01;
const RING_INNER: f32 = 0.025;
const RING_OUTER: f32 = 0.035;

/// A marker at `position`, selected or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSpec {
    pub city: usize,
    pub position: ProjectedPoint,
    pub selected: bool,
}

pub fn marker_specs(
    catalog: &CityCatalog,
    projector: &GeoProjector,
    selected: Option<usize>,
) -> Vec<MarkerSpec> {
    catalog
        .iter()
        .map(|(index, city, _zone)| MarkerSpec {
            city: index,
            position: projector.project(city.longitude(), city.latitude()),
            selected: selected == Some(index),
        })
        .collect()
}

/// Projector configured with the marker offset from the settings.
#[derive(Resource, Deref, Default, Clone, Copy)]
pub struct MarkerProjector(pub GeoProjector);

#[derive(Component, Debug, Clone, Copy)]
pub struct CityMarker {
    pub city: usize,
}

/// Head and body meshes of a pin; recoloured on selection.
#[derive(Component)]
pub struct PinPart;

#[derive(Component)]
pub struct SelectionRing;

#[derive(Resource)]
pub struct MarkerAssets {
    head_mesh: Handle<Mesh>,
    body_mesh: Handle<Mesh>,
    ring_mesh: Handle<Mesh>,
    idle_material: Handle<StandardMaterial>,
    selected_material: Handle<StandardMaterial>,
    ring_material: Handle<StandardMaterial>,
}

fn unlit(color: Color, alpha_mode: AlphaMode) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Startup system: spawn one pin per city as a child of the globe
pub fn spawn_city_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<CityCatalog>,
    projector: Res<MarkerProjector>,
    selection: Res<CitySelection>,
    globe: Single<Entity, With<GlobeRoot>>,
) {
    let assets = MarkerAssets {
        head_mesh: meshes.add(Sphere::new(PIN_HEAD_RADIUS)),
        body_mesh: meshes.add(Cone::new(PIN_BODY_RADIUS, PIN_BODY_HEIGHT)),
        ring_mesh: meshes.add(Annulus::new(RING_INNER, RING_OUTER)),
        idle_material: materials.add(unlit(Color::srgb_u8(0xff, 0x57, 0x22), AlphaMode::Opaque)),
        selected_material: materials
            .add(unlit(Color::srgb_u8(0xff, 0x3e, 0x00), AlphaMode::Opaque)),
        ring_material: materials.add(unlit(Color::srgba(1.0, 1.0, 1.0, 0.8), AlphaMode::Blend)),
    };

    let specs = marker_specs(&catalog, &projector, selection.current);
    let globe = *globe;
    for spec in &specs {
        let marker = commands
            .spawn((
                marker_transform(spec.position),
                Visibility::Visible,
                CityMarker { city: spec.city },
                Name::new(format!("Marker {}", spec.city)),
            ))
            .id();
        commands.entity(globe).add_child(marker);

        let material = if spec.selected {
            assets.selected_material.clone()
        } else {
            assets.idle_material.clone()
        };
        commands.entity(marker).with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.head_mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, PIN_HEAD_OFFSET, 0.0),
                PinPart,
                Pickable::default(),
            ));
            // Cone tip points down into the globe
            parent.spawn((
                Mesh3d(assets.body_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, PIN_BODY_OFFSET, 0.0)
                    .with_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
                PinPart,
                Pickable::default(),
            ));
            parent.spawn((
                Mesh3d(assets.ring_mesh.clone()),
                MeshMaterial3d(assets.ring_material.clone()),
                Transform::from_xyz(0.0, PIN_HEAD_OFFSET, 0.0),
                SelectionRing,
                if spec.selected {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                },
                Pickable::IGNORE,
            ));
        });
    }

    info!("Spawned {} city markers", specs.len());
    commands.insert_resource(assets);
}

/// Pin upright on the surface: local +Y along the outward normal.
fn marker_transform(position: ProjectedPoint) -> Transform {
    let translation = position.as_vec3();
    let mut normal = translation.normalize_or_zero();
    if normal.length_squared() < 1e-6 {
        normal = Vec3::Y;
    }
    Transform::from_translation(translation).with_rotation(Quat::from_rotation_arc(Vec3::Y, normal))
}

/// Select the city whose pin was clicked
pub fn handle_marker_clicks(
    mut click_events: MessageReader<Pointer<Click>>,
    markers: Query<&CityMarker>,
    parents: Query<&ChildOf>,
    mut selection: ResMut<CitySelection>,
) {
    for ev in click_events.read() {
        let mut entity = ev.entity;
        let marker = loop {
            if let Ok(marker) = markers.get(entity) {
                break Some(marker);
            }
            if let Ok(parent) = parents.get(entity) {
                entity = parent.parent();
                continue;
            }
            break None;
        };

        if let Some(marker) = marker
            && selection.current != Some(marker.city)
        {
            selection.select(marker.city);
        }
    }
}

/// Recolour pins and toggle rings when the selection changes
pub fn highlight_selected_marker(
    selection: Res<CitySelection>,
    assets: Option<Res<MarkerAssets>>,
    markers: Query<&CityMarker>,
    mut parts: Query<(&ChildOf, &mut MeshMaterial3d<StandardMaterial>), With<PinPart>>,
    mut rings: Query<(&ChildOf, &mut Visibility), With<SelectionRing>>,
) {
    let Some(assets) = assets else { return };
    if !selection.is_changed() {
        return;
    }

    let is_selected = |parent: &ChildOf| {
        markers
            .get(parent.parent())
            .is_ok_and(|m| selection.current == Some(m.city))
    };

    for (parent, mut material) in parts.iter_mut() {
        let wanted = if is_selected(parent) {
            &assets.selected_material
        } else {
            &assets.idle_material
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }

    for (parent, mut visibility) in rings.iter_mut() {
        *visibility = if is_selected(parent) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_specs_follow_catalog_order() {
        let catalog = CityCatalog::builtin().unwrap();
        let specs = marker_specs(&catalog, &GeoProjector::default(), Some(2));

        assert_eq!(specs.len(), catalog.len());
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.city, i);
            assert_eq!(spec.selected, i == 2);
        }
    }

    #[test]
    fn test_marker_specs_without_selection() {
        let catalog = CityCatalog::builtin().unwrap();
        let specs = marker_specs(&catalog, &GeoProjector::default(), None);
        assert!(specs.iter().all(|s| !s.selected));
    }

    #[test]
    fn test_marker_positions_use_projector_offset() {
        let catalog = CityCatalog::builtin().unwrap();
        let projector = GeoProjector::with_offset(1.02);
        for spec in marker_specs(&catalog, &projector, None) {
            assert!((spec.position.magnitude() - 1.02).abs() < 1e-9);
        }
    }

    #[test]
    fn test_marker_transform_points_outward() {
        let p = GeoProjector::default().project(31.2357, 30.0444);
        let transform = marker_transform(p);
        let up = transform.rotation * Vec3::Y;
        assert!((up - p.as_vec3().normalize()).length() < 1e-5);
        assert!((transform.translation - p.as_vec3()).length() < 1e-6);
    }
}
