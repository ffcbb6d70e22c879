use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::core::projection::equirect_uv;
use crate::globe::rotation::GlobeOrientation;

const GLOBE_SUBDIVISIONS: u32 = 5;
const FALLBACK_OCEAN: Color = Color::srgb(0.12, 0.32, 0.58);

/// Root of the rotating globe; markers are its children.
#[derive(Component)]
pub struct GlobeRoot;

/// Earth surface material and whether its texture could be loaded
#[derive(Resource)]
pub struct GlobeSurface {
    pub material: Handle<StandardMaterial>,
    pub texture: Handle<Image>,
    pub texture_failed: bool,
}

/// Spawn the globe root with a unit-radius textured Earth as its child
pub fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<AppConfig>,
) {
    let texture: Handle<Image> = asset_server.load(config.globe_texture.clone());
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture.clone()),
        perceptual_roughness: 0.9,
        reflectance: 0.2,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::Visible,
            GlobeRoot,
            GlobeOrientation::default(),
            Name::new("Globe"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(generate_icosphere(GLOBE_SUBDIVISIONS))),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                Name::new("Earth"),
            ));
        });

    commands.insert_resource(GlobeSurface {
        material,
        texture,
        texture_failed: false,
    });
}

/// Fall back to a flat ocean colour if the Earth texture cannot be loaded
pub fn watch_globe_texture(
    asset_server: Res<AssetServer>,
    surface: Option<ResMut<GlobeSurface>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(mut surface) = surface else { return };
    if surface.texture_failed {
        return;
    }
    let Some(LoadState::Failed(err)) = asset_server.get_load_state(surface.texture.id()) else {
        return;
    };

    warn!("Globe texture failed to load ({}); using a plain globe", err);
    if let Some(mut material) = materials.get_mut(&surface.material) {
        material.base_color_texture = None;
        material.base_color = FALLBACK_OCEAN;
    }
    surface.texture_failed = true;
}

/// Unit icosphere with equirectangular UVs matching the marker projection.
/// Each subdivision level quadruples the triangle count.
pub fn generate_icosphere(subdivisions: u32) -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0; // Golden ratio
    let mut positions = vec![
        Vec3::new(-1.0, phi, 0.0).normalize(),
        Vec3::new(1.0, phi, 0.0).normalize(),
        Vec3::new(-1.0, -phi, 0.0).normalize(),
        Vec3::new(1.0, -phi, 0.0).normalize(),
        Vec3::new(0.0, -1.0, phi).normalize(),
        Vec3::new(0.0, 1.0, phi).normalize(),
        Vec3::new(0.0, -1.0, -phi).normalize(),
        Vec3::new(0.0, 1.0, -phi).normalize(),
        Vec3::new(phi, 0.0, -1.0).normalize(),
        Vec3::new(phi, 0.0, 1.0).normalize(),
        Vec3::new(-phi, 0.0, -1.0).normalize(),
        Vec3::new(-phi, 0.0, 1.0).normalize(),
    ];

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    for _ in 0..subdivisions {
        let mut next = Vec::with_capacity(indices.len() * 4);
        midpoints.clear();

        for tri in indices.chunks(3) {
            let (v1, v2, v3) = (tri[0], tri[1], tri[2]);
            let a = midpoint(&mut positions, &mut midpoints, v1, v2);
            let b = midpoint(&mut positions, &mut midpoints, v2, v3);
            let c = midpoint(&mut positions, &mut midpoints, v3, v1);

            next.extend_from_slice(&[v1, a, c, v2, b, a, v3, c, b, a, b, c]);
        }

        indices = next;
    }

    let mut normals: Vec<Vec3> = positions.clone();
    let mut uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| {
            let (u, v) = equirect_uv(*p);
            [u, v]
        })
        .collect();

    fix_texture_seams(&mut positions, &mut uvs, &mut normals, &mut indices);

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    v1: u32,
    v2: u32,
) -> u32 {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let mid = ((positions[v1 as usize] + positions[v2 as usize]) / 2.0).normalize();
    positions.push(mid);
    let index = positions.len() as u32 - 1;
    cache.insert(key, index);
    index
}

/// Duplicate vertices of triangles that straddle the u = 0/1 seam so the
/// texture does not smear back across the whole map.
fn fix_texture_seams(
    positions: &mut Vec<Vec3>,
    uvs: &mut Vec<[f32; 2]>,
    normals: &mut Vec<Vec3>,
    indices: &mut [u32],
) {
    for tri in indices.chunks_mut(3) {
        let us = [
            uvs[tri[0] as usize][0],
            uvs[tri[1] as usize][0],
            uvs[tri[2] as usize][0],
        ];
        let max_du = (us[0] - us[1])
            .abs()
            .max((us[0] - us[2]).abs())
            .max((us[1] - us[2]).abs());
        if max_du <= 0.5 {
            continue;
        }

        for (slot, u) in tri.iter_mut().zip(us) {
            if u < 0.25 {
                let idx = *slot as usize;
                positions.push(positions[idx]);
                normals.push(normals[idx]);
                uvs.push([u + 1.0, uvs[idx][1]]);
                *slot = positions.len() as u32 - 1;
            }
        }
    }
}
