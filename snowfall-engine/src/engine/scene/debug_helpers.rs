use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::SHADOW_VOLUME_HALF_EXTENT;

#[derive(Component)]
pub struct ShadowVolumeHelper;

/// Line-list outline of an axis-aligned box centred on the origin.
pub fn create_box_outline_mesh(half_extents: Vec3) -> Mesh {
    let corner = |x: f32, y: f32, z: f32| [x * half_extents.x, y * half_extents.y, z * half_extents.z];

    let mut positions = Vec::with_capacity(24);
    for (a, b) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        // Edges along x, y and z through each pair of signs.
        positions.push(corner(-1.0, a, b));
        positions.push(corner(1.0, a, b));
        positions.push(corner(a, -1.0, b));
        positions.push(corner(a, 1.0, b));
        positions.push(corner(a, b, -1.0));
        positions.push(corner(a, b, 1.0));
    }

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

/// Outline the directional light's shadow volume, parented to the light.
pub fn spawn_shadow_volume_helper(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    light: Entity,
) {
    let half = SHADOW_VOLUME_HALF_EXTENT;
    commands.spawn((
        Mesh3d(meshes.add(create_box_outline_mesh(Vec3::splat(half)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.6, 0.1),
            unlit: true,
            ..default()
        })),
        // The volume extends away from the light along its view direction.
        Transform::from_xyz(0.0, 0.0, -half),
        ShadowVolumeHelper,
        ChildOf(light),
    ));
    info!("Shadow volume helper enabled");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn box_outline_has_twelve_distinct_edges() {
        let mesh = create_box_outline_mesh(Vec3::new(1.0, 2.0, 3.0));
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("missing positions");
        };
        assert_eq!(positions.len(), 24);

        let mut edges: Vec<_> = positions
            .chunks(2)
            .map(|edge| {
                let mut pair = [edge[0], edge[1]];
                pair.sort_by(|a, b| a.partial_cmp(b).unwrap());
                pair
            })
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap());
        edges.dedup();
        assert_eq!(edges.len(), 12);
        assert!(positions.iter().all(|p| p[0].abs() == 1.0 && p[1].abs() == 2.0 && p[2].abs() == 3.0));
    }
}
