// Scene sync: applies the sim's RenderCommands to the ECS world.
// Owns the arrow id -> entity map; the sim never sees entities.
use bevy::math::primitives::{Cone, Cuboid, Cylinder};
use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use crate::plugins::core_sim::{ArcherySet, FrameOutput};
use crate::plugins::world::{ArcheryCamera, TargetEntities};
use crate::sim::projectile::{ArrowId, TargetId};
use crate::sim::{ArrowPlacement, ArrowView};

#[derive(Component, Debug, Clone, Copy)]
pub struct ArrowVisual { pub id: ArrowId }

/// Set once an arrow entity has been reparented under its target.
#[derive(Component)]
pub struct StuckArrow;

#[derive(Resource, Default, Debug)]
pub struct ArrowEntities(pub HashMap<ArrowId, Entity>);

#[derive(Resource)]
struct ArrowAssets {
    shaft: Handle<Mesh>,
    head: Handle<Mesh>,
    fletching: Handle<Mesh>,
    shaft_mat: Handle<StandardMaterial>,
    head_mat: Handle<StandardMaterial>,
    fletching_mat: Handle<StandardMaterial>,
}

impl FromWorld for ArrowAssets {
    fn from_world(world: &mut World) -> Self {
        let (shaft, head, fletching) = {
            let mut meshes = world.resource_mut::<Assets<Mesh>>();
            (
                meshes.add(Cylinder::new(0.01, 0.5)),
                meshes.add(Cone { radius: 0.015, height: 0.05 }),
                meshes.add(Cuboid::new(0.02, 0.05, 0.01)),
            )
        };
        let mut mats = world.resource_mut::<Assets<StandardMaterial>>();
        Self {
            shaft,
            head,
            fletching,
            shaft_mat: mats.add(Color::srgb(0.55, 0.27, 0.07)),
            head_mat: mats.add(Color::srgb(0.5, 0.5, 0.5)),
            fletching_mat: mats.add(Color::srgb(1.0, 0.0, 0.0)),
        }
    }
}

pub struct SceneSyncPlugin;
impl Plugin for SceneSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArrowEntities>()
            .init_resource::<ArrowAssets>()
            .add_systems(Update, (sync_camera, sync_arrows).in_set(ArcherySet::Present));
    }
}

/// Transform for a free arrow; keeps `current` rotation when there is no heading.
pub fn free_arrow_transform(position: Vec3, heading: Option<Vec3>, current: Option<Transform>) -> Transform {
    let mut t = current.unwrap_or_default();
    t.translation = position;
    if let Some(h) = heading {
        t.look_to(h, Vec3::Y);
    }
    t
}

fn sync_camera(frame: Res<FrameOutput>, mut q_cam: Query<&mut Transform, With<ArcheryCamera>>) {
    let Ok(mut cam_t) = q_cam.get_single_mut() else { return; };
    let pose = frame.0.camera;
    cam_t.translation = pose.position;
    cam_t.rotation = pose.rotation;
}

fn sync_arrows(
    mut commands: Commands,
    frame: Res<FrameOutput>,
    assets: Res<ArrowAssets>,
    targets: Res<TargetEntities>,
    mut entities: ResMut<ArrowEntities>,
    mut q_arrows: Query<(&mut Transform, Option<&StuckArrow>), With<ArrowVisual>>,
) {
    for id in &frame.0.removed {
        if let Some(entity) = entities.0.remove(id) {
            // Also unlinks it from a target's children.
            commands.entity(entity).despawn_recursive();
        }
    }

    for view in &frame.0.arrows {
        match entities.0.get(&view.id).copied() {
            Some(entity) => {
                let Ok((mut t, stuck)) = q_arrows.get_mut(entity) else { continue; };
                match view.placement {
                    ArrowPlacement::Free { position, heading } => {
                        *t = free_arrow_transform(position, heading, Some(*t));
                    }
                    ArrowPlacement::Stuck { target, local_offset, .. } => {
                        if stuck.is_none() {
                            attach_to_target(&mut commands, &targets, entity, target, local_offset);
                            t.translation = local_offset;
                        }
                    }
                }
            }
            None => {
                let entity = spawn_arrow(&mut commands, &assets, view);
                if let ArrowPlacement::Stuck { target, local_offset, .. } = view.placement {
                    attach_to_target(&mut commands, &targets, entity, target, local_offset);
                }
                entities.0.insert(view.id, entity);
            }
        }
    }
}

fn attach_to_target(
    commands: &mut Commands,
    targets: &TargetEntities,
    arrow: Entity,
    target: TargetId,
    local_offset: Vec3,
) {
    let Some(&parent) = targets.0.get(&target) else {
        warn!("arrow stuck in unknown target {:?}", target);
        return;
    };
    commands.entity(arrow).insert(StuckArrow).set_parent(parent);
    debug!("arrow {:?} attached to target {:?} at {:?}", arrow, target, local_offset);
}

/// Arrow model: -Z is the tip.
fn spawn_arrow(commands: &mut Commands, assets: &ArrowAssets, view: &ArrowView) -> Entity {
    let transform = match view.placement {
        ArrowPlacement::Free { position, heading } => free_arrow_transform(position, heading, None),
        ArrowPlacement::Stuck { local_offset, heading, .. } => free_arrow_transform(local_offset, heading, None),
    };
    let lay_flat = Quat::from_rotation_x(-FRAC_PI_2);
    commands
        .spawn((SpatialBundle::from_transform(transform), ArrowVisual { id: view.id }))
        .with_children(|parent| {
            parent.spawn(PbrBundle {
                mesh: assets.shaft.clone(),
                material: assets.shaft_mat.clone(),
                transform: Transform::from_xyz(0.0, 0.0, -0.25).with_rotation(lay_flat),
                ..default()
            });
            parent.spawn(PbrBundle {
                mesh: assets.head.clone(),
                material: assets.head_mat.clone(),
                transform: Transform::from_xyz(0.0, 0.0, -0.5).with_rotation(lay_flat),
                ..default()
            });
            for y in [0.02, -0.02] {
                parent.spawn(PbrBundle {
                    mesh: assets.fletching.clone(),
                    material: assets.fletching_mat.clone(),
                    transform: Transform::from_xyz(0.0, y, 0.0),
                    ..default()
                });
            }
        })
        .id()
}
