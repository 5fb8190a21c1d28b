// Course definition (RON) & tunables shared by the simulation and the world builder.
use bevy::math::Vec3;
use bevy::prelude::Resource;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Vec3Def { pub x: f32, pub y: f32, pub z: f32 }
impl Vec3Def { pub fn to_vec3(self) -> Vec3 { Vec3::new(self.x, self.y, self.z) } }

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TargetDef {
    pub position: Vec3Def,
    pub radius: f32,
    pub inner_ratio: f32,  // bullseye zone as a fraction of radius
    pub thickness: f32,    // board depth, used to seat stuck arrows on the face
}

impl TargetDef {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self { position: Vec3Def { x, y, z }, radius: 0.25 * 1.5, inner_ratio: 0.5, thickness: 0.05 }
    }
}

/// Every tunable of a run. Missing RON fields fall back to the defaults below.
#[derive(Debug, Deserialize, Clone, Resource, PartialEq)]
#[serde(default)]
pub struct CourseConfig {
    // Rider & track
    pub camera_speed: f32,   // m/s along -Z
    pub eye_height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,  // Hz, rectified sine
    pub end_z: f32,          // run ends once the rider passes this z
    pub fov_y_degrees: f32,

    // Projectiles
    pub gravity: f32,
    pub base_arrow_speed: f32,
    pub min_release_charge: f32,
    pub hit_tolerance: f32,
    pub ground_level: f32,
    pub ground_clearance: f32,
    pub cleanup_distance: f32,

    // Auto-aim spring
    pub rotation_spring: f32,
    pub rotation_damping: f32,
    pub vertical_limit_degrees: f32,
    pub drag_sensitivity: f32,

    pub targets: Vec<TargetDef>,

    // Presentation
    pub world_seed: u64,
    pub release_slice_secs: f32,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            camera_speed: 5.0,
            eye_height: 1.0,
            bob_amplitude: 0.15,
            bob_frequency: 1.0,
            end_z: -115.0,
            fov_y_degrees: 75.0,
            gravity: -9.8,
            base_arrow_speed: 30.0,
            min_release_charge: 0.1,
            hit_tolerance: 0.1,
            ground_level: 0.0,
            ground_clearance: 0.1,
            cleanup_distance: 200.0,
            rotation_spring: 0.25,
            rotation_damping: 0.5,
            vertical_limit_degrees: 60.0,
            drag_sensitivity: 0.005,
            targets: vec![
                TargetDef::at(3.0, 1.0, -30.0),
                TargetDef::at(4.0, 1.0, -60.0),
                TargetDef::at(5.0, 1.0, -90.0),
            ],
            world_seed: 7,
            release_slice_secs: 0.25,
        }
    }
}

impl CourseConfig {
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<CourseConfig>(data)
    }

    pub fn vertical_limit(&self) -> f32 {
        self.vertical_limit_degrees.to_radians()
    }

    pub fn camera_start(&self) -> Vec3 {
        Vec3::new(0.0, self.eye_height, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg = CourseConfig::from_ron("(camera_speed: 0.0, world_seed: 99)").unwrap();
        assert_eq!(cfg.camera_speed, 0.0);
        assert_eq!(cfg.world_seed, 99);
        assert_eq!(cfg.gravity, -9.8);
        assert_eq!(cfg.targets.len(), 3);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(CourseConfig::from_ron("(camera_speed: \"fast\")").is_err());
    }
}
