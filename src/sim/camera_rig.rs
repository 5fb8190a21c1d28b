// Rider camera: track motion, gallop bob, spring-damped auto-aim & free-look.
use bevy::math::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::sim::config::CourseConfig;
use crate::sim::projectile::Target;

/// Yaw (`horizontal`, about +Y) and pitch (`vertical`, about local +X) in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRotation {
    pub horizontal: f32,
    pub vertical: f32,
}

impl CameraRotation {
    pub fn orientation(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.horizontal, self.vertical, 0.0)
    }

    pub fn forward(self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Rotation that makes the camera look along `dir`.
    pub fn facing(dir: Vec3) -> Self {
        let horizontal_dist = (dir.x * dir.x + dir.z * dir.z).sqrt();
        Self {
            horizontal: (-dir.x).atan2(-dir.z),
            vertical: dir.y.atan2(horizontal_dist),
        }
    }
}

/// Wrap an angle into [-PI, PI].
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Full-wave rectified sine bob.
pub fn gallop_bob(t: f32, frequency: f32, amplitude: f32) -> f32 {
    (t * frequency * TAU).sin().abs() * amplitude
}

pub fn nearest_target(from: Vec3, targets: &[Target]) -> Option<&Target> {
    let mut best: Option<(&Target, f32)> = None;
    for t in targets {
        let d = from.distance(t.position);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((t, d));
        }
    }
    best.map(|(t, _)| t)
}

/// World-space ray through a screen point (logical pixels, origin top-left).
/// Returns `None` for an empty viewport.
pub fn screen_ray(point: Vec2, viewport: Vec2, orientation: Quat, fov_y: f32) -> Option<Vec3> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc_x = point.x / viewport.x * 2.0 - 1.0;
    let ndc_y = -(point.y / viewport.y * 2.0 - 1.0);
    let half_h = (fov_y * 0.5).tan();
    let aspect = viewport.x / viewport.y;
    let view_dir = Vec3::new(ndc_x * half_h * aspect, ndc_y * half_h, -1.0);
    Some((orientation * view_dir).normalize())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: CameraRotation,
    pub target_rotation: CameraRotation,
    pub rotation_velocity: CameraRotation,
    pub dragging: bool,
}

impl CameraRig {
    pub fn new(cfg: &CourseConfig) -> Self {
        Self {
            position: cfg.camera_start(),
            rotation: CameraRotation::default(),
            target_rotation: CameraRotation::default(),
            rotation_velocity: CameraRotation::default(),
            dragging: false,
        }
    }

    pub fn reset(&mut self, cfg: &CourseConfig) {
        let dragging = self.dragging;
        *self = Self::new(cfg);
        self.dragging = dragging;
    }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.position.z -= speed * dt;
    }

    pub fn apply_bob(&mut self, t: f32, cfg: &CourseConfig) {
        self.position.y = cfg.eye_height + gallop_bob(t, cfg.bob_frequency, cfg.bob_amplitude);
    }

    pub fn orientation(&self) -> Quat {
        self.rotation.orientation()
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Spring toward the nearest target. The spring term is scaled to a
    /// 60 Hz reference frame, damping is applied per step.
    pub fn auto_aim(&mut self, dt: f32, targets: &[Target], cfg: &CourseConfig) {
        let limit = cfg.vertical_limit();
        let Some(target) = nearest_target(self.position, targets) else { return; };
        let dir = (target.position - self.position).normalize_or_zero();
        if dir != Vec3::ZERO {
            let want = CameraRotation::facing(dir);
            self.target_rotation = CameraRotation {
                horizontal: want.horizontal,
                vertical: want.vertical.clamp(-limit, limit),
            };
        }

        let dh = wrap_angle(self.target_rotation.horizontal - self.rotation.horizontal);
        let dv = self.target_rotation.vertical - self.rotation.vertical;
        let frame_scale = dt * 60.0;

        let vel = &mut self.rotation_velocity;
        vel.horizontal += dh * cfg.rotation_spring * frame_scale;
        vel.vertical += dv * cfg.rotation_spring * frame_scale;
        vel.horizontal *= 1.0 - cfg.rotation_damping;
        vel.vertical *= 1.0 - cfg.rotation_damping;

        self.rotation.horizontal += vel.horizontal;
        self.rotation.vertical = (self.rotation.vertical + vel.vertical).clamp(-limit, limit);
    }

    /// Manual look from a pointer drag (pixels).
    pub fn drag(&mut self, delta: Vec2, cfg: &CourseConfig) {
        let limit = cfg.vertical_limit();
        self.rotation.horizontal -= delta.x * cfg.drag_sensitivity;
        self.rotation.vertical = (self.rotation.vertical - delta.y * cfg.drag_sensitivity).clamp(-limit, limit);
        self.rotation_velocity = CameraRotation::default();
    }
}
