// Arrow flight, target collision & scoring.
use bevy::math::Vec3;

use crate::sim::config::{CourseConfig, TargetDef};

pub const BULLSEYE_POINTS: u32 = 5;
pub const RING_POINTS: u32 = 3;
/// Below this speed an arrow keeps its last heading.
pub const MIN_HEADING_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrowId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub position: Vec3,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub thickness: f32,
}

impl Target {
    pub fn from_def(id: TargetId, def: &TargetDef) -> Self {
        Self {
            id,
            position: def.position.to_vec3(),
            outer_radius: def.radius,
            inner_radius: def.radius * def.inner_ratio,
            thickness: def.thickness,
        }
    }

    /// Targets are translation-only frames.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        world - self.position
    }

    pub fn points_for(&self, distance: f32) -> u32 {
        if distance < self.inner_radius { BULLSEYE_POINTS } else { RING_POINTS }
    }

    /// Where a stuck arrow rests: along center -> arrow, capped at the rim,
    /// pulled back half a board so it sits on the face.
    pub fn rest_position(&self, arrow_position: Vec3) -> Vec3 {
        let offset = arrow_position - self.position;
        let dist = offset.length();
        if dist <= 0.0 {
            return self.position;
        }
        let seated = dist.min(self.outer_radius) - self.thickness / 2.0;
        self.position + offset / dist * seated
    }
}

pub fn build_targets(cfg: &CourseConfig) -> Vec<Target> {
    cfg.targets
        .iter()
        .enumerate()
        .map(|(i, def)| Target::from_def(TargetId(i as u32), def))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    pub target: TargetId,
    pub distance: f32,
    pub points: u32,
    pub rest_position: Vec3,
    pub local_offset: Vec3,
}

/// First target in list order whose tolerance sphere contains `position`.
pub fn find_target_hit(position: Vec3, targets: &[Target], tolerance: f32) -> Option<TargetHit> {
    targets.iter().find_map(|t| {
        let distance = position.distance(t.position);
        if distance >= t.outer_radius + tolerance {
            return None;
        }
        let rest_position = t.rest_position(position);
        Some(TargetHit {
            target: t.id,
            distance,
            points: t.points_for(distance),
            rest_position,
            local_offset: t.to_local(rest_position),
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    pub gravity: f32,
    pub hit_tolerance: f32,
    pub floor: f32, // ground level + clearance
}

impl From<&CourseConfig> for FlightParams {
    fn from(cfg: &CourseConfig) -> Self {
        Self {
            gravity: cfg.gravity,
            hit_tolerance: cfg.hit_tolerance,
            floor: cfg.ground_level + cfg.ground_clearance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowOutcome {
    Hit(TargetHit),
    Grounded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub id: ArrowId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub stopped: bool,
    pub attached_to: Option<TargetId>,
    pub local_offset: Option<Vec3>,
}

impl Arrow {
    pub fn new(id: ArrowId, position: Vec3, velocity: Vec3) -> Self {
        Self { id, position, velocity, stopped: false, attached_to: None, local_offset: None }
    }

    /// One explicit Euler step.
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
    }

    pub fn heading(&self) -> Option<Vec3> {
        if self.velocity.length() > MIN_HEADING_SPEED {
            Some(self.velocity.normalize())
        } else {
            None
        }
    }

    /// Advance a flying arrow and resolve collisions. Stopping is terminal:
    /// a stopped arrow never moves or scores again.
    pub fn step(&mut self, dt: f32, params: &FlightParams, targets: &[Target]) -> Option<ArrowOutcome> {
        if self.stopped {
            return None;
        }
        self.integrate(dt, params.gravity);

        if let Some(hit) = find_target_hit(self.position, targets, params.hit_tolerance) {
            self.stopped = true;
            self.attached_to = Some(hit.target);
            self.local_offset = Some(hit.local_offset);
            self.position = hit.rest_position;
            return Some(ArrowOutcome::Hit(hit));
        }

        if self.position.y < params.floor {
            self.position.y = params.floor;
            self.stopped = true;
            return Some(ArrowOutcome::Grounded);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_at(z: f32) -> Target {
        Target::from_def(TargetId(0), &TargetDef::at(0.0, 1.0, z))
    }

    #[test]
    fn rest_position_is_capped_at_rim() {
        let t = target_at(-10.0);
        let rest = t.rest_position(t.position + Vec3::new(0.0, 0.0, 0.45));
        let seated = rest.distance(t.position);
        assert!((seated - (t.outer_radius - t.thickness / 2.0)).abs() < 1e-5);
        assert!(rest.z > t.position.z);
    }

    #[test]
    fn rest_at_exact_center() {
        let t = target_at(-10.0);
        assert_eq!(t.rest_position(t.position), t.position);
    }

    #[test]
    fn local_offset_is_relative_to_target() {
        let t = target_at(-10.0);
        let hit = find_target_hit(t.position + Vec3::X * 0.1, &[t], 0.1).unwrap();
        assert!((hit.local_offset - (hit.rest_position - t.position)).length() < 1e-6);
    }

    #[test]
    fn slow_arrow_has_no_heading() {
        let a = Arrow::new(ArrowId(0), Vec3::ZERO, Vec3::new(0.05, 0.0, 0.0));
        assert!(a.heading().is_none());
    }
}
