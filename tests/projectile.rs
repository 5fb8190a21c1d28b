use bevy::math::Vec3;
use mounted_archery::sim::config::{CourseConfig, TargetDef};
use mounted_archery::sim::projectile::*;

fn params() -> FlightParams {
    FlightParams::from(&CourseConfig::default())
}

fn target(id: u32, x: f32, y: f32, z: f32) -> Target {
    Target::from_def(TargetId(id), &TargetDef::at(x, y, z))
}

#[test]
fn gravity_integration_matches_explicit_euler() {
    let dt = 1.0 / 60.0;
    let v0 = Vec3::new(0.0, 5.0, -10.0);
    let mut a = Arrow::new(ArrowId(0), Vec3::new(0.0, 10.0, 0.0), v0);
    let n = 30;
    for _ in 0..n {
        assert!(a.step(dt, &params(), &[]).is_none());
    }
    let g = -9.8;
    // v_k = v0 + g*k*dt, position sums v_1..v_n
    let expected_y = 10.0 + v0.y * dt * n as f32 + g * dt * dt * (n * (n + 1) / 2) as f32;
    assert!((a.position.y - expected_y).abs() < 1e-3, "y={} expected={}", a.position.y, expected_y);
    assert!((a.position.z - (-10.0 * dt * n as f32)).abs() < 1e-4);
    assert!((a.velocity.y - (v0.y + g * dt * n as f32)).abs() < 1e-4);
}

#[test]
fn bullseye_and_ring_points() {
    let t = target(0, 0.0, 1.0, -10.0);
    let center = find_target_hit(t.position + Vec3::new(0.0, 0.1, 0.0), &[t], 0.1).unwrap();
    assert_eq!(center.points, BULLSEYE_POINTS);
    let ring = find_target_hit(t.position + Vec3::new(0.0, 0.3, 0.0), &[t], 0.1).unwrap();
    assert_eq!(ring.points, RING_POINTS);
    // Tolerance widens the hit sphere beyond the board.
    let edge = find_target_hit(t.position + Vec3::new(0.0, 0.45, 0.0), &[t], 0.1).unwrap();
    assert_eq!(edge.points, RING_POINTS);
    assert!(find_target_hit(t.position + Vec3::new(0.0, 0.5, 0.0), &[t], 0.1).is_none());
}

#[test]
fn first_target_in_list_wins_overlap() {
    let a = target(0, 0.0, 1.0, -10.0);
    let b = target(1, 0.2, 1.0, -10.0);
    let p = Vec3::new(0.15, 1.0, -10.0); // closer to b
    let hit = find_target_hit(p, &[a, b], 0.1).unwrap();
    assert_eq!(hit.target, TargetId(0));
    let hit = find_target_hit(p, &[b, a], 0.1).unwrap();
    assert_eq!(hit.target, TargetId(1));
}

#[test]
fn stuck_arrow_never_scores_again() {
    let t = target(0, 0.0, 1.0, -2.0);
    let mut a = Arrow::new(ArrowId(0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -20.0));
    let mut hits = 0;
    for _ in 0..120 {
        if let Some(ArrowOutcome::Hit(hit)) = a.step(1.0 / 60.0, &params(), &[t]) {
            hits += 1;
            assert_eq!(hit.target, TargetId(0));
        }
    }
    assert_eq!(hits, 1);
    assert!(a.stopped);
    assert_eq!(a.attached_to, Some(TargetId(0)));
    let rest = a.position;
    assert!(a.step(1.0 / 60.0, &params(), &[t]).is_none());
    assert_eq!(a.position, rest);
}

#[test]
fn arrow_stops_on_ground() {
    let p = params();
    let mut a = Arrow::new(ArrowId(3), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -5.0));
    let mut outcome = None;
    for _ in 0..240 {
        if let Some(o) = a.step(1.0 / 60.0, &p, &[]) {
            outcome = Some(o);
            break;
        }
    }
    assert_eq!(outcome, Some(ArrowOutcome::Grounded));
    assert!(a.stopped);
    assert!(a.attached_to.is_none());
    assert!((a.position.y - p.floor).abs() < 1e-6);
}
