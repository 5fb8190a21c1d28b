use mounted_archery::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Minimal app (no window, assets or scene) driving the sim at a fixed 60 Hz delta.
fn build_app(config: CourseConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)))
        .insert_resource(config)
        .add_plugins(CoreSimPlugin);
    app
}

fn drain_events(app: &App, reader: &mut bevy::ecs::event::ManualEventReader<ArcheryEvent>) -> Vec<SimEvent> {
    let events = app.world().resource::<Events<ArcheryEvent>>();
    reader.read(events).map(|e| e.0.clone()).collect()
}

#[test]
fn resources_present() {
    let app = build_app(CourseConfig::default());
    assert!(app.world().get_resource::<Simulation>().is_some());
    assert!(app.world().get_resource::<FrameOutput>().is_some());
    assert_eq!(app.world().resource::<DebugMode>().0, false);
}

#[test]
fn idle_before_start() {
    let mut app = build_app(CourseConfig::default());
    for _ in 0..10 { app.update(); }
    let frame = &app.world().resource::<FrameOutput>().0;
    assert_eq!(frame.phase, GamePhase::NotStarted);
    assert_eq!(frame.camera.position.z, 0.0);
}

#[test]
fn camera_rides_forward_once_started() {
    let mut app = build_app(CourseConfig::default());
    let mut reader = app.world().resource::<Events<ArcheryEvent>>().get_reader();
    app.world_mut().resource_mut::<Simulation>().0.start();
    app.update();
    let events = drain_events(&app, &mut reader);
    assert!(events.contains(&SimEvent::GameStarted), "events: {events:?}");

    for _ in 0..59 { app.update(); }
    let frame = &app.world().resource::<FrameOutput>().0;
    assert_eq!(frame.phase, GamePhase::Running);
    assert!(frame.moving);
    // ~1 s at 5 m/s
    assert!(frame.camera.position.z < -4.0 && frame.camera.position.z > -6.0, "z={}", frame.camera.position.z);
}

#[test]
fn shot_events_reach_the_ecs_queue() {
    let mut app = build_app(CourseConfig::default());
    let mut reader = app.world().resource::<Events<ArcheryEvent>>().get_reader();
    {
        let mut sim = app.world_mut().resource_mut::<Simulation>();
        sim.0.start();
        sim.0.begin_charge();
    }
    for _ in 0..30 { app.update(); }
    assert!(app.world().resource::<FrameOutput>().0.charge_percent > 10.0);

    let fired = app.world_mut().resource_mut::<Simulation>().0.release(AimInput::Forward);
    assert_eq!(fired, Some(ArrowId(0)));
    app.update();
    let events = drain_events(&app, &mut reader);
    assert!(events.iter().any(|e| matches!(e, SimEvent::ArrowFired { arrow: ArrowId(0), .. })), "events: {events:?}");
    let frame = &app.world().resource::<FrameOutput>().0;
    assert_eq!(frame.arrows.len(), 1);
    assert_eq!(frame.charge_percent, 0.0);
}
