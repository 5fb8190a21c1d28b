use mounted_archery::plugins::input::InputPlugin;
use mounted_archery::prelude::{ArrowId, CoreSimPlugin, CourseConfig, Simulation};
use bevy::input::mouse::MouseMotion;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Headless app with the input systems but no window: releases aim along camera forward.
fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)))
        .insert_resource(CourseConfig::default())
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_event::<TouchInput>()
        .add_event::<MouseMotion>()
        .add_plugins(CoreSimPlugin)
        .add_plugins(InputPlugin);
    app.world_mut().resource_mut::<Simulation>().0.start();
    app
}

fn touch(app: &mut App, id: u64, phase: TouchPhase) {
    app.world_mut().send_event(TouchInput {
        phase,
        position: Vec2::new(400.0, 300.0),
        window: Entity::PLACEHOLDER,
        force: None,
        id,
    });
}

fn click(app: &mut App, press: bool) {
    let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    buttons.clear();
    if press { buttons.press(MouseButton::Left) } else { buttons.release(MouseButton::Left) }
}

fn frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().clear();
    }
}

#[test]
fn mouse_hold_and_release_fires() {
    let mut app = build_app();
    click(&mut app, true);
    frames(&mut app, 30);
    assert!(app.world().resource::<Simulation>().0.charge().charging);
    click(&mut app, false);
    frames(&mut app, 1);
    let sim = &app.world().resource::<Simulation>().0;
    assert_eq!(sim.arrows().len(), 1);
    assert_eq!(sim.arrows()[0].id, ArrowId(0));
}

#[test]
fn press_on_ui_button_does_not_draw() {
    let mut app = build_app();
    app.world_mut().spawn(Interaction::Pressed);
    click(&mut app, true);
    frames(&mut app, 30);
    assert!(!app.world().resource::<Simulation>().0.charge().charging);
    click(&mut app, false);
    frames(&mut app, 1);
    assert!(app.world().resource::<Simulation>().0.arrows().is_empty());
}

#[test]
fn cancelled_touch_keeps_the_draw() {
    let mut app = build_app();
    touch(&mut app, 1, TouchPhase::Started);
    frames(&mut app, 20);
    touch(&mut app, 1, TouchPhase::Canceled);
    frames(&mut app, 10);
    let sim = &app.world().resource::<Simulation>().0;
    assert!(sim.charge().charging);
    assert!(sim.charge().amount > 0.1);

    // The next lifted touch releases it.
    touch(&mut app, 2, TouchPhase::Started);
    touch(&mut app, 2, TouchPhase::Ended);
    frames(&mut app, 1);
    let sim = &app.world().resource::<Simulation>().0;
    assert!(!sim.charge().charging);
    assert_eq!(sim.arrows().len(), 1);
}
