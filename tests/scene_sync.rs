use mounted_archery::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::collections::HashMap;
use std::time::Duration;

// Headless app with scene sync: mesh/material stores only, one target entity, no renderer.
fn build_app() -> (App, Entity) {
    let config = CourseConfig {
        camera_speed: 0.0,
        bob_amplitude: 0.0,
        targets: vec![TargetDef::at(0.5, 1.0, -3.0)],
        ..CourseConfig::default()
    };
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(AssetPlugin::default())
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)))
        .insert_resource(config)
        .add_plugins(CoreSimPlugin)
        .add_plugins(SceneSyncPlugin);
    let target = app.world_mut()
        .spawn(SpatialBundle::from_transform(Transform::from_xyz(0.5, 1.0, -3.0)))
        .id();
    app.insert_resource(TargetEntities(HashMap::from([(TargetId(0), target)])));
    (app, target)
}

fn shoot_until_hit(app: &mut App) -> ArrowId {
    {
        let mut sim = app.world_mut().resource_mut::<Simulation>();
        sim.0.start();
        sim.0.begin_charge();
    }
    for _ in 0..200 { app.update(); }
    let id = app.world_mut().resource_mut::<Simulation>().0
        .release(AimInput::Forward)
        .expect("full draw fires");
    for _ in 0..60 {
        app.update();
        if app.world().resource::<Simulation>().0.score() > 0 { break; }
    }
    assert!(app.world().resource::<Simulation>().0.score() > 0, "arrow should stick");
    id
}

#[test]
fn stuck_arrow_is_parented_at_its_local_offset() {
    let (mut app, target) = build_app();
    let id = shoot_until_hit(&mut app);
    let entity = *app.world().resource::<ArrowEntities>().0.get(&id).expect("arrow entity");

    let offset = app.world().resource::<Simulation>().0.arrows()[0]
        .local_offset
        .expect("stuck arrow has an offset");
    let parent = app.world().get::<Parent>(entity).expect("arrow is parented");
    assert_eq!(parent.get(), target);
    let t = app.world().get::<Transform>(entity).expect("arrow transform");
    assert!((t.translation - offset).length() < 1e-6, "{:?} vs {:?}", t.translation, offset);
    let children = app.world().get::<Children>(target).expect("target has children");
    assert!(children.contains(&entity));

    // Stays put on later frames.
    for _ in 0..10 { app.update(); }
    let t = app.world().get::<Transform>(entity).expect("arrow transform");
    assert!((t.translation - offset).length() < 1e-6);
}

#[test]
fn restart_despawns_stuck_arrows() {
    let (mut app, target) = build_app();
    let id = shoot_until_hit(&mut app);
    let entity = *app.world().resource::<ArrowEntities>().0.get(&id).expect("arrow entity");

    assert!(app.world_mut().resource_mut::<Simulation>().0.restart());
    app.update();

    assert!(app.world().get_entity(entity).is_none(), "arrow entity should be despawned");
    assert!(app.world().resource::<ArrowEntities>().0.is_empty());
    let orphaned = app.world().get::<Children>(target).map_or(false, |c| !c.is_empty());
    assert!(!orphaned, "target still lists arrow children");
    assert!(app.world().get_entity(target).is_some());
}
