// Input plugin: pointer, touch & keyboard -> sim commands.
//
// Left press starts a draw, left release fires toward the release point.
// Touch mirrors the mouse. Debug mode adds right-drag free-look and a Space
// toggle for forward motion.

use bevy::input::mouse::MouseMotion;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::plugins::core_sim::{ArcherySet, Simulation};
use crate::sim::AimInput;

/// The touch that started the current draw, if any.
#[derive(Resource, Default, Debug)]
pub struct ActiveTouch(pub Option<u64>);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTouch>()
            .add_systems(Update, (
                handle_mouse_shot,
                handle_touch_shot,
                handle_debug_look,
                handle_debug_motion_toggle,
            ).in_set(ArcherySet::Input));
    }
}

fn screen_aim(window: &Window, point: Option<Vec2>) -> AimInput {
    match point {
        Some(point) => AimInput::Screen { point, viewport: Vec2::new(window.width(), window.height()) },
        None => AimInput::Forward,
    }
}

fn handle_mouse_shot(
    buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_ui: Query<&Interaction>,
    mut sim: ResMut<Simulation>,
) {
    // A press on a UI button (e.g. Start) never begins a draw.
    let over_ui = q_ui.iter().any(|i| *i == Interaction::Pressed);
    if buttons.just_pressed(MouseButton::Left) && !over_ui {
        sim.0.begin_charge();
    }
    if buttons.just_released(MouseButton::Left) {
        let aim = match q_window.get_single() {
            Ok(window) => screen_aim(window, window.cursor_position()),
            Err(_) => AimInput::Forward,
        };
        sim.0.release(aim);
    }
}

fn handle_touch_shot(
    mut ev_touch: EventReader<TouchInput>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut active: ResMut<ActiveTouch>,
    mut sim: ResMut<Simulation>,
) {
    for ev in ev_touch.read() {
        match ev.phase {
            TouchPhase::Started => {
                if active.0.is_none() {
                    active.0 = Some(ev.id);
                    sim.0.begin_charge();
                }
            }
            TouchPhase::Moved => {}
            TouchPhase::Ended => {
                if active.0 == Some(ev.id) {
                    active.0 = None;
                }
                // Any lifted touch fires a draw in progress, including one
                // whose starting touch was cancelled.
                if sim.0.charge().charging {
                    let aim = match q_window.get_single() {
                        Ok(window) => screen_aim(window, Some(ev.position)),
                        Err(_) => AimInput::Forward,
                    };
                    sim.0.release(aim);
                }
            }
            TouchPhase::Canceled => {
                // The draw survives a cancelled touch.
                if active.0 == Some(ev.id) {
                    active.0 = None;
                }
            }
        }
    }
}

fn handle_debug_look(
    buttons: Res<ButtonInput<MouseButton>>,
    mut ev_motion: EventReader<MouseMotion>,
    mut sim: ResMut<Simulation>,
) {
    if !sim.0.is_debug() {
        ev_motion.clear();
        return;
    }
    sim.0.set_dragging(buttons.pressed(MouseButton::Right));
    for m in ev_motion.read() {
        sim.0.drag_look(m.delta);
    }
}

fn handle_debug_motion_toggle(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if sim.0.is_debug() && keys.just_pressed(KeyCode::Space) {
        let moving = sim.0.toggle_motion();
        info!("debug: forward motion {}", if moving { "resumed" } else { "paused" });
    }
}
