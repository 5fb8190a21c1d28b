use bevy::prelude::*;

use crate::plugins::course::load_course_config;
use crate::sim::config::CourseConfig;
use crate::sim::{ArcherySim, RenderCommands, SimEvent};

// Core simulation driver: owns the ArcherySim resource and steps it once per frame.

/// The game model. Input systems mutate it through its command methods.
#[derive(Resource, Debug)]
pub struct Simulation(pub ArcherySim);

/// Output of the latest `ArcherySim::update`, read by presentation systems.
#[derive(Resource, Debug, Default)]
pub struct FrameOutput(pub RenderCommands);

/// `?debug=true` (wasm) or `--debug` (native): free-look drag & motion toggle.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugMode(pub bool);

impl DebugMode {
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let flag = web_sys::window()
                .and_then(|w| w.location().search().ok())
                .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
                .and_then(|params| params.get("debug"));
            DebugMode(flag.as_deref() == Some("true"))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            DebugMode(std::env::args().any(|a| a == "--debug"))
        }
    }
}

/// Sim events re-broadcast through the ECS event queue for audio & screens.
#[derive(Event, Debug, Clone)]
pub struct ArcheryEvent(pub SimEvent);

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcherySet {
    Input,
    Simulate,
    Present,
}

#[derive(Resource, Default)]
pub struct LogState { pub last_logged_second: u64 }

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        // Respect a pre-inserted CourseConfig / DebugMode (tests, embedding hosts).
        if !app.world().contains_resource::<CourseConfig>() {
            app.insert_resource(load_course_config());
        }
        app.init_resource::<DebugMode>();
        let course = app.world().resource::<CourseConfig>().clone();
        let debug = app.world().resource::<DebugMode>().0;
        if debug {
            info!("debug mode: free-look drag (right button) & Space motion toggle enabled");
        }

        app.insert_resource(Simulation(ArcherySim::new(course, debug)))
            .init_resource::<FrameOutput>()
            .init_resource::<LogState>()
            .add_event::<ArcheryEvent>()
            .configure_sets(Update, (ArcherySet::Input, ArcherySet::Simulate, ArcherySet::Present).chain())
            .add_systems(Update, (step_simulation, debug_log_each_second).chain().in_set(ArcherySet::Simulate));
    }
}

fn step_simulation(
    time: Res<Time>,
    mut sim: ResMut<Simulation>,
    mut frame: ResMut<FrameOutput>,
    mut ev_out: EventWriter<ArcheryEvent>,
) {
    let output = sim.0.update(time.delta_seconds());
    ev_out.send_batch(output.events.iter().cloned().map(ArcheryEvent));
    frame.0 = output;
}

fn debug_log_each_second(sim: Res<Simulation>, mut log_state: ResMut<LogState>) {
    let sim = &sim.0;
    if !sim.is_moving() { return; }
    let current_second = sim.elapsed() as u64;
    if current_second == 0 || current_second == log_state.last_logged_second { return; }
    log_state.last_logged_second = current_second;
    let cam = sim.camera().position;
    debug!("T+{}s cam=({:.2},{:.2},{:.2}) arrows={} score={}",
        current_second, cam.x, cam.y, cam.z, sim.arrows().len(), sim.score());
}
