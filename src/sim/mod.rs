//! Host-independent game model.
//!
//! [`ArcherySim`] owns every piece of mutable run state (phase, score, draw,
//! camera rig, live arrows). Input is applied through its command methods
//! between frames; [`ArcherySim::update`] advances one frame and returns the
//! [`RenderCommands`] a presentation layer needs. Nothing in here touches the
//! ECS world, so the same model runs under Bevy, in tests, or in any other loop.

pub mod camera_rig;
pub mod charge;
pub mod config;
pub mod phase;
pub mod projectile;

use bevy::log::{debug, info};
use bevy::math::{Quat, Vec2, Vec3};

use camera_rig::{screen_ray, CameraRig};
use charge::{launch_speed, ChargeRelease, ChargeState};
use config::CourseConfig;
use phase::{Fortune, GamePhase};
use projectile::{build_targets, Arrow, ArrowId, ArrowOutcome, FlightParams, Target, TargetId};

/// Where a release aims.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimInput {
    /// Pointer/touch up position in logical pixels, plus the viewport size.
    Screen { point: Vec2, viewport: Vec2 },
    /// Camera forward.
    Forward,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    GameStarted,
    GameReset,
    GameEnded { score: u32, fortune: Fortune },
    ArrowFired { arrow: ArrowId, position: Vec3, direction: Vec3, speed: f32, charge: f32 },
    ChargeCancelled,
    TargetHit { arrow: ArrowId, target: TargetId, points: u32, distance: f32 },
    ArrowGrounded { arrow: ArrowId, position: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowPlacement {
    /// World space; `heading` is `None` when too slow to orient.
    Free { position: Vec3, heading: Option<Vec3> },
    /// Parented to a target; `local_offset` is in the target frame.
    Stuck { target: TargetId, local_offset: Vec3, heading: Option<Vec3> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowView {
    pub id: ArrowId,
    pub placement: ArrowPlacement,
}

impl From<&Arrow> for ArrowView {
    fn from(a: &Arrow) -> Self {
        let placement = match (a.attached_to, a.local_offset) {
            (Some(target), Some(local_offset)) => ArrowPlacement::Stuck { target, local_offset, heading: a.heading() },
            _ => ArrowPlacement::Free { position: a.position, heading: a.heading() },
        };
        Self { id: a.id, placement }
    }
}

/// Everything a host needs to present one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommands {
    pub phase: GamePhase,
    pub score: u32,
    pub moving: bool,
    pub camera: CameraPose,
    pub charge_percent: f32,
    pub arrows: Vec<ArrowView>,
    /// Arrows dropped since the previous frame (cleanup or reset).
    pub removed: Vec<ArrowId>,
    pub events: Vec<SimEvent>,
}

impl Default for RenderCommands {
    fn default() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            moving: false,
            camera: CameraPose { position: Vec3::ZERO, rotation: Quat::IDENTITY },
            charge_percent: 0.0,
            arrows: Vec::new(),
            removed: Vec::new(),
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArcherySim {
    config: CourseConfig,
    flight: FlightParams,
    debug: bool,
    phase: GamePhase,
    track_time: f32, // advances only while riding; drives the bob and the draw
    score: u32,
    fortune: Option<Fortune>,
    moving: bool,
    charge: ChargeState,
    rig: CameraRig,
    targets: Vec<Target>,
    arrows: Vec<Arrow>,
    next_arrow: u32,
    pending_events: Vec<SimEvent>,
    pending_removed: Vec<ArrowId>,
}

impl ArcherySim {
    pub fn new(config: CourseConfig, debug: bool) -> Self {
        let rig = CameraRig::new(&config);
        let targets = build_targets(&config);
        let flight = FlightParams::from(&config);
        Self {
            config,
            flight,
            debug,
            phase: GamePhase::NotStarted,
            track_time: 0.0,
            score: 0,
            fortune: None,
            moving: false,
            charge: ChargeState::default(),
            rig,
            targets,
            arrows: Vec::new(),
            next_arrow: 0,
            pending_events: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    pub fn config(&self) -> &CourseConfig { &self.config }
    pub fn phase(&self) -> GamePhase { self.phase }
    pub fn score(&self) -> u32 { self.score }
    pub fn fortune(&self) -> Option<Fortune> { self.fortune }
    pub fn is_debug(&self) -> bool { self.debug }
    pub fn is_moving(&self) -> bool { self.moving }
    pub fn elapsed(&self) -> f32 { self.track_time }
    pub fn charge(&self) -> &ChargeState { &self.charge }
    pub fn camera(&self) -> &CameraRig { &self.rig }
    pub fn targets(&self) -> &[Target] { &self.targets }
    pub fn arrows(&self) -> &[Arrow] { &self.arrows }

    // ---------------- Commands ----------------

    /// NotStarted -> Running. Ignored in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            debug!("start ignored in phase {:?}", self.phase);
            return false;
        }
        self.reset_run();
        self.phase = GamePhase::Running;
        self.moving = true;
        self.pending_events.push(SimEvent::GameStarted);
        info!("RUN started targets={}", self.targets.len());
        true
    }

    /// Running/Ended -> NotStarted.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::NotStarted {
            debug!("restart ignored before start");
            return false;
        }
        self.reset_run();
        self.phase = GamePhase::NotStarted;
        self.moving = false;
        self.pending_events.push(SimEvent::GameReset);
        info!("RUN reset");
        true
    }

    pub fn begin_charge(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.charge.start(self.track_time)
    }

    /// Drop the current draw without firing (e.g. a cancelled touch).
    pub fn cancel_charge(&mut self) {
        if self.charge.charging {
            self.charge.cancel();
            self.pending_events.push(SimEvent::ChargeCancelled);
        }
    }

    /// Release the draw. Returns the new arrow when one was fired.
    pub fn release(&mut self, aim: AimInput) -> Option<ArrowId> {
        if self.phase != GamePhase::Running {
            self.cancel_charge();
            return None;
        }
        match self.charge.release(self.config.min_release_charge) {
            ChargeRelease::Idle => None,
            ChargeRelease::TooShort => {
                debug!("release below minimum draw, no arrow");
                self.pending_events.push(SimEvent::ChargeCancelled);
                None
            }
            ChargeRelease::Fire(amount) => {
                let direction = self.resolve_aim(aim);
                Some(self.fire(direction, amount))
            }
        }
    }

    /// Debug only: pause/resume riding. Returns the new motion state.
    pub fn toggle_motion(&mut self) -> bool {
        if self.debug && self.phase == GamePhase::Running {
            self.moving = !self.moving;
            debug!("motion toggled moving={}", self.moving);
        }
        self.moving
    }

    /// Debug only: free-look drag suspends auto-aim while held.
    pub fn set_dragging(&mut self, dragging: bool) {
        if self.debug {
            self.rig.dragging = dragging;
        }
    }

    pub fn drag_look(&mut self, delta: Vec2) {
        if self.debug && self.rig.dragging {
            self.rig.drag(delta, &self.config);
        }
    }

    pub fn resolve_aim(&self, aim: AimInput) -> Vec3 {
        match aim {
            AimInput::Screen { point, viewport } => {
                screen_ray(point, viewport, self.rig.orientation(), self.config.fov_y_degrees.to_radians())
                    .unwrap_or_else(|| self.rig.forward())
            }
            AimInput::Forward => self.rig.forward(),
        }
    }

    fn fire(&mut self, direction: Vec3, amount: f32) -> ArrowId {
        let id = ArrowId(self.next_arrow);
        self.next_arrow += 1;
        let speed = launch_speed(self.config.base_arrow_speed, amount);
        let position = self.rig.position;
        self.arrows.push(Arrow::new(id, position, direction * speed));
        self.pending_events.push(SimEvent::ArrowFired { arrow: id, position, direction, speed, charge: amount });
        info!("SHOT arrow={} charge={:.2} speed={:.2} dir=({:.2},{:.2},{:.2})",
            id.0, amount, speed, direction.x, direction.y, direction.z);
        id
    }

    fn reset_run(&mut self) {
        self.track_time = 0.0;
        self.score = 0;
        self.fortune = None;
        self.charge.cancel();
        self.rig.reset(&self.config);
        self.pending_removed.extend(self.arrows.drain(..).map(|a| a.id));
    }

    fn finish(&mut self) {
        self.phase = GamePhase::Ended;
        self.moving = false;
        self.cancel_charge();
        let fortune = Fortune::from_score(self.score);
        self.fortune = Some(fortune);
        self.pending_events.push(SimEvent::GameEnded { score: self.score, fortune });
        info!("RUN ended score={} fortune={}", self.score, fortune.english());
    }

    // ---------------- Frame ----------------

    /// Advance one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) -> RenderCommands {
        let dt = dt.max(0.0);
        let running = self.phase == GamePhase::Running;

        if running && self.moving {
            self.rig.advance(dt, self.config.camera_speed);
            self.track_time += dt;
        }
        self.rig.apply_bob(self.track_time, &self.config);

        if running && self.rig.position.z <= self.config.end_z {
            self.finish();
        }

        if self.phase == GamePhase::Running {
            self.charge.update(self.track_time);
        }

        self.step_arrows(dt);

        if self.phase == GamePhase::Running && !(self.debug && self.rig.dragging) {
            self.rig.auto_aim(dt, &self.targets, &self.config);
        }

        RenderCommands {
            phase: self.phase,
            score: self.score,
            moving: self.moving,
            camera: CameraPose { position: self.rig.position, rotation: self.rig.orientation() },
            charge_percent: self.charge.gauge_percent(),
            arrows: self.arrows.iter().map(ArrowView::from).collect(),
            removed: std::mem::take(&mut self.pending_removed),
            events: std::mem::take(&mut self.pending_events),
        }
    }

    fn step_arrows(&mut self, dt: f32) {
        let scoring = self.phase == GamePhase::Running;
        for arrow in self.arrows.iter_mut() {
            match arrow.step(dt, &self.flight, &self.targets) {
                Some(ArrowOutcome::Hit(hit)) => {
                    // Hits after the run ended still stick, but the result is final.
                    let points = if scoring { hit.points } else { 0 };
                    self.score += points;
                    self.pending_events.push(SimEvent::TargetHit {
                        arrow: arrow.id,
                        target: hit.target,
                        points,
                        distance: hit.distance,
                    });
                    info!("HIT arrow={} target={} dist={:.3} points={} score={}",
                        arrow.id.0, hit.target.0, hit.distance, points, self.score);
                }
                Some(ArrowOutcome::Grounded) => {
                    self.pending_events.push(SimEvent::ArrowGrounded { arrow: arrow.id, position: arrow.position });
                }
                None => {}
            }
        }

        let camera = self.rig.position;
        let max_dist = self.config.cleanup_distance;
        let removed = &mut self.pending_removed;
        self.arrows.retain(|a| {
            let keep = a.position.distance(camera) <= max_dist;
            if !keep {
                removed.push(a.id);
            }
            keep
        });
    }
}
