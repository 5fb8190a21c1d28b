//! Convenience re-exports for frequently used types & plugins.
pub use crate::sim::{ArcherySim, AimInput, SimEvent, RenderCommands, ArrowView, ArrowPlacement, CameraPose};
pub use crate::sim::config::{CourseConfig, TargetDef, Vec3Def};
pub use crate::sim::phase::{GamePhase, Fortune};
pub use crate::sim::projectile::{ArrowId, TargetId};
pub use crate::plugins::core_sim::{Simulation, FrameOutput, DebugMode, ArcheryEvent, ArcherySet, LogState, CoreSimPlugin};
pub use crate::plugins::world::{WorldPlugin, ArcheryCamera, TargetEntities};
pub use crate::plugins::input::InputPlugin;
pub use crate::plugins::scene_sync::{SceneSyncPlugin, ArrowEntities};
pub use crate::plugins::hud::HudPlugin;
pub use crate::plugins::screens::ScreensPlugin;
pub use crate::plugins::game_audio::GameAudioPlugin;
