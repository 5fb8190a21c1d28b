//! Library entry for integration tests & external tooling.
//! `sim` is the engine-free game model; `plugins` wires it into Bevy.

pub mod sim;
pub mod plugins {
    pub mod core_sim;
    pub mod course;
    pub mod world;
    pub mod input;
    pub mod scene_sync;
    pub mod hud;
    pub mod screens;
    pub mod game_audio;
}
pub mod prelude;
