use bevy::prelude::*;
use bevy::audio::{AudioSource, AudioBundle, AudioSink, AudioSinkPlayback, PlaybackSettings, PlaybackMode, Volume};

use crate::plugins::core_sim::{ArcheryEvent, ArcherySet, Simulation};
use crate::sim::phase::GamePhase;
use crate::sim::SimEvent;

pub struct GameAudioPlugin;

#[derive(Resource, Clone)]
struct SfxHandles {
    hoofbeat: Handle<AudioSource>,
    arrow_release: Handle<AudioSource>,
    arrow_hit: Handle<AudioSource>,
}

#[derive(Component)]
struct HoofbeatTag;

/// Release clip is cut after its opening slice.
#[derive(Component)]
struct ReleaseSlice(Timer);

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_audio_assets)
           .add_systems(Update, (gate_hoofbeat, play_event_sfx, cut_release_slices).in_set(ArcherySet::Present));
    }
}

fn load_audio_assets(mut commands: Commands, assets: Res<AssetServer>) {
    // Expected files: assets/audio/{hoofbeat,arrow_release,arrow_hit}.mp3
    let handles = SfxHandles {
        hoofbeat: assets.load("audio/hoofbeat.mp3"),
        arrow_release: assets.load("audio/arrow_release.mp3"),
        arrow_hit: assets.load("audio/arrow_hit.mp3"),
    };
    commands.insert_resource(handles.clone());
    commands.spawn((
        AudioBundle {
            source: handles.hoofbeat.clone(),
            settings: PlaybackSettings {
                mode: PlaybackMode::Loop,
                volume: Volume::new(0.3),
                paused: true,
                ..default()
            }
        },
        HoofbeatTag,
    ));
}

fn gate_hoofbeat(sim: Res<Simulation>, q_sink: Query<&AudioSink, With<HoofbeatTag>>) {
    let galloping = sim.0.phase() == GamePhase::Running && sim.0.is_moving();
    // Sink appears once the source has loaded.
    for sink in &q_sink {
        if galloping && sink.is_paused() {
            sink.play();
        } else if !galloping && !sink.is_paused() {
            sink.pause();
        }
    }
}

fn play_event_sfx(
    sfx: Option<Res<SfxHandles>>,
    sim: Res<Simulation>,
    mut commands: Commands,
    mut ev_game: EventReader<ArcheryEvent>,
) {
    let Some(sfx) = sfx else { return; };
    let slice = sim.0.config().release_slice_secs;

    for ArcheryEvent(ev) in ev_game.read() {
        match ev {
            SimEvent::ArrowFired { .. } => {
                commands.spawn((
                    AudioBundle {
                        source: sfx.arrow_release.clone(),
                        settings: PlaybackSettings {
                            mode: PlaybackMode::Despawn,
                            volume: Volume::new(0.7),
                            ..default()
                        }
                    },
                    ReleaseSlice(Timer::from_seconds(slice, TimerMode::Once)),
                ));
            }
            SimEvent::TargetHit { .. } => {
                commands.spawn(AudioBundle {
                    source: sfx.arrow_hit.clone(),
                    settings: PlaybackSettings {
                        mode: PlaybackMode::Despawn,
                        volume: Volume::new(0.9),
                        ..default()
                    }
                });
            }
            _ => {}
        }
    }
}

fn cut_release_slices(
    time: Res<Time>,
    mut commands: Commands,
    mut q_slices: Query<(Entity, &mut ReleaseSlice, Option<&AudioSink>)>,
) {
    for (entity, mut slice, sink) in &mut q_slices {
        if slice.0.tick(time.delta()).finished() {
            if let Some(sink) = sink {
                sink.stop();
            }
            commands.entity(entity).despawn();
        }
    }
}
