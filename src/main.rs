use bevy::prelude::*;
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};

use mounted_archery::prelude::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.53, 0.81, 0.92)))
        .insert_resource(Msaa::Sample4)
        .insert_resource(AmbientLight {
            color: Color::srgb(0.60, 0.60, 0.65),
            brightness: 600.0,
        })
        .insert_resource(DebugMode::detect());

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(bevy_embedded_assets::EmbeddedAssetPlugin {
        mode: bevy_embedded_assets::PluginMode::ReplaceDefault,
    });

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mounted Archery".into(),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CoreSimPlugin)      // course config + sim driver
        .add_plugins(WorldPlugin)        // ground, mountains, sky, targets
        .add_plugins(InputPlugin)        // mouse / touch / debug keys
        .add_plugins(SceneSyncPlugin)    // camera & arrow entities
        .add_plugins(HudPlugin)          // charge gauge
        .add_plugins(ScreensPlugin)      // start / end screens
        .add_plugins(GameAudioPlugin)    // hoofbeats + sfx
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default())
        .run();
}
