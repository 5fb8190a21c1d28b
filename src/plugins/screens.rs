// Start & end screens. The start screen holds the Start button; the end
// screen shows the final score, the fortune drawn from it, and Restart.

use bevy::prelude::*;

use crate::plugins::core_sim::{ArcheryEvent, ArcherySet, Simulation};
use crate::sim::SimEvent;

#[derive(Component)]
struct StartScreen;
#[derive(Component)]
struct EndScreen;
#[derive(Component)]
struct StartButton;
#[derive(Component)]
struct RestartButton;
#[derive(Component)]
struct ScoreText;
#[derive(Component)]
struct FortuneText;

pub struct ScreensPlugin;
impl Plugin for ScreensPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_screens)
            .add_systems(Update, screen_button_system.in_set(ArcherySet::Input))
            .add_systems(Update, apply_screen_events.in_set(ArcherySet::Present));
    }
}

fn overlay_style(display: Display) -> Style {
    Style {
        display,
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(14.0),
        ..default()
    }
}

fn spawn_screens(mut commands: Commands, assets: Res<AssetServer>) {
    let font = assets.load("fonts/FiraSans-Bold.ttf");
    let text = |value: &str, size: f32| {
        TextBundle::from_section(
            value,
            TextStyle { font: font.clone(), font_size: size, color: Color::srgb(0.95, 0.95, 1.0) },
        )
    };

    commands
        .spawn((
            NodeBundle {
                style: overlay_style(Display::Flex),
                background_color: BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.75)),
                ..default()
            },
            StartScreen,
        ))
        .with_children(|parent| {
            parent.spawn(text("Yabusame", 56.0));
            parent.spawn(text("Hold to draw, release to shoot", 22.0));
            spawn_button(parent, &font, "Start", Color::srgb(0.15, 0.55, 0.25), StartButton);
        });

    commands
        .spawn((
            NodeBundle {
                style: overlay_style(Display::None),
                background_color: BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.75)),
                ..default()
            },
            EndScreen,
        ))
        .with_children(|parent| {
            parent.spawn((text("Score: 0", 40.0), ScoreText));
            parent.spawn((text("", 72.0), FortuneText));
            spawn_button(parent, &font, "Restart", Color::srgb(0.55, 0.35, 0.15), RestartButton);
        });
}

fn spawn_button<T: Component>(
    parent: &mut ChildBuilder,
    font: &Handle<Font>,
    label: &str,
    base_color: Color,
    marker: T,
) {
    parent
        .spawn((
            ButtonBundle {
                style: Style {
                    width: Val::Px(240.0),
                    height: Val::Px(52.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: BackgroundColor(base_color),
                ..default()
            },
            marker,
        ))
        .with_children(|b| {
            b.spawn(TextBundle::from_section(
                label,
                TextStyle { font: font.clone(), font_size: 30.0, color: Color::srgb(0.95, 0.95, 1.0) },
            ));
        });
}

fn screen_button_system(
    mut sim: ResMut<Simulation>,
    q_buttons: Query<(&Interaction, Option<&StartButton>, Option<&RestartButton>), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, start, restart) in &q_buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if start.is_some() {
            sim.0.start();
        } else if restart.is_some() {
            sim.0.restart();
        }
    }
}

fn apply_screen_events(
    mut ev_game: EventReader<ArcheryEvent>,
    mut q_start: Query<&mut Style, (With<StartScreen>, Without<EndScreen>)>,
    mut q_end: Query<&mut Style, (With<EndScreen>, Without<StartScreen>)>,
    mut q_score: Query<&mut Text, (With<ScoreText>, Without<FortuneText>)>,
    mut q_fortune: Query<&mut Text, (With<FortuneText>, Without<ScoreText>)>,
) {
    for ArcheryEvent(ev) in ev_game.read() {
        let (show_start, show_end) = match ev {
            SimEvent::GameStarted => (false, false),
            SimEvent::GameReset => (true, false),
            SimEvent::GameEnded { score, fortune } => {
                if let Ok(mut text) = q_score.get_single_mut() {
                    text.sections[0].value = format!("Score: {score}");
                }
                if let Ok(mut text) = q_fortune.get_single_mut() {
                    text.sections[0].value = fortune.label().to_string();
                }
                (false, true)
            }
            _ => continue,
        };
        if let Ok(mut style) = q_start.get_single_mut() {
            style.display = if show_start { Display::Flex } else { Display::None };
        }
        if let Ok(mut style) = q_end.get_single_mut() {
            style.display = if show_end { Display::Flex } else { Display::None };
        }
    }
}
