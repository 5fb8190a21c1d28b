// HUD: vertical charge gauge. Fill height tracks the draw (amount * 100 %).
use bevy::prelude::*;

use crate::plugins::core_sim::{ArcherySet, FrameOutput};

#[derive(Component)]
pub struct ChargeGauge;
#[derive(Component)]
pub struct ChargeGaugeFill;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_charge_gauge)
            .add_systems(Update, update_charge_gauge.in_set(ArcherySet::Present));
    }
}

fn spawn_charge_gauge(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    right: Val::Px(24.0),
                    bottom: Val::Px(24.0),
                    width: Val::Px(18.0),
                    height: Val::Px(180.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::FlexEnd,
                    padding: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                background_color: Color::srgba(0.08, 0.08, 0.10, 0.7).into(),
                ..default()
            },
            ChargeGauge,
        ))
        .with_children(|parent| {
            parent.spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Percent(100.0),
                        height: Val::Percent(0.0),
                        ..default()
                    },
                    background_color: Color::srgb(0.15, 0.60, 0.25).into(),
                    ..default()
                },
                ChargeGaugeFill,
            ));
        });
}

/// Green -> yellow -> red as the draw fills.
pub fn gauge_color(percent: f32) -> Color {
    let p = (percent / 100.0).clamp(0.0, 1.0);
    if p < 0.7 {
        let t = p / 0.7;
        Color::srgb(0.15 + (0.85 - 0.15) * t, 0.60 + (0.80 - 0.60) * t, 0.25 + (0.10 - 0.25) * t)
    } else {
        let t = (p - 0.7) / 0.3;
        Color::srgb(0.85 + (0.90 - 0.85) * t, 0.80 + (0.20 - 0.80) * t, 0.10 + (0.15 - 0.10) * t)
    }
}

fn update_charge_gauge(
    frame: Res<FrameOutput>,
    mut q_fill: Query<(&mut Style, &mut BackgroundColor), With<ChargeGaugeFill>>,
) {
    if !frame.is_changed() { return; }
    let percent = frame.0.charge_percent;
    if let Ok((mut style, mut color)) = q_fill.get_single_mut() {
        style.height = Val::Percent(percent);
        *color = gauge_color(percent).into();
    }
}
