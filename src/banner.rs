// Unlock banners that fade in and out when a stage first clears.

use bevy::prelude::*;

use crate::stages::Screen;
use crate::triggers::StageCleared;

pub struct BannerPlugin;

impl Plugin for BannerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_banner, fade_banner).run_if(in_state(Screen::Town)),
        );
    }
}

const FADE_IN: f32 = 0.2;
const HOLD: f32 = 2.5;
const FADE_OUT: f32 = 1.0;
const TOTAL: f32 = FADE_IN + HOLD + FADE_OUT;

const BANNER_GOLD: Color = Color::srgb(1.0, 0.92, 0.5);

#[derive(Resource)]
struct BannerTimer(f32);

#[derive(Component)]
struct BannerRoot;

#[derive(Component)]
struct BannerText;

fn spawn_banner(
    mut commands: Commands,
    mut cleared: MessageReader<StageCleared>,
    existing: Query<Entity, With<BannerRoot>>,
) {
    for &StageCleared(stage) in cleared.read() {
        let Some(note) = stage.unlock_note() else {
            continue;
        };

        // Replace any banner still fading from a previous clear.
        for entity in &existing {
            commands.entity(entity).despawn();
        }
        commands.insert_resource(BannerTimer(0.0));

        commands
            .spawn((
                BannerRoot,
                DespawnOnExit(Screen::Town),
                Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    position_type: PositionType::Absolute,
                    top: Val::Px(32.0),
                    ..default()
                },
                GlobalZIndex(150),
            ))
            .with_children(|parent| {
                parent.spawn((
                    BannerText,
                    Text::new(note),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(BANNER_GOLD.with_alpha(0.0)),
                ));
            });
    }
}

fn fade_banner(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: Option<ResMut<BannerTimer>>,
    roots: Query<Entity, With<BannerRoot>>,
    mut texts: Query<&mut TextColor, With<BannerText>>,
) {
    let Some(timer) = timer.as_mut() else {
        return;
    };

    timer.0 += time.delta_secs();
    let t = timer.0;

    if t >= TOTAL {
        for entity in &roots {
            commands.entity(entity).despawn();
        }
        commands.remove_resource::<BannerTimer>();
        return;
    }

    let alpha = if t < FADE_IN {
        t / FADE_IN
    } else if t < FADE_IN + HOLD {
        1.0
    } else {
        1.0 - (t - FADE_IN - HOLD) / FADE_OUT
    };

    for mut color in &mut texts {
        color.0 = BANNER_GOLD.with_alpha(alpha);
    }
}
