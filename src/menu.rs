// Title screen

use bevy::prelude::*;

use crate::stages::Screen;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Menu), setup_menu).add_systems(
            Update,
            (button_visuals, button_actions, start_hotkey, controls_back)
                .run_if(in_state(Screen::Menu)),
        );
    }
}

const BUTTON_BG: Color = Color::srgb(0.10, 0.14, 0.22);
const BUTTON_BG_HOVER: Color = Color::srgb(0.16, 0.21, 0.31);
const BUTTON_BG_PRESSED: Color = Color::srgb(0.22, 0.28, 0.40);
const DIM_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);
const DIM_TEXT: Color = Color::srgba(0.8, 0.85, 0.9, 1.0);

#[derive(Component)]
enum MenuButton {
    Start,
    Controls,
    #[cfg(not(target_arch = "wasm32"))]
    Exit,
}

#[derive(Component)]
struct ControlsOverlay;

fn setup_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(20.0),
                ..default()
            },
            DespawnOnExit(Screen::Menu),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("VITA"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("a walkable resume"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(DIM_TEXT),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_button(parent, "Start", MenuButton::Start);
            spawn_button(parent, "Controls", MenuButton::Controls);
            #[cfg(not(target_arch = "wasm32"))]
            spawn_button(parent, "Exit", MenuButton::Exit);

            parent.spawn((
                Text::new("or press Enter"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.4)),
                Node {
                    margin: UiRect::top(Val::Px(16.0)),
                    ..default()
                },
            ));
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, marker: MenuButton) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(48.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(DIM_BORDER),
            BackgroundColor(BUTTON_BG),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<MenuButton>),
    >,
) {
    for (interaction, mut bg, mut border) in &mut query {
        let (background, outline) = match *interaction {
            Interaction::Pressed => (BUTTON_BG_PRESSED, Color::WHITE),
            Interaction::Hovered => (BUTTON_BG_HOVER, Color::WHITE),
            Interaction::None => (BUTTON_BG, DIM_BORDER),
        };
        *bg = background.into();
        *border = BorderColor::all(outline);
    }
}

fn button_actions(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<Screen>>,
    mut commands: Commands,
    #[cfg(not(target_arch = "wasm32"))] mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Start => {
                next_state.set(Screen::Town);
            }
            MenuButton::Controls => {
                spawn_controls_overlay(&mut commands);
            }
            #[cfg(not(target_arch = "wasm32"))]
            MenuButton::Exit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

fn start_hotkey(keyboard: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<Screen>>) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(Screen::Town);
    }
}

fn spawn_controls_overlay(commands: &mut Commands) {
    commands
        .spawn((
            ControlsOverlay,
            DespawnOnExit(Screen::Menu),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(14.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.04, 0.08, 0.96)),
            GlobalZIndex(200),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Controls"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            let lines = [
                "Walk with WASD or the arrow keys",
                "",
                "Step up to a building to read its part of the story",
                "Dismiss a dialogue with its button, Escape, Enter, or Space",
                "",
                "Visited stages open the gates further up the road",
            ];
            for line in lines {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(DIM_TEXT),
                ));
            }

            // The Back button carries no MenuButton marker; controls_back
            // picks it up by elimination.
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(120.0),
                        height: Val::Px(40.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        margin: UiRect::top(Val::Px(24.0)),
                        ..default()
                    },
                    BorderColor::all(DIM_BORDER),
                    BackgroundColor(BUTTON_BG),
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("Back"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn controls_back(
    mut commands: Commands,
    overlay: Query<Entity, With<ControlsOverlay>>,
    buttons: Query<&Interaction, (Changed<Interaction>, Without<MenuButton>)>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            for entity in &overlay {
                commands.entity(entity).despawn();
            }
        }
    }
}
