// Dialogue overlay and the gate that serializes dialogue sessions.

use bevy::prelude::*;

use crate::stages::{Screen, Stage};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueGate>().add_systems(
            Update,
            (
                sync_overlay.run_if(resource_changed::<DialogueGate>),
                dismiss_actions,
                cooldown_tick,
            )
                .run_if(in_state(Screen::Town)),
        );
    }
}

/// Delay after dismissal before movement resumes and triggers may fire
/// again, giving the player time to step out of the zone.
const RESUME_DELAY: f32 = 0.2;

const PANEL_BG: Color = Color::srgba(0.06, 0.09, 0.16, 0.92);
const BODY_TEXT: Color = Color::srgba(0.8, 0.85, 0.9, 1.0);

/// Single-session overlay state machine. At most one dialogue may be `Open`
/// or in `Cooldown` at a time; both states suppress movement and further
/// trigger dispatch.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub enum DialogueGate {
    #[default]
    Closed,
    Open {
        stage: Stage,
    },
    Cooldown {
        remaining: f32,
    },
}

impl DialogueGate {
    pub fn is_closed(&self) -> bool {
        matches!(self, DialogueGate::Closed)
    }

    /// Open the overlay for `stage`. Dispatch checks the gate first, so a
    /// live session here is a programming defect.
    pub fn open(&mut self, stage: Stage) {
        debug_assert!(self.is_closed(), "dialogue gate opened while not closed");
        *self = DialogueGate::Open { stage };
    }

    /// User dismissal: the overlay hides now, control returns after the delay.
    pub fn dismiss(&mut self) {
        if matches!(self, DialogueGate::Open { .. }) {
            *self = DialogueGate::Cooldown {
                remaining: RESUME_DELAY,
            };
        }
    }

    /// Advance the cooldown by `dt` seconds, closing once it elapses.
    pub fn tick(&mut self, dt: f32) {
        if let DialogueGate::Cooldown { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = DialogueGate::Closed;
            }
        }
    }
}

/// Run condition: true while no dialogue session is live.
pub fn gate_closed(gate: Res<DialogueGate>) -> bool {
    gate.is_closed()
}

#[derive(Component)]
struct DialogueOverlay;

#[derive(Component)]
struct CloseButton;

/// Keep the overlay entity in lockstep with the gate: spawned while `Open`,
/// gone otherwise.
fn sync_overlay(
    mut commands: Commands,
    gate: Res<DialogueGate>,
    overlay: Query<Entity, With<DialogueOverlay>>,
) {
    for entity in &overlay {
        commands.entity(entity).despawn();
    }
    if let DialogueGate::Open { stage } = *gate {
        spawn_overlay(&mut commands, stage);
    }
}

fn spawn_overlay(commands: &mut Commands, stage: Stage) {
    commands
        .spawn((
            DialogueOverlay,
            DespawnOnExit(Screen::Town),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                padding: UiRect::bottom(Val::Px(48.0)),
                ..default()
            },
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(560.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::FlexStart,
                        row_gap: Val::Px(12.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                    BackgroundColor(PANEL_BG),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(stage.title()),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    panel.spawn((
                        Text::new(stage.body()),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(BODY_TEXT),
                    ));
                    panel
                        .spawn((
                            CloseButton,
                            Button,
                            Node {
                                width: Val::Px(100.0),
                                height: Val::Px(36.0),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                border: UiRect::all(Val::Px(2.0)),
                                margin: UiRect::top(Val::Px(8.0)),
                                ..default()
                            },
                            BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                            BackgroundColor(Color::srgb(0.15, 0.15, 0.15)),
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new("Close"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                            ));
                        });
                });
        });
}

fn dismiss_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<CloseButton>)>,
    mut gate: ResMut<DialogueGate>,
) {
    if !matches!(*gate, DialogueGate::Open { .. }) {
        return;
    }

    let clicked = buttons.iter().any(|interaction| *interaction == Interaction::Pressed);
    let keyed = keyboard.any_just_pressed([KeyCode::Escape, KeyCode::Enter, KeyCode::Space]);
    if clicked || keyed {
        gate.dismiss();
    }
}

fn cooldown_tick(mut gate: ResMut<DialogueGate>, time: Res<Time>) {
    if matches!(*gate, DialogueGate::Cooldown { .. }) {
        gate.tick(time.delta_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_enters_cooldown_then_closes_after_delay() {
        let mut gate = DialogueGate::Closed;
        gate.open(Stage::Elementary);
        assert_eq!(
            gate,
            DialogueGate::Open {
                stage: Stage::Elementary
            }
        );

        gate.dismiss();
        assert!(matches!(gate, DialogueGate::Cooldown { .. }));

        // Never closes before the full delay has accumulated.
        gate.tick(RESUME_DELAY * 0.5);
        assert!(!gate.is_closed());
        gate.tick(RESUME_DELAY * 0.49);
        assert!(!gate.is_closed());

        gate.tick(RESUME_DELAY * 0.02);
        assert!(gate.is_closed());
    }

    #[test]
    fn dismiss_outside_open_is_a_noop() {
        let mut gate = DialogueGate::Closed;
        gate.dismiss();
        assert_eq!(gate, DialogueGate::Closed);

        let mut gate = DialogueGate::Cooldown { remaining: 0.1 };
        gate.dismiss();
        assert_eq!(gate, DialogueGate::Cooldown { remaining: 0.1 });
    }

    #[test]
    fn tick_outside_cooldown_is_a_noop() {
        let mut gate = DialogueGate::Closed;
        gate.tick(1.0);
        assert_eq!(gate, DialogueGate::Closed);

        let mut gate = DialogueGate::Open {
            stage: Stage::Work,
        };
        gate.tick(1.0);
        assert_eq!(
            gate,
            DialogueGate::Open {
                stage: Stage::Work
            }
        );
    }

    #[test]
    #[should_panic(expected = "dialogue gate opened while not closed")]
    fn opening_a_live_gate_is_a_defect() {
        let mut gate = DialogueGate::Closed;
        gate.open(Stage::Elementary);
        gate.open(Stage::JuniorHigh);
    }
}
