// Trigger zones in front of each building and the overlap dispatcher.

use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::dialogue::DialogueGate;
use crate::player::{PLAYER_HALF, Player};
use crate::stages::{Progress, Screen, Stage, Visit};

pub struct TriggerPlugin;

impl Plugin for TriggerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StageEntered>()
            .add_message::<StageCleared>()
            .add_systems(OnEnter(Screen::Town), spawn_zones)
            .add_systems(
                Update,
                (detect_overlap, dispatch)
                    .chain()
                    .run_if(in_state(Screen::Town)),
            );
    }
}

/// Level-triggered: written every frame the player intersects a zone.
#[derive(Message)]
pub struct StageEntered(pub Stage);

/// Edge-triggered: written exactly once, on a stage's first visit.
#[derive(Message)]
pub struct StageCleared(pub Stage);

#[derive(Component)]
pub struct TriggerZone {
    pub stage: Stage,
    pub half: Vec2,
}

const ZONE_HALF: Vec2 = Vec2::new(50.0, 25.0);

// Zones render as translucent quads in debug builds to make placement
// visible; invisible in release.
#[cfg(debug_assertions)]
const ZONE_TINT: Color = Color::srgba(1.0, 1.0, 0.0, 0.3);
#[cfg(not(debug_assertions))]
const ZONE_TINT: Color = Color::NONE;

/// Zone centers sit on the path at the entrance of each building.
fn zone_center(stage: Stage) -> Vec2 {
    match stage {
        Stage::Elementary => Vec2::new(0.0, -720.0),
        Stage::JuniorHigh => Vec2::new(0.0, -320.0),
        Stage::SeniorHigh => Vec2::new(0.0, 80.0),
        Stage::College => Vec2::new(0.0, 450.0),
        Stage::Work => Vec2::new(0.0, 780.0),
    }
}

fn spawn_zones(mut commands: Commands) {
    for stage in Stage::iter() {
        commands.spawn((
            TriggerZone {
                stage,
                half: ZONE_HALF,
            },
            Sprite::from_color(ZONE_TINT, ZONE_HALF * 2.0),
            Transform::from_translation(zone_center(stage).extend(0.5)),
            DespawnOnExit(Screen::Town),
        ));
    }
}

fn detect_overlap(
    player: Query<&Transform, With<Player>>,
    zones: Query<(&TriggerZone, &Transform)>,
    mut entered: MessageWriter<StageEntered>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let player_box = Aabb2d::new(player_transform.translation.truncate(), PLAYER_HALF);

    for (zone, transform) in &zones {
        let zone_box = Aabb2d::new(transform.translation.truncate(), zone.half);
        if player_box.intersects(&zone_box) {
            entered.write(StageEntered(zone.stage));
        }
    }
}

/// Open the dialogue and record the visit for each entered stage. The gate
/// check is the sole de-duplication for level-triggered overlaps, so zones
/// stay re-enterable once the dialogue is dismissed and the cooldown ends.
pub(crate) fn dispatch(
    mut entered: MessageReader<StageEntered>,
    mut gate: ResMut<DialogueGate>,
    mut progress: ResMut<Progress>,
    mut cleared: MessageWriter<StageCleared>,
) {
    for &StageEntered(stage) in entered.read() {
        if !gate.is_closed() {
            continue;
        }
        gate.open(stage);
        if progress.record(stage) == Visit::First {
            info!("stage cleared: {stage:?}");
            cleared.write(StageCleared(stage));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch_app() -> App {
        let mut app = App::new();
        app.add_message::<StageEntered>();
        app.add_message::<StageCleared>();
        app.init_resource::<Progress>();
        app.init_resource::<DialogueGate>();
        app.add_systems(Update, dispatch);
        app
    }

    fn enter(app: &mut App, stage: Stage) {
        app.world_mut()
            .resource_mut::<Messages<StageEntered>>()
            .write(StageEntered(stage));
        app.update();
    }

    fn drain_cleared(app: &mut App) -> Vec<Stage> {
        app.world_mut()
            .resource_mut::<Messages<StageCleared>>()
            .drain()
            .map(|StageCleared(stage)| stage)
            .collect()
    }

    fn gate(app: &App) -> DialogueGate {
        *app.world().resource::<DialogueGate>()
    }

    #[test]
    fn first_visit_opens_dialogue_and_clears_stage() {
        let mut app = dispatch_app();
        enter(&mut app, Stage::Elementary);

        assert_eq!(
            gate(&app),
            DialogueGate::Open {
                stage: Stage::Elementary
            }
        );
        assert!(app.world().resource::<Progress>().visited(Stage::Elementary));
        assert_eq!(drain_cleared(&mut app), vec![Stage::Elementary]);
    }

    #[test]
    fn overlap_while_open_is_fully_ignored() {
        let mut app = dispatch_app();
        enter(&mut app, Stage::Elementary);
        drain_cleared(&mut app);

        // Same zone re-firing every frame, and a second overlapping zone.
        enter(&mut app, Stage::Elementary);
        enter(&mut app, Stage::JuniorHigh);

        assert_eq!(
            gate(&app),
            DialogueGate::Open {
                stage: Stage::Elementary
            }
        );
        assert!(!app.world().resource::<Progress>().visited(Stage::JuniorHigh));
        assert_eq!(drain_cleared(&mut app), vec![]);
    }

    #[test]
    fn overlap_during_cooldown_is_fully_ignored() {
        let mut app = dispatch_app();
        enter(&mut app, Stage::Elementary);
        drain_cleared(&mut app);
        app.world_mut().resource_mut::<DialogueGate>().dismiss();

        enter(&mut app, Stage::Elementary);

        assert!(matches!(gate(&app), DialogueGate::Cooldown { .. }));
        assert_eq!(drain_cleared(&mut app), vec![]);
    }

    #[test]
    fn reentry_after_cooldown_reopens_without_second_clear() {
        let mut app = dispatch_app();
        enter(&mut app, Stage::Elementary);
        drain_cleared(&mut app);

        {
            let mut gate = app.world_mut().resource_mut::<DialogueGate>();
            gate.dismiss();
            gate.tick(0.25);
        }
        assert!(gate(&app).is_closed());

        enter(&mut app, Stage::Elementary);

        assert_eq!(
            gate(&app),
            DialogueGate::Open {
                stage: Stage::Elementary
            }
        );
        assert_eq!(drain_cleared(&mut app), vec![]);
    }

    #[test]
    fn later_zone_dispatches_before_its_predecessor_is_visited() {
        // Ordering is enforced by physical barriers, not by the tracker.
        let mut app = dispatch_app();
        enter(&mut app, Stage::JuniorHigh);

        assert_eq!(
            gate(&app),
            DialogueGate::Open {
                stage: Stage::JuniorHigh
            }
        );
        assert_eq!(drain_cleared(&mut app), vec![Stage::JuniorHigh]);
        assert!(!app.world().resource::<Progress>().visited(Stage::Elementary));
    }
}
