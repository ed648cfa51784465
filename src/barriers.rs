// Physical barriers gating the path between consecutive stages.

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::stages::{Screen, Stage};
use crate::town::Collider;
use crate::triggers::StageCleared;

pub struct BarrierPlugin;

impl Plugin for BarrierPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Town), spawn_barriers)
            .add_systems(Update, remove_cleared.run_if(in_state(Screen::Town)));
    }
}

const BARRIER_SIZE: Vec2 = Vec2::new(220.0, 20.0);
const BARRIER_TINT: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);

/// Blocks entry to `blocks` until its predecessor stage is cleared.
#[derive(Component)]
pub struct Barrier {
    pub blocks: Stage,
}

/// Barriers span the path just south of the stage they guard. The first
/// stage is freely reachable and the road past college was never gated.
fn barrier_center(stage: Stage) -> Option<Vec2> {
    match stage {
        Stage::JuniorHigh => Some(Vec2::new(0.0, -400.0)),
        Stage::SeniorHigh => Some(Vec2::new(0.0, 0.0)),
        Stage::College => Some(Vec2::new(0.0, 400.0)),
        Stage::Elementary | Stage::Work => None,
    }
}

fn spawn_barriers(mut commands: Commands) {
    for stage in Stage::iter() {
        let Some(center) = barrier_center(stage) else {
            continue;
        };
        commands.spawn((
            Barrier { blocks: stage },
            Collider(BARRIER_SIZE / 2.0),
            Sprite::from_color(BARRIER_TINT, BARRIER_SIZE),
            Transform::from_translation(center.extend(1.0)),
            DespawnOnExit(Screen::Town),
        ));
    }
}

/// Despawn the barrier guarding the successor of a cleared stage. Matching
/// nothing (no successor, no barrier for it, already removed) is a no-op.
fn remove_cleared(
    mut commands: Commands,
    mut cleared: MessageReader<StageCleared>,
    barriers: Query<(Entity, &Barrier)>,
) {
    for &StageCleared(stage) in cleared.read() {
        let Some(next) = stage.next() else {
            continue;
        };
        for (entity, barrier) in &barriers {
            if barrier.blocks == next {
                info!("barrier removed: {next:?}");
                commands.entity(entity).despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barrier_app() -> App {
        let mut app = App::new();
        app.add_message::<StageCleared>();
        app.add_systems(Update, remove_cleared);
        for stage in [Stage::JuniorHigh, Stage::SeniorHigh, Stage::College] {
            app.world_mut().spawn(Barrier { blocks: stage });
        }
        app
    }

    fn clear(app: &mut App, stage: Stage) {
        app.world_mut()
            .resource_mut::<Messages<StageCleared>>()
            .write(StageCleared(stage));
        app.update();
    }

    fn standing(app: &mut App) -> Vec<Stage> {
        let mut query = app.world_mut().query::<&Barrier>();
        let mut stages: Vec<Stage> = query
            .iter(app.world())
            .map(|barrier| barrier.blocks)
            .collect();
        stages.sort();
        stages
    }

    #[test]
    fn clearing_a_stage_removes_only_its_successor_barrier() {
        let mut app = barrier_app();
        clear(&mut app, Stage::Elementary);
        assert_eq!(standing(&mut app), vec![Stage::SeniorHigh, Stage::College]);
    }

    #[test]
    fn repeated_clear_events_remove_nothing_further() {
        let mut app = barrier_app();
        clear(&mut app, Stage::Elementary);
        clear(&mut app, Stage::Elementary);
        assert_eq!(standing(&mut app), vec![Stage::SeniorHigh, Stage::College]);
    }

    #[test]
    fn out_of_order_clear_removes_only_its_own_successor() {
        let mut app = barrier_app();
        clear(&mut app, Stage::SeniorHigh);
        assert_eq!(standing(&mut app), vec![Stage::JuniorHigh, Stage::SeniorHigh]);
    }

    #[test]
    fn fresh_start_entering_first_zone_unbars_the_second() {
        use crate::dialogue::DialogueGate;
        use crate::stages::Progress;
        use crate::triggers::{StageEntered, dispatch};

        // Full pipeline: overlap message -> dispatch -> barrier removal.
        let mut app = barrier_app();
        app.add_message::<StageEntered>();
        app.init_resource::<Progress>();
        app.init_resource::<DialogueGate>();
        app.add_systems(Update, dispatch.before(remove_cleared));

        app.world_mut()
            .resource_mut::<Messages<StageEntered>>()
            .write(StageEntered(Stage::Elementary));
        app.update();

        assert_eq!(standing(&mut app), vec![Stage::SeniorHigh, Stage::College]);
        assert_eq!(
            *app.world().resource::<DialogueGate>(),
            DialogueGate::Open {
                stage: Stage::Elementary
            }
        );
    }

    #[test]
    fn stages_without_a_successor_barrier_are_noops() {
        let mut app = barrier_app();
        // College's successor (work) was never gated; work has no successor.
        clear(&mut app, Stage::College);
        clear(&mut app, Stage::Work);
        assert_eq!(
            standing(&mut app),
            vec![Stage::JuniorHigh, Stage::SeniorHigh, Stage::College]
        );
    }
}
