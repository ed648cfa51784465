// Static town map: ground, path, buildings, and scattered foliage.

use bevy::prelude::*;
use fast_poisson::Poisson2D;
use rand::Rng;
use strum::IntoEnumIterator;

use crate::stages::{Screen, Stage};

pub struct TownPlugin;

impl Plugin for TownPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKDROP))
            .add_systems(OnEnter(Screen::Town), (spawn_map, spawn_foliage));
    }
}

/// Half extent of the square world.
pub const WORLD_HALF: Vec2 = Vec2::splat(1000.0);

const BACKDROP: Color = Color::srgb(0.118, 0.161, 0.231);
const GROUND: Color = Color::srgb(0.059, 0.090, 0.165);
const PATH: Color = Color::srgb(0.200, 0.255, 0.333);
const PATH_WIDTH: f32 = 200.0;

/// Minimum spacing between foliage quads.
const FOLIAGE_RADIUS: f32 = 120.0;
/// Keep foliage off the path, the buildings, and their fronts.
const FOLIAGE_CLEARANCE: f32 = 220.0;

/// Axis-aligned solid obstacle; half extents.
#[derive(Component)]
pub struct Collider(pub Vec2);

/// Buildings line the path from the start of the story at the south end to
/// the most recent at the north.
fn building_center(stage: Stage) -> Vec2 {
    match stage {
        Stage::Elementary => Vec2::new(0.0, -600.0),
        Stage::JuniorHigh => Vec2::new(0.0, -200.0),
        Stage::SeniorHigh => Vec2::new(0.0, 200.0),
        Stage::College => Vec2::new(0.0, 600.0),
        Stage::Work => Vec2::new(0.0, 900.0),
    }
}

fn building_size(stage: Stage) -> Vec2 {
    match stage {
        Stage::Elementary | Stage::JuniorHigh | Stage::SeniorHigh => Vec2::new(300.0, 200.0),
        Stage::College => Vec2::new(350.0, 250.0),
        Stage::Work => Vec2::new(400.0, 200.0),
    }
}

fn building_color(stage: Stage) -> Color {
    match stage {
        Stage::Elementary => Color::srgb(0.937, 0.267, 0.267),
        Stage::JuniorHigh => Color::srgb(0.976, 0.451, 0.086),
        Stage::SeniorHigh => Color::srgb(0.918, 0.702, 0.031),
        Stage::College => Color::srgb(0.133, 0.773, 0.369),
        Stage::Work => Color::srgb(0.231, 0.510, 0.965),
    }
}

fn spawn_map(mut commands: Commands) {
    commands.spawn((
        Sprite::from_color(GROUND, WORLD_HALF * 2.0),
        Transform::from_xyz(0.0, 0.0, -1.0),
        DespawnOnExit(Screen::Town),
    ));
    commands.spawn((
        Sprite::from_color(PATH, Vec2::new(PATH_WIDTH, WORLD_HALF.y * 2.0)),
        Transform::from_xyz(0.0, 0.0, 0.0),
        DespawnOnExit(Screen::Town),
    ));

    for stage in Stage::iter() {
        let size = building_size(stage);
        commands.spawn((
            Collider(size / 2.0),
            Sprite::from_color(building_color(stage), size),
            Transform::from_translation(building_center(stage).extend(1.0)),
            DespawnOnExit(Screen::Town),
        ));
    }
}

/// Scatter non-colliding foliage quads over the grass with blue noise, so
/// the empty map reads as a place rather than a void.
fn spawn_foliage(mut commands: Commands) {
    let points: Vec<[f32; 2]> = Poisson2D::new()
        .with_dimensions([WORLD_HALF.x * 2.0, WORLD_HALF.y * 2.0], FOLIAGE_RADIUS)
        .with_seed(42)
        .generate();

    let mut rng = rand::rng();
    for [x, y] in points {
        let pos = Vec2::new(x - WORLD_HALF.x, y - WORLD_HALF.y);
        if pos.x.abs() < FOLIAGE_CLEARANCE {
            continue;
        }

        let size = rng.random_range(14.0..30.0);
        let green = rng.random_range(0.35..0.55);
        commands.spawn((
            Sprite::from_color(Color::srgb(0.10, green, 0.22), Vec2::splat(size)),
            Transform::from_translation(pos.extend(0.25)),
            DespawnOnExit(Screen::Town),
        ));
    }
}
