// Player avatar: keyboard movement, collision, and camera follow.

use bevy::math::bounding::{Aabb2d, IntersectsVolume};
use bevy::prelude::*;

use crate::dialogue::gate_closed;
use crate::stages::Screen;
use crate::town::{Collider, WORLD_HALF};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(Screen::Town), spawn_player)
            .add_systems(
                Update,
                (player_movement.run_if(gate_closed), camera_follow)
                    .chain()
                    .run_if(in_state(Screen::Town)),
            );
    }
}

const MOVE_SPEED: f32 = 200.0;
pub const PLAYER_HALF: Vec2 = Vec2::splat(16.0);
const START_POS: Vec2 = Vec2::new(0.0, -900.0);
/// Magnification of the 2D view.
const CAMERA_ZOOM: f32 = 1.5;
/// Exponential smoothing rate for the camera follow.
const FOLLOW_RATE: f32 = 6.0;

#[derive(Component)]
pub struct Player;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: CAMERA_ZOOM.recip(),
            ..OrthographicProjection::default_2d()
        }),
    ));
}

fn spawn_player(mut commands: Commands, mut camera: Query<&mut Transform, With<Camera2d>>) {
    commands.spawn((
        Player,
        Sprite::from_color(Color::WHITE, PLAYER_HALF * 2.0),
        Transform::from_translation(START_POS.extend(2.0)),
        DespawnOnExit(Screen::Town),
    ));

    // Snap the camera to the start position so the follow doesn't pan in.
    if let Ok(mut transform) = camera.single_mut() {
        transform.translation.x = START_POS.x;
        transform.translation.y = START_POS.y;
    }
}

fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player: Query<&mut Transform, With<Player>>,
    colliders: Query<(&Transform, &Collider), Without<Player>>,
    time: Res<Time>,
) {
    let Ok(mut transform) = player.single_mut() else {
        return;
    };

    let mut dir = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA) {
        dir.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD) {
        dir.x += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::KeyW) {
        dir.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) || keyboard.pressed(KeyCode::KeyS) {
        dir.y -= 1.0;
    }

    // Normalize so diagonals aren't faster.
    let delta = dir.normalize_or_zero() * MOVE_SPEED * time.delta_secs();
    if delta == Vec2::ZERO {
        return;
    }

    // Resolve each axis separately so the player slides along walls.
    let mut pos = transform.translation.truncate();
    let stepped = Vec2::new(pos.x + delta.x, pos.y);
    if !hits_collider(stepped, &colliders) {
        pos = stepped;
    }
    let stepped = Vec2::new(pos.x, pos.y + delta.y);
    if !hits_collider(stepped, &colliders) {
        pos = stepped;
    }

    let limit = WORLD_HALF - PLAYER_HALF;
    pos = pos.clamp(-limit, limit);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
}

fn hits_collider(
    center: Vec2,
    colliders: &Query<(&Transform, &Collider), Without<Player>>,
) -> bool {
    let player_box = Aabb2d::new(center, PLAYER_HALF);
    colliders.iter().any(|(transform, collider)| {
        Aabb2d::new(transform.translation.truncate(), collider.0).intersects(&player_box)
    })
}

fn camera_follow(
    player: Query<&Transform, With<Player>>,
    mut camera: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera.single_mut() else {
        return;
    };

    let target = player_transform.translation.truncate();
    let current = camera_transform.translation.truncate();
    // Frame-rate independent exponential approach.
    let alpha = 1.0 - (-FOLLOW_RATE * time.delta_secs()).exp();
    let next = current.lerp(target, alpha);
    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}
