use bevy::prelude::*;

use super::animation::animate_player;
use super::host::{BevySceneHost, SceneAssets};
use super::hud::{HudText, spawn_hud, sync_hud};
use super::physics::{BombTouched, Body, PhysicsControl, StarTouched, detect_overlaps, step_physics};
use crate::camera::GameCamera;
use crate::config::GameSettings;
use crate::game::{AdvanceResult, SessionState, scene};
use crate::input::ControlsSet;

pub struct PlatformerPlugin;

impl Plugin for PlatformerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StarTouched>()
            .add_message::<BombTouched>()
            .init_resource::<SceneAssets>()
            .init_resource::<HudText>()
            .init_resource::<PhysicsControl>()
            // Session first so the opening level can read it
            .add_systems(Startup, (spawn_hud, init_session, build_first_level).chain())
            .add_systems(
                Update,
                (
                    step_physics,
                    detect_overlaps,
                    collect_touched_stars,
                    hit_bombs,
                    // Level progression (steer, then advance once the goal is met)
                    advance_level,
                    // Visual updates
                    animate_player,
                    sync_transforms,
                    sync_hud,
                )
                    .chain()
                    .after(ControlsSet),
            );
    }
}

fn init_session(mut commands: Commands, settings: Res<GameSettings>) {
    let session = SessionState::new(settings.difficulty);
    info!("Starting session on {:?} difficulty", session.difficulty());
    commands.insert_resource(session);
}

fn build_first_level(mut host: BevySceneHost, session: Res<SessionState>) {
    let descriptor = match session.descriptor() {
        Ok(descriptor) => descriptor,
        Err(e) => {
            error!("Cannot build the opening level: {}", e);
            return;
        }
    };

    scene::preload(&mut host, descriptor);
    scene::build(&mut host, descriptor, &session, &mut rand::rng());
}

fn collect_touched_stars(
    mut touches: MessageReader<StarTouched>,
    mut host: BevySceneHost,
    mut session: ResMut<SessionState>,
) {
    let mut rng = rand::rng();
    for touch in touches.read() {
        // Several touches of one star can arrive in the same frame
        let Some(remaining) = host.take_star(touch.star) else {
            continue;
        };
        let player_x = host.player_x();
        scene::on_star_collected(&mut host, &mut session, player_x, remaining, &mut rng);
        if remaining == 0 {
            // The wave was respawned; the rest of this frame's touches are stale
            break;
        }
    }
}

fn hit_bombs(
    mut touches: MessageReader<BombTouched>,
    mut host: BevySceneHost,
    mut session: ResMut<SessionState>,
) {
    if touches.read().count() == 0 {
        return;
    }
    scene::on_adversary_hit(&mut host, &mut session);
}

fn advance_level(mut host: BevySceneHost, mut session: ResMut<SessionState>) {
    let result = scene::tick(&mut host, &mut session, &mut rand::rng());
    if matches!(result, AdvanceResult::Advanced(_)) {
        match session.goal() {
            Some(goal) => info!("Now playing level {} (goal {})", session.level(), goal),
            None => info!("All levels cleared with {} points", session.score()),
        }
    }
}

/// Mirror simulated scene positions onto sprite transforms
fn sync_transforms(camera: Res<GameCamera>, mut bodies: Query<(&Body, &mut Transform), Changed<Body>>) {
    for (body, mut transform) in &mut bodies {
        let world = camera.to_world(body.position);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}
