//! Arcade physics in scene coordinates (800x600, y down).
//!
//! Dynamic bodies integrate gravity and velocity, then get pushed out of static
//! platforms along the axis of least penetration. Bounce is applied per axis.

use bevy::prelude::*;

use super::components::{Bomb, Player, Star};
use crate::config::GameSettings;

/// Size of the scene canvas
pub const WORLD_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Below this speed a bounce comes to rest instead of jittering
const RESTING_SPEED: f32 = 10.0;

/// Longest single integration step; longer frames are split so fast bodies
/// cannot pass through the ground between two steps
const MAX_STEP: f32 = 1.0 / 60.0;

/// Frames longer than this are treated as a stall and shortened
const MAX_FRAME: f32 = 0.25;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Body {
    /// Center of the body
    pub position: Vec2,
    pub half_size: Vec2,
    pub velocity: Vec2,
    pub bounce: Vec2,
    pub gravity: bool,
    pub collide_world_bounds: bool,
    /// Resting on (or pushed up by) a platform during the last step
    pub touching_down: bool,
    /// Disabled bodies are neither simulated nor overlap-tested
    pub enabled: bool,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            half_size: size * 0.5,
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            gravity: true,
            collide_world_bounds: false,
            touching_down: false,
            enabled: true,
        }
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        let delta = (self.position - other.position).abs();
        let reach = self.half_size + other.half_size;
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Immovable platform
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StaticBody {
    pub position: Vec2,
    pub half_size: Vec2,
}

/// Pauses the whole step when the game is over
#[derive(Resource, Debug, Default)]
pub struct PhysicsControl {
    pub paused: bool,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct StarTouched {
    pub star: Entity,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct BombTouched;

fn rebound(speed: f32, bounce: f32) -> f32 {
    let rebounded = -speed * bounce;
    if rebounded.abs() < RESTING_SPEED {
        0.0
    } else {
        rebounded
    }
}

/// Push `body` out of `platform`. Returns true when the body landed on top.
pub fn resolve_static(body: &mut Body, platform: &StaticBody) -> bool {
    let delta = body.position - platform.position;
    let reach = body.half_size + platform.half_size;
    let pen_x = reach.x - delta.x.abs();
    let pen_y = reach.y - delta.y.abs();

    if pen_x <= 0.0 || pen_y <= 0.0 {
        return false;
    }

    if pen_y < pen_x {
        if delta.y < 0.0 {
            // Above the platform (y grows downwards)
            body.position.y = platform.position.y - reach.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y);
            }
            true
        } else {
            body.position.y = platform.position.y + reach.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y);
            }
            false
        }
    } else {
        if delta.x < 0.0 {
            body.position.x = platform.position.x - reach.x;
        } else {
            body.position.x = platform.position.x + reach.x;
        }
        body.velocity.x = -body.velocity.x * body.bounce.x;
        false
    }
}

/// Clamp a body inside the canvas, reflecting its velocity off the edges
pub fn keep_in_bounds(body: &mut Body, world: Vec2) {
    let min = body.half_size;
    let max = world - body.half_size;

    if body.position.x < min.x {
        body.position.x = min.x;
        body.velocity.x = body.velocity.x.abs() * body.bounce.x;
    } else if body.position.x > max.x {
        body.position.x = max.x;
        body.velocity.x = -body.velocity.x.abs() * body.bounce.x;
    }

    if body.position.y < min.y {
        body.position.y = min.y;
        body.velocity.y = body.velocity.y.abs() * body.bounce.y;
    } else if body.position.y > max.y {
        body.position.y = max.y;
        body.velocity.y = rebound(body.velocity.y.abs(), body.bounce.y);
    }
}

/// Advance one body by `dt` seconds
pub fn step_body(body: &mut Body, platforms: &[&StaticBody], gravity: f32, dt: f32) {
    if body.gravity {
        body.velocity.y += gravity * dt;
    }
    body.position += body.velocity * dt;

    body.touching_down = false;
    for platform in platforms {
        if resolve_static(body, platform) {
            body.touching_down = true;
        }
    }

    if body.collide_world_bounds {
        keep_in_bounds(body, WORLD_SIZE);
    }
}

/// Advance one body by a whole frame, in steps no longer than [`MAX_STEP`]
pub fn advance_body(body: &mut Body, platforms: &[&StaticBody], gravity: f32, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME);
    let steps = (dt / MAX_STEP).ceil().max(1.0);
    let step = dt / steps;

    for _ in 0..steps as u32 {
        step_body(body, platforms, gravity, step);
    }
}

pub fn step_physics(
    time: Res<Time>,
    control: Res<PhysicsControl>,
    settings: Res<GameSettings>,
    mut bodies: Query<&mut Body>,
    platforms: Query<&StaticBody>,
) {
    if control.paused {
        return;
    }

    let dt = time.delta_secs();
    let platforms: Vec<&StaticBody> = platforms.iter().collect();

    for mut body in &mut bodies {
        if body.enabled {
            advance_body(&mut body, &platforms, settings.gravity, dt);
        }
    }
}

/// Emit overlap messages for the player against stars and bombs
pub fn detect_overlaps(
    control: Res<PhysicsControl>,
    player: Query<&Body, With<Player>>,
    stars: Query<(Entity, &Body), (With<Star>, Without<Player>)>,
    bombs: Query<&Body, (With<Bomb>, Without<Player>)>,
    mut star_touches: MessageWriter<StarTouched>,
    mut bomb_touches: MessageWriter<BombTouched>,
) {
    if control.paused {
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };

    for (star, body) in &stars {
        if body.enabled && player.overlaps(body) {
            star_touches.write(StarTouched { star });
        }
    }

    if bombs.iter().any(|bomb| bomb.enabled && player.overlaps(bomb)) {
        bomb_touches.write(BombTouched);
    }
}
