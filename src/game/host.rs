// game/host.rs

//! The capability set the level lifecycle needs from a game engine.
//!
//! All positions are scene coordinates: an 800x600 canvas with the origin in
//! the top-left corner and y growing downwards.

use super::assets::AssetKey;
use super::levels::Platform;
use super::progression::AdversarySpawn;
use bevy::prelude::Resource;

/// Directional and jump keys, sampled once per frame
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Player animation clips from the `dude` spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAnimation {
    Left,
    #[default]
    Turn,
    Right,
}

impl PlayerAnimation {
    /// Inclusive frame range within the spritesheet
    pub fn frames(self) -> (usize, usize) {
        match self {
            PlayerAnimation::Left => (0, 3),
            PlayerAnimation::Turn => (4, 4),
            PlayerAnimation::Right => (5, 8),
        }
    }

    pub fn frame_rate(self) -> f32 {
        match self {
            PlayerAnimation::Turn => 20.0,
            PlayerAnimation::Left | PlayerAnimation::Right => 10.0,
        }
    }

    pub fn looped(self) -> bool {
        !matches!(self, PlayerAnimation::Turn)
    }
}

/// What the player should do this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    pub velocity_x: f32,
    /// Vertical launch speed (negative is up), only set on the frame of a jump
    pub jump_velocity: Option<f32>,
    pub animation: PlayerAnimation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSpawn {
    pub x: f32,
    pub y: f32,
    pub bounce: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpawn {
    pub x: f32,
    pub y: f32,
    pub bounce_y: f32,
}

/// On-screen text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Score,
    Level,
    /// Large centered message ("Game Over!")
    Banner,
}

impl TextSlot {
    /// Top-left corner of the text
    pub fn position(self) -> (f32, f32) {
        match self {
            TextSlot::Score => (16.0, 16.0),
            TextSlot::Level => (620.0, 16.0),
            TextSlot::Banner => (220.0, 280.0),
        }
    }

    pub fn font_size(self) -> f32 {
        match self {
            TextSlot::Score | TextSlot::Level => 32.0,
            TextSlot::Banner => 64.0,
        }
    }
}

/// Engine services consumed by the level lifecycle.
///
/// Implementations own every entity they create; `clear_level` must remove
/// platforms, stars, bombs, the player and the background. Level music is
/// replaced by the next `play_music` call.
pub trait SceneHost {
    // === Assets ===

    fn load_image(&mut self, key: AssetKey, path: &'static str);

    /// Register a horizontal strip of equally sized frames
    fn load_spritesheet(
        &mut self,
        key: AssetKey,
        path: &'static str,
        frame_size: (u32, u32),
        frames: u32,
    );

    fn load_audio(&mut self, key: AssetKey, path: &'static str);

    // === Scene contents ===

    fn clear_level(&mut self);

    fn add_background(&mut self, key: AssetKey, x: f32, y: f32);

    /// Static body that the player, stars and bombs collide with
    fn add_platform(&mut self, key: AssetKey, platform: Platform);

    fn spawn_player(&mut self, spawn: PlayerSpawn);

    fn spawn_stars(&mut self, stars: &[StarSpawn]);

    /// Re-enable every collected star at its original column, back at the top
    fn respawn_stars(&mut self);

    fn spawn_adversary(&mut self, spawn: AdversarySpawn);

    // === Player ===

    fn controls(&self) -> Controls;

    fn player_on_ground(&self) -> bool;

    fn drive_player(&mut self, motion: PlayerMotion);

    // === Presentation ===

    /// Show, replace or (with `None`) hide a line of text
    fn set_text(&mut self, slot: TextSlot, text: Option<String>);

    /// Start a looping track, replacing whatever was playing
    fn play_music(&mut self, key: AssetKey, volume: f32);

    fn stop_music(&mut self);

    /// Fire-and-forget sound
    fn play_effect(&mut self, key: AssetKey);

    /// Stop the physics step and show the player as hit
    fn freeze(&mut self);
}
