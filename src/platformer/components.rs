use bevy::prelude::*;

/// Marker for everything torn down on a level change
#[derive(Component)]
pub struct LevelEntity;

#[derive(Component)]
pub struct Player;

/// A collectible star; remembers the column it respawns in
#[derive(Component)]
pub struct Star {
    pub column_x: f32,
}

#[derive(Component)]
pub struct Bomb;

/// Looping theme of the current level
#[derive(Component)]
pub struct LevelMusic;
