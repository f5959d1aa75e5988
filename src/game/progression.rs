// game/progression.rs

use super::levels::{
    FIRST_LEVEL, LAST_LEVEL, LevelDescriptor, LevelOutOfRange, TERMINAL_LEVEL, descriptor_for,
};
use bevy::prelude::Resource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points in one "lap"; goal scores are whole multiples of it
pub const LEVEL_SCORE_GOAL: u32 = 240;

/// Points awarded per collected star
pub const STAR_POINTS: u32 = 10;

/// Horizontal midpoint of the scene, used to keep new bombs away from the player
const SCENE_MID_X: f32 = 400.0;

/// Difficulty setting. `Relaxed` ignores bombs when computing the goal score;
/// the other settings currently share one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Hard,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDifficulty(pub u8);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown difficulty {} (expected 0-3)", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl TryFrom<u8> for Difficulty {
    type Error = UnknownDifficulty;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Difficulty::Relaxed),
            1 => Ok(Difficulty::Normal),
            2 => Ok(Difficulty::Hard),
            3 => Ok(Difficulty::Expert),
            other => Err(UnknownDifficulty(other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Relaxed => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }
}

/// Cumulative score needed to leave `level`.
///
/// Every bomb on screen is paid for with one extra lap: none on level 1, one
/// per level on 2-6, two on 7-9 and three on 10-12.
///
/// An older single-file build of the game used `level + 1` laps for 7-9 and
/// `level + 2` for 10-12. The constants below are the ones the modular build
/// shipped with; the two were never reconciled upstream.
pub fn goal_score(level: u32, difficulty: Difficulty) -> Result<u32, LevelOutOfRange> {
    if !(FIRST_LEVEL..=LAST_LEVEL).contains(&level) {
        return Err(LevelOutOfRange { level });
    }

    let bomb_laps = match difficulty {
        Difficulty::Relaxed => 0,
        Difficulty::Normal | Difficulty::Hard | Difficulty::Expert => match level {
            1..=6 => level - 1,
            7..=9 => level,
            _ => level + 1,
        },
    };

    Ok(LEVEL_SCORE_GOAL * level + LEVEL_SCORE_GOAL * bomb_laps)
}

/// Outcome of a progression check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvanceResult {
    /// The level was won; build this descriptor next
    Advanced(&'static LevelDescriptor),
    /// Goal not met, game over, or already on the end screen
    NotYet,
}

/// Outcome of a star pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarCollected {
    pub points: u32,
    /// The wave is empty: respawn it and add one bomb
    pub wave_cleared: bool,
}

impl StarCollected {
    const IGNORED: Self = Self {
        points: 0,
        wave_cleared: false,
    };
}

/// Where and how a new bomb enters the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdversarySpawn {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl AdversarySpawn {
    /// Bombs bounce off everything without losing speed
    pub const BOUNCE: f32 = 1.0;

    /// Pick a spawn on the half of the scene the player is not standing on
    pub fn plan(player_x: f32, rng: &mut impl Rng) -> Self {
        let x = if player_x < SCENE_MID_X {
            rng.random_range(400..=800_i32)
        } else {
            rng.random_range(0..=400_i32)
        };

        Self {
            x: x as f32,
            y: 16.0,
            velocity_x: rng.random_range(-200..=200_i32) as f32,
            velocity_y: 20.0,
        }
    }
}

/// Session-wide game state: score, current level, difficulty and the
/// game-over latch.
#[derive(Debug, Clone, Resource)]
pub struct SessionState {
    score: u32,
    level: u32,
    difficulty: Difficulty,
    game_over: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl SessionState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            score: 0,
            level: FIRST_LEVEL,
            difficulty,
            game_over: false,
        }
    }

    // === Query Methods ===

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Has the player been hit by a bomb?
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Is the end screen showing?
    pub fn is_finished(&self) -> bool {
        self.level == TERMINAL_LEVEL
    }

    /// Descriptor of the level currently being played
    pub fn descriptor(&self) -> Result<&'static LevelDescriptor, LevelOutOfRange> {
        descriptor_for(self.level)
    }

    /// Score needed to leave the current level, `None` on the end screen
    pub fn goal(&self) -> Option<u32> {
        goal_score(self.level, self.difficulty).ok()
    }

    // === Mutation Methods ===

    /// Move to the next level if the goal score has been reached
    pub fn try_advance(&mut self) -> AdvanceResult {
        if self.game_over {
            return AdvanceResult::NotYet;
        }
        let Some(goal) = self.goal() else {
            return AdvanceResult::NotYet;
        };
        if self.score < goal {
            return AdvanceResult::NotYet;
        }

        match self.descriptor().ok().and_then(LevelDescriptor::next) {
            Some(next) => {
                log::info!(
                    "Level {} complete with {} points (goal {}), moving to level {}",
                    self.level,
                    self.score,
                    goal,
                    next.level
                );
                self.level = next.level;
                AdvanceResult::Advanced(next)
            }
            None => AdvanceResult::NotYet,
        }
    }

    /// Award a star. `stars_remaining` is the number of stars still active in
    /// the wave after this one was taken.
    pub fn collect_star(&mut self, stars_remaining: usize) -> StarCollected {
        if self.game_over {
            return StarCollected::IGNORED;
        }

        self.score = self.score.saturating_add(STAR_POINTS);
        let wave_cleared = stars_remaining == 0;
        if wave_cleared {
            log::info!("Wave cleared on level {} at {} points", self.level, self.score);
        }

        StarCollected {
            points: STAR_POINTS,
            wave_cleared,
        }
    }

    /// Latch the game-over flag. Returns `true` only for the hit that ended the game.
    pub fn hit_adversary(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        log::info!("Game over on level {} with {} points", self.level, self.score);
        true
    }
}
