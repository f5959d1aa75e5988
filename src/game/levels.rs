// game/levels.rs

use super::assets::{images, themes};
use std::fmt;

/// First playable level
pub const FIRST_LEVEL: u32 = 1;

/// Last playable level
pub const LAST_LEVEL: u32 = 12;

/// The end screen occupies the slot after the last playable level
pub const TERMINAL_LEVEL: u32 = LAST_LEVEL + 1;

/// Requested a level outside the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutOfRange {
    pub level: u32,
}

impl fmt::Display for LevelOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} is outside {}..={}",
            self.level, FIRST_LEVEL, TERMINAL_LEVEL
        )
    }
}

impl std::error::Error for LevelOutOfRange {}

/// A static ground tile, in scene coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Platform {
    const fn at(x: f32, y: f32) -> Self {
        Self { x, y, scale: 1.0 }
    }

    const fn scaled(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }
}

/// Everything a scene host needs to build one level
#[derive(Debug, PartialEq)]
pub struct LevelDescriptor {
    pub level: u32,
    pub background: &'static str,
    pub ground: &'static str,
    pub theme: &'static str,
    pub platforms: &'static [Platform],
}

impl LevelDescriptor {
    /// The end screen has no stars, no platforms and no successor
    pub fn is_terminal(&self) -> bool {
        self.level == TERMINAL_LEVEL
    }

    /// The descriptor that follows this one, `None` for the end screen
    pub fn next(&self) -> Option<&'static LevelDescriptor> {
        if self.is_terminal() {
            return None;
        }
        descriptor_for(self.level + 1).ok()
    }
}

// Used by levels 1, 4, 7 and 10
const CORRIDOR: &[Platform] = &[
    Platform::scaled(400.0, 610.0, 2.0),
    Platform::at(600.0, 420.0),
    Platform::at(50.0, 270.0),
    Platform::at(750.0, 240.0),
];

// Used by levels 2, 5, 8 and 11
const STAIRCASE: &[Platform] = &[
    Platform::scaled(400.0, 610.0, 2.0),
    Platform::scaled(100.0, 180.0, 0.5),
    Platform::scaled(400.0, 300.0, 0.5),
    Platform::at(200.0, 420.0),
    Platform::at(650.0, 150.0),
];

// Used by levels 3, 6, 9 and 12: the staircase with an extra left ledge
const STAIRCASE_LEDGE: &[Platform] = &[
    Platform::scaled(400.0, 610.0, 2.0),
    Platform::scaled(100.0, 180.0, 0.5),
    Platform::scaled(400.0, 300.0, 0.5),
    Platform::at(200.0, 420.0),
    Platform::at(50.0, 300.0),
    Platform::at(650.0, 150.0),
];

const fn entry(
    level: u32,
    background: &'static str,
    ground: &'static str,
    theme: &'static str,
    platforms: &'static [Platform],
) -> LevelDescriptor {
    LevelDescriptor {
        level,
        background,
        ground,
        theme,
        platforms,
    }
}

static LEVELS: [LevelDescriptor; TERMINAL_LEVEL as usize] = [
    entry(1, images::LEVEL1, images::PLATFORM1, themes::SMELLS, CORRIDOR),
    entry(2, images::LEVEL2, images::PLATFORM, themes::IN_BLOOM, STAIRCASE),
    entry(3, images::LEVEL3, images::PLATFORM, themes::COME, STAIRCASE_LEDGE),
    entry(4, images::LEVEL4, images::PLATFORM1, themes::BREED, CORRIDOR),
    entry(5, images::LEVEL5, images::PLATFORM, themes::LITHIUM, STAIRCASE),
    entry(6, images::LEVEL6, images::PLATFORM1, themes::POLLY, STAIRCASE_LEDGE),
    entry(7, images::LEVEL7, images::PLATFORM2, themes::TERRITORIAL, CORRIDOR),
    entry(8, images::LEVEL8, images::PLATFORM1, themes::DRAIN_YOU, STAIRCASE),
    entry(9, images::LEVEL9, images::PLATFORM1, themes::LOUNGE, STAIRCASE_LEDGE),
    entry(10, images::LEVEL10, images::PLATFORM, themes::STAY_AWAY, CORRIDOR),
    entry(11, images::LEVEL11, images::PLATFORM, themes::ON_A_PLAIN, STAIRCASE),
    entry(12, images::LEVEL12, images::PLATFORM1, themes::SOMETHING, STAIRCASE_LEDGE),
    entry(TERMINAL_LEVEL, images::ENDGAME, images::PLATFORM, themes::SMELLS, &[]),
];

/// Look up the descriptor for a level (1-12, or 13 for the end screen)
pub fn descriptor_for(level: u32) -> Result<&'static LevelDescriptor, LevelOutOfRange> {
    if !(FIRST_LEVEL..=TERMINAL_LEVEL).contains(&level) {
        return Err(LevelOutOfRange { level });
    }
    Ok(&LEVELS[(level - FIRST_LEVEL) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(level: u32) -> Vec<(f32, f32, f32)> {
        descriptor_for(level)
            .unwrap()
            .platforms
            .iter()
            .map(|p| (p.x, p.y, p.scale))
            .collect()
    }

    #[test]
    fn test_table_has_twelve_levels_and_end_screen() {
        assert_eq!(LEVELS.len(), 13);
        for (i, descriptor) in LEVELS.iter().enumerate() {
            assert_eq!(descriptor.level, i as u32 + 1);
        }
        assert!(LEVELS[12].is_terminal());
        assert!(LEVELS[..12].iter().all(|d| !d.is_terminal()));
    }

    #[test]
    fn test_out_of_range_levels() {
        assert_eq!(descriptor_for(0), Err(LevelOutOfRange { level: 0 }));
        assert_eq!(descriptor_for(14), Err(LevelOutOfRange { level: 14 }));
        assert!(descriptor_for(13).is_ok());
        assert_eq!(
            LevelOutOfRange { level: 14 }.to_string(),
            "Level 14 is outside 1..=13"
        );
    }

    #[test]
    fn test_corridor_levels() {
        for level in [1, 4, 7, 10] {
            assert_eq!(
                positions(level),
                vec![
                    (400.0, 610.0, 2.0),
                    (600.0, 420.0, 1.0),
                    (50.0, 270.0, 1.0),
                    (750.0, 240.0, 1.0),
                ],
                "level {level}"
            );
        }
    }

    #[test]
    fn test_staircase_levels() {
        for level in [2, 5, 8, 11] {
            assert_eq!(
                positions(level),
                vec![
                    (400.0, 610.0, 2.0),
                    (100.0, 180.0, 0.5),
                    (400.0, 300.0, 0.5),
                    (200.0, 420.0, 1.0),
                    (650.0, 150.0, 1.0),
                ],
                "level {level}"
            );
        }
    }

    #[test]
    fn test_staircase_ledge_levels() {
        for level in [3, 6, 9, 12] {
            let layout = positions(level);
            assert_eq!(layout.len(), 6, "level {level}");
            assert!(layout.contains(&(50.0, 300.0, 1.0)));

            // Everything else is the plain staircase
            let without_ledge: Vec<_> = layout
                .into_iter()
                .filter(|p| *p != (50.0, 300.0, 1.0))
                .collect();
            assert_eq!(without_ledge, positions(2));
        }
    }

    #[test]
    fn test_end_screen_has_no_platforms() {
        let end = descriptor_for(TERMINAL_LEVEL).unwrap();
        assert!(end.platforms.is_empty());
        assert_eq!(end.background, images::ENDGAME);
        assert_eq!(end.theme, themes::SMELLS);
    }

    #[test]
    fn test_chain_is_linear() {
        let mut current = descriptor_for(FIRST_LEVEL).unwrap();
        let mut visited = vec![current.level];

        while let Some(next) = current.next() {
            assert_eq!(next.level, current.level + 1);
            visited.push(next.level);
            current = next;
        }

        assert_eq!(visited, (1..=13).collect::<Vec<_>>());
        assert!(current.is_terminal());
    }

    #[test]
    fn test_every_level_has_its_own_background() {
        let mut backgrounds: Vec<_> = LEVELS.iter().map(|d| d.background).collect();
        backgrounds.sort_unstable();
        backgrounds.dedup();
        assert_eq!(backgrounds.len(), LEVELS.len());
    }
}
