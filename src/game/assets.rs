// game/assets.rs

//! Asset identifiers. Paths are relative to the Bevy asset root.

/// Logical names the scene lifecycle registers assets under.
///
/// `Background`, `Ground` and `Theme` are rebound on every level; the rest are
/// shared by all scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Star,
    Bomb,
    Dude,
    CollectPrize,
    Background,
    Ground,
    Theme,
}

impl AssetKey {
    pub fn name(self) -> &'static str {
        match self {
            AssetKey::Star => "star",
            AssetKey::Bomb => "bomb",
            AssetKey::Dude => "dude",
            AssetKey::CollectPrize => "collectPrize",
            AssetKey::Background => "background",
            AssetKey::Ground => "ground",
            AssetKey::Theme => "theme",
        }
    }
}

/// Frame size of the player spritesheet
pub const DUDE_FRAME_SIZE: (u32, u32) = (32, 48);

/// Number of frames laid out horizontally in the player spritesheet
pub const DUDE_FRAME_COUNT: u32 = 9;

pub mod images {
    pub const BOMB: &str = "img/bomb.png";
    pub const DUDE: &str = "img/dude.png";
    pub const ENDGAME: &str = "img/endGame.jpg";
    pub const LEVEL1: &str = "img/level1.jpg";
    pub const LEVEL2: &str = "img/level2.jpg";
    pub const LEVEL3: &str = "img/level3.jpg";
    pub const LEVEL4: &str = "img/level4.jpg";
    pub const LEVEL5: &str = "img/level5.jpg";
    pub const LEVEL6: &str = "img/level6.jpg";
    pub const LEVEL7: &str = "img/level7.jpg";
    pub const LEVEL8: &str = "img/level8.jpg";
    pub const LEVEL9: &str = "img/level9.jpg";
    pub const LEVEL10: &str = "img/level10.jpg";
    pub const LEVEL11: &str = "img/level11.jpg";
    pub const LEVEL12: &str = "img/level12.jpg";
    pub const PLATFORM: &str = "img/platform.png";
    pub const PLATFORM1: &str = "img/platform1.png";
    pub const PLATFORM2: &str = "img/platform2.png";
    pub const STAR: &str = "img/star.png";
}

pub mod audio {
    pub const KEY: &str = "audio/key.wav";
}

pub mod themes {
    pub const SMELLS: &str = "audio/themes/[Nirvana]01)Smells_like_teen_spirit.mp3";
    pub const IN_BLOOM: &str = "audio/themes/[Nirvana]02)In_bloom.mp3";
    pub const COME: &str = "audio/themes/[Nirvana]03)Come_as_you_are.mp3";
    pub const BREED: &str = "audio/themes/[Nirvana]04)Breed.mp3";
    pub const LITHIUM: &str = "audio/themes/[Nirvana]05)Lithium.mp3";
    pub const POLLY: &str = "audio/themes/[Nirvana]06)Polly.mp3";
    pub const TERRITORIAL: &str = "audio/themes/[Nirvana]07)Territorial_pissings.mp3";
    pub const DRAIN_YOU: &str = "audio/themes/[Nirvana]08)Drain_you.mp3";
    pub const LOUNGE: &str = "audio/themes/[Nirvana]09)Lounge_act.mp3";
    pub const STAY_AWAY: &str = "audio/themes/[Nirvana]10)Stay_away.mp3";
    pub const ON_A_PLAIN: &str = "audio/themes/[Nirvana]11)On_a_plain.mp3";
    pub const SOMETHING: &str = "audio/themes/[Nirvana]12)Something_in_the_way.mp3";
}
