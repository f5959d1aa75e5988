// game/scene.rs

//! Level lifecycle written against [`SceneHost`]: asset registration, scene
//! construction from a [`LevelDescriptor`], per-frame steering and the
//! star / bomb callbacks.

use super::assets::{self, AssetKey, images};
use super::host::{
    Controls, PlayerAnimation, PlayerMotion, PlayerSpawn, SceneHost, StarSpawn, TextSlot,
};
use super::levels::{LevelDescriptor, TERMINAL_LEVEL};
use super::progression::{AdversarySpawn, AdvanceResult, SessionState};
use rand::Rng;

/// Stars per wave
pub const WAVE_SIZE: usize = 24;

/// Horizontal distance between neighbouring stars
const STAR_STEP_X: f32 = 33.5;

const FIRST_STAR_X: f32 = 12.0;

const RUN_SPEED: f32 = 160.0;

const JUMP_SPEED: f32 = 330.0;

const MUSIC_VOLUME: f32 = 1.0;

pub const PLAYER_SPAWN: PlayerSpawn = PlayerSpawn {
    x: 100.0,
    y: 450.0,
    bounce: 0.2,
};

/// Background images are centered on the canvas
const BACKGROUND_POSITION: (f32, f32) = (400.0, 300.0);

const GAME_OVER_TEXT: &str = "Game Over!";

/// Lay out a fresh wave of stars along the top edge, each with its own bounce
pub fn star_wave(rng: &mut impl Rng) -> Vec<StarSpawn> {
    (0..WAVE_SIZE)
        .map(|i| StarSpawn {
            x: FIRST_STAR_X + STAR_STEP_X * i as f32,
            y: 0.0,
            bounce_y: rng.random_range(0.4..0.8),
        })
        .collect()
}

/// Translate the held keys into a player motion
pub fn steer(controls: Controls, on_ground: bool) -> PlayerMotion {
    let (velocity_x, animation) = if controls.left {
        (-RUN_SPEED, PlayerAnimation::Left)
    } else if controls.right {
        (RUN_SPEED, PlayerAnimation::Right)
    } else {
        (0.0, PlayerAnimation::Turn)
    };

    PlayerMotion {
        velocity_x,
        jump_velocity: (controls.jump && on_ground).then_some(-JUMP_SPEED),
        animation,
    }
}

/// Register the shared assets plus the ones this level rebinds
pub fn preload<H: SceneHost>(host: &mut H, descriptor: &LevelDescriptor) {
    host.load_image(AssetKey::Star, images::STAR);
    host.load_image(AssetKey::Bomb, images::BOMB);
    host.load_spritesheet(
        AssetKey::Dude,
        images::DUDE,
        assets::DUDE_FRAME_SIZE,
        assets::DUDE_FRAME_COUNT,
    );
    host.load_audio(AssetKey::CollectPrize, assets::audio::KEY);

    host.load_image(AssetKey::Background, descriptor.background);
    host.load_image(AssetKey::Ground, descriptor.ground);
    host.load_audio(AssetKey::Theme, descriptor.theme);
}

/// Tear down whatever is on screen and build `descriptor` in its place
pub fn build<H: SceneHost>(
    host: &mut H,
    descriptor: &LevelDescriptor,
    session: &SessionState,
    rng: &mut impl Rng,
) {
    host.clear_level();

    let (bg_x, bg_y) = BACKGROUND_POSITION;
    host.add_background(AssetKey::Background, bg_x, bg_y);

    for platform in descriptor.platforms {
        host.add_platform(AssetKey::Ground, *platform);
    }

    // The end screen is a still frame
    if !descriptor.is_terminal() {
        host.spawn_player(PLAYER_SPAWN);
        host.spawn_stars(&star_wave(rng));
    }

    host.set_text(TextSlot::Score, Some(score_text(session)));
    let level_text =
        (descriptor.level < TERMINAL_LEVEL).then(|| format!("Level: {}", descriptor.level));
    host.set_text(TextSlot::Level, level_text);

    if descriptor.is_terminal() {
        host.set_text(TextSlot::Banner, Some(GAME_OVER_TEXT.to_string()));
    } else {
        host.set_text(TextSlot::Banner, None);
    }

    host.play_music(AssetKey::Theme, MUSIC_VOLUME);
}

/// Per-frame update: steer the player, then move on if the level is won.
pub fn tick<H: SceneHost>(
    host: &mut H,
    session: &mut SessionState,
    rng: &mut impl Rng,
) -> AdvanceResult {
    if session.is_game_over() || session.is_finished() {
        return AdvanceResult::NotYet;
    }

    let motion = steer(host.controls(), host.player_on_ground());
    host.drive_player(motion);

    let result = session.try_advance();
    if let AdvanceResult::Advanced(next) = result {
        preload(host, next);
        build(host, next, session, rng);
    }
    result
}

/// The player touched an active star. `stars_remaining` excludes that star.
pub fn on_star_collected<H: SceneHost>(
    host: &mut H,
    session: &mut SessionState,
    player_x: f32,
    stars_remaining: usize,
    rng: &mut impl Rng,
) {
    let collected = session.collect_star(stars_remaining);
    if collected.points == 0 {
        return;
    }

    host.set_text(TextSlot::Score, Some(score_text(session)));
    host.play_effect(AssetKey::CollectPrize);

    if collected.wave_cleared {
        host.respawn_stars();
        let spawn = AdversarySpawn::plan(player_x, rng);
        log::debug!(
            "Spawning bomb at x={} with velocity {}",
            spawn.x,
            spawn.velocity_x
        );
        host.spawn_adversary(spawn);
    }
}

/// The player ran into a bomb
pub fn on_adversary_hit<H: SceneHost>(host: &mut H, session: &mut SessionState) {
    if !session.hit_adversary() {
        return;
    }

    host.freeze();
    host.stop_music();
    host.set_text(TextSlot::Banner, Some(GAME_OVER_TEXT.to_string()));
}

fn score_text(session: &SessionState) -> String {
    format!("Score: {}", session.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::levels::{Platform, descriptor_for};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        LoadImage(AssetKey, &'static str),
        LoadSpritesheet(AssetKey),
        LoadAudio(AssetKey, &'static str),
        Clear,
        Background,
        Platform(Platform),
        Player,
        Stars(usize),
        RespawnStars,
        Adversary(AdversarySpawn),
        Drive(PlayerMotion),
        Text(TextSlot, Option<String>),
        Music(AssetKey),
        StopMusic,
        Effect(AssetKey),
        Freeze,
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<Call>,
        controls: Controls,
        on_ground: bool,
    }

    impl RecordingHost {
        fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| predicate(c)).count()
        }

        fn last_text(&self, slot: TextSlot) -> Option<Option<String>> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Text(s, text) if *s == slot => Some(text.clone()),
                _ => None,
            })
        }
    }

    impl SceneHost for RecordingHost {
        fn load_image(&mut self, key: AssetKey, path: &'static str) {
            self.calls.push(Call::LoadImage(key, path));
        }

        fn load_spritesheet(
            &mut self,
            key: AssetKey,
            _path: &'static str,
            _frame_size: (u32, u32),
            _frames: u32,
        ) {
            self.calls.push(Call::LoadSpritesheet(key));
        }

        fn load_audio(&mut self, key: AssetKey, path: &'static str) {
            self.calls.push(Call::LoadAudio(key, path));
        }

        fn clear_level(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn add_background(&mut self, _key: AssetKey, _x: f32, _y: f32) {
            self.calls.push(Call::Background);
        }

        fn add_platform(&mut self, _key: AssetKey, platform: Platform) {
            self.calls.push(Call::Platform(platform));
        }

        fn spawn_player(&mut self, _spawn: PlayerSpawn) {
            self.calls.push(Call::Player);
        }

        fn spawn_stars(&mut self, stars: &[StarSpawn]) {
            self.calls.push(Call::Stars(stars.len()));
        }

        fn respawn_stars(&mut self) {
            self.calls.push(Call::RespawnStars);
        }

        fn spawn_adversary(&mut self, spawn: AdversarySpawn) {
            self.calls.push(Call::Adversary(spawn));
        }

        fn controls(&self) -> Controls {
            self.controls
        }

        fn player_on_ground(&self) -> bool {
            self.on_ground
        }

        fn drive_player(&mut self, motion: PlayerMotion) {
            self.calls.push(Call::Drive(motion));
        }

        fn set_text(&mut self, slot: TextSlot, text: Option<String>) {
            self.calls.push(Call::Text(slot, text));
        }

        fn play_music(&mut self, key: AssetKey, _volume: f32) {
            self.calls.push(Call::Music(key));
        }

        fn stop_music(&mut self) {
            self.calls.push(Call::StopMusic);
        }

        fn play_effect(&mut self, key: AssetKey) {
            self.calls.push(Call::Effect(key));
        }

        fn freeze(&mut self) {
            self.calls.push(Call::Freeze);
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_star_wave_layout() {
        let wave = star_wave(&mut rng());

        assert_eq!(wave.len(), 24);
        assert_eq!(wave[0].x, 12.0);
        assert_eq!(wave[1].x, 45.5);
        assert!((wave[23].x - 782.5).abs() < 1e-3);
        for star in &wave {
            assert_eq!(star.y, 0.0);
            assert!((0.4..0.8).contains(&star.bounce_y));
        }
    }

    #[test]
    fn test_steer() {
        let idle = steer(Controls::default(), true);
        assert_eq!(idle.velocity_x, 0.0);
        assert_eq!(idle.animation, PlayerAnimation::Turn);
        assert_eq!(idle.jump_velocity, None);

        let left = steer(
            Controls {
                left: true,
                ..Controls::default()
            },
            true,
        );
        assert_eq!(left.velocity_x, -160.0);
        assert_eq!(left.animation, PlayerAnimation::Left);

        let right = steer(
            Controls {
                right: true,
                ..Controls::default()
            },
            false,
        );
        assert_eq!(right.velocity_x, 160.0);
        assert_eq!(right.animation, PlayerAnimation::Right);

        // Left wins when both are held
        let both = steer(
            Controls {
                left: true,
                right: true,
                jump: false,
            },
            true,
        );
        assert_eq!(both.velocity_x, -160.0);
    }

    #[test]
    fn test_jump_needs_ground() {
        let jump = Controls {
            jump: true,
            ..Controls::default()
        };
        assert_eq!(steer(jump, true).jump_velocity, Some(-330.0));
        assert_eq!(steer(jump, false).jump_velocity, None);
    }

    #[test]
    fn test_preload_registers_level_assets() {
        let mut host = RecordingHost::default();
        let level7 = descriptor_for(7).unwrap();

        preload(&mut host, level7);

        assert!(host.calls.contains(&Call::LoadImage(AssetKey::Background, images::LEVEL7)));
        assert!(host.calls.contains(&Call::LoadImage(AssetKey::Ground, images::PLATFORM2)));
        assert!(host.calls.contains(&Call::LoadAudio(
            AssetKey::Theme,
            assets::themes::TERRITORIAL
        )));
        assert!(host.calls.contains(&Call::LoadSpritesheet(AssetKey::Dude)));
        assert!(host.calls.contains(&Call::LoadAudio(
            AssetKey::CollectPrize,
            assets::audio::KEY
        )));
    }

    #[test]
    fn test_build_first_level() {
        let mut host = RecordingHost::default();
        let session = SessionState::default();
        let level1 = descriptor_for(1).unwrap();

        build(&mut host, level1, &session, &mut rng());

        assert_eq!(host.calls[0], Call::Clear);
        assert_eq!(host.calls[1], Call::Background);
        let platforms: Vec<_> = host
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Platform(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(platforms, level1.platforms);
        assert_eq!(host.count(|c| *c == Call::Player), 1);
        assert!(host.calls.contains(&Call::Stars(24)));
        assert_eq!(
            host.last_text(TextSlot::Score),
            Some(Some("Score: 0".to_string()))
        );
        assert_eq!(
            host.last_text(TextSlot::Level),
            Some(Some("Level: 1".to_string()))
        );
        assert_eq!(host.last_text(TextSlot::Banner), Some(None));
        assert_eq!(host.calls.last(), Some(&Call::Music(AssetKey::Theme)));
    }

    #[test]
    fn test_build_end_screen() {
        let mut host = RecordingHost::default();
        let session = SessionState::default();
        let end = descriptor_for(TERMINAL_LEVEL).unwrap();

        build(&mut host, end, &session, &mut rng());

        assert_eq!(host.count(|c| matches!(c, Call::Stars(_))), 0);
        assert_eq!(host.count(|c| matches!(c, Call::Platform(_))), 0);
        assert_eq!(host.count(|c| *c == Call::Player), 0);
        assert_eq!(host.last_text(TextSlot::Level), Some(None));
        assert_eq!(
            host.last_text(TextSlot::Banner),
            Some(Some("Game Over!".to_string()))
        );
    }

    #[test]
    fn test_last_star_spawns_one_bomb() {
        let mut host = RecordingHost::default();
        let mut session = SessionState::default();
        let mut rng = rng();

        for remaining in (0..WAVE_SIZE).rev() {
            on_star_collected(&mut host, &mut session, 100.0, remaining, &mut rng);
            let expected = usize::from(remaining == 0);
            assert_eq!(
                host.count(|c| matches!(c, Call::Adversary(_))),
                expected,
                "after star with {remaining} remaining"
            );
        }

        assert_eq!(host.count(|c| *c == Call::RespawnStars), 1);
        assert_eq!(host.count(|c| *c == Call::Effect(AssetKey::CollectPrize)), 24);
        assert_eq!(
            host.last_text(TextSlot::Score),
            Some(Some("Score: 240".to_string()))
        );

        let Some(Call::Adversary(bomb)) = host
            .calls
            .iter()
            .find(|c| matches!(c, Call::Adversary(_)))
            .cloned()
        else {
            panic!("expected a bomb");
        };
        assert!(bomb.x >= 400.0);
    }

    #[test]
    fn test_tick_steers_and_waits_for_goal() {
        let mut host = RecordingHost {
            controls: Controls {
                right: true,
                jump: true,
                left: false,
            },
            on_ground: true,
            ..Default::default()
        };
        let mut session = SessionState::default();

        let result = tick(&mut host, &mut session, &mut rng());

        assert_eq!(result, AdvanceResult::NotYet);
        assert_eq!(
            host.calls,
            vec![Call::Drive(PlayerMotion {
                velocity_x: 160.0,
                jump_velocity: Some(-330.0),
                animation: PlayerAnimation::Right,
            })]
        );
    }

    #[test]
    fn test_tick_rebuilds_on_advance() {
        let mut host = RecordingHost::default();
        let mut session = SessionState::default();
        let mut rng = rng();

        for remaining in (0..WAVE_SIZE).rev() {
            on_star_collected(&mut host, &mut session, 600.0, remaining, &mut rng);
        }
        host.calls.clear();

        let result = tick(&mut host, &mut session, &mut rng);

        let AdvanceResult::Advanced(next) = result else {
            panic!("expected to advance");
        };
        assert_eq!(next.level, 2);
        assert_eq!(session.level(), 2);
        assert!(host.calls.contains(&Call::LoadImage(AssetKey::Background, images::LEVEL2)));
        assert_eq!(host.count(|c| *c == Call::Clear), 1);
        assert_eq!(host.count(|c| matches!(c, Call::Platform(_))), 5);
        assert_eq!(
            host.last_text(TextSlot::Level),
            Some(Some("Level: 2".to_string()))
        );
    }

    #[test]
    fn test_game_over_freezes_scene() {
        let mut host = RecordingHost::default();
        let mut session = SessionState::default();
        let mut rng = rng();

        on_adversary_hit(&mut host, &mut session);
        assert_eq!(
            host.calls,
            vec![
                Call::Freeze,
                Call::StopMusic,
                Call::Text(TextSlot::Banner, Some("Game Over!".to_string())),
            ]
        );

        // A second hit and further stars change nothing
        host.calls.clear();
        on_adversary_hit(&mut host, &mut session);
        on_star_collected(&mut host, &mut session, 0.0, 0, &mut rng);
        assert_eq!(tick(&mut host, &mut session, &mut rng), AdvanceResult::NotYet);
        assert!(host.calls.is_empty());
        assert_eq!(session.score(), 0);
    }
}
