//! [`SceneHost`] backed by Bevy entities, assets and audio.

use std::collections::HashMap;

use bevy::audio::Volume;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::animation::PlayerAnimator;
use super::components::{Bomb, LevelEntity, LevelMusic, Player, Star};
use super::hud::HudText;
use super::physics::{Body, PhysicsControl, StaticBody};
use crate::camera::GameCamera;
use crate::config::GameSettings;
use crate::game::assets::AssetKey;
use crate::game::{
    AdversarySpawn, Controls, PlayerAnimation, PlayerMotion, PlayerSpawn, Platform, SceneHost,
    StarSpawn, TextSlot,
};

const PLATFORM_SIZE: Vec2 = Vec2::new(400.0, 32.0);
const STAR_SIZE: Vec2 = Vec2::new(24.0, 22.0);
const BOMB_SIZE: Vec2 = Vec2::new(14.0, 14.0);
const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

const BACKGROUND_Z: f32 = -10.0;
const PLATFORM_Z: f32 = 0.0;
const STAR_Z: f32 = 1.0;
const BOMB_Z: f32 = 2.0;
const PLAYER_Z: f32 = 3.0;

const HIT_TINT: Color = Color::srgb(1.0, 0.0, 0.0);

/// Handles registered under each [`AssetKey`]
#[derive(Resource, Default)]
pub struct SceneAssets {
    images: HashMap<AssetKey, Handle<Image>>,
    sheets: HashMap<AssetKey, (Handle<Image>, Handle<TextureAtlasLayout>)>,
    sounds: HashMap<AssetKey, Handle<AudioSource>>,
}

impl SceneAssets {
    fn image(&self, key: AssetKey) -> Handle<Image> {
        self.images.get(&key).cloned().unwrap_or_else(|| {
            warn!("No image registered as '{}'", key.name());
            Handle::default()
        })
    }

    fn sheet(&self, key: AssetKey) -> (Handle<Image>, Handle<TextureAtlasLayout>) {
        self.sheets.get(&key).cloned().unwrap_or_else(|| {
            warn!("No spritesheet registered as '{}'", key.name());
            (Handle::default(), Handle::default())
        })
    }

    fn sound(&self, key: AssetKey) -> Handle<AudioSource> {
        self.sounds.get(&key).cloned().unwrap_or_else(|| {
            warn!("No sound registered as '{}'", key.name());
            Handle::default()
        })
    }
}

#[derive(SystemParam)]
pub struct BevySceneHost<'w, 's> {
    commands: Commands<'w, 's>,
    asset_server: Res<'w, AssetServer>,
    atlas_layouts: ResMut<'w, Assets<TextureAtlasLayout>>,
    assets: ResMut<'w, SceneAssets>,
    camera: Res<'w, GameCamera>,
    settings: Res<'w, GameSettings>,
    controls: Res<'w, Controls>,
    hud: ResMut<'w, HudText>,
    physics: ResMut<'w, PhysicsControl>,
    level_entities: Query<'w, 's, Entity, With<LevelEntity>>,
    music: Query<'w, 's, Entity, With<LevelMusic>>,
    player: Query<
        'w,
        's,
        (
            &'static mut Body,
            &'static mut Sprite,
            &'static mut PlayerAnimator,
        ),
        With<Player>,
    >,
    stars: Query<
        'w,
        's,
        (&'static mut Body, &'static mut Visibility, &'static Star),
        Without<Player>,
    >,
}

impl BevySceneHost<'_, '_> {
    fn at(&self, x: f32, y: f32, z: f32) -> Transform {
        Transform::from_translation(self.camera.to_world(Vec2::new(x, y)).extend(z))
    }

    /// Disable a touched star. Returns how many stars are still active, or
    /// `None` if the star was already collected this frame.
    pub fn take_star(&mut self, entity: Entity) -> Option<usize> {
        {
            let Ok((mut body, mut visibility, _)) = self.stars.get_mut(entity) else {
                return None;
            };
            if !body.enabled {
                return None;
            }
            body.enabled = false;
            body.velocity = Vec2::ZERO;
            *visibility = Visibility::Hidden;
        }

        Some(self.stars.iter().filter(|(body, ..)| body.enabled).count())
    }

    pub fn player_x(&self) -> f32 {
        self.player
            .single()
            .map(|(body, ..)| body.position.x)
            .unwrap_or_default()
    }
}

impl SceneHost for BevySceneHost<'_, '_> {
    fn load_image(&mut self, key: AssetKey, path: &'static str) {
        let handle = self.asset_server.load(path);
        self.assets.images.insert(key, handle);
    }

    fn load_spritesheet(
        &mut self,
        key: AssetKey,
        path: &'static str,
        frame_size: (u32, u32),
        frames: u32,
    ) {
        if self.assets.sheets.contains_key(&key) {
            return;
        }
        let image = self.asset_server.load(path);
        let layout = TextureAtlasLayout::from_grid(
            UVec2::new(frame_size.0, frame_size.1),
            frames,
            1,
            None,
            None,
        );
        let layout = self.atlas_layouts.add(layout);
        self.assets.sheets.insert(key, (image, layout));
    }

    fn load_audio(&mut self, key: AssetKey, path: &'static str) {
        let handle = self.asset_server.load(path);
        self.assets.sounds.insert(key, handle);
    }

    fn clear_level(&mut self) {
        for entity in &self.level_entities {
            self.commands.entity(entity).despawn();
        }
        self.physics.paused = false;
    }

    fn add_background(&mut self, key: AssetKey, x: f32, y: f32) {
        let transform = self.at(x, y, BACKGROUND_Z);
        self.commands.spawn((
            Sprite::from_image(self.assets.image(key)),
            transform,
            LevelEntity,
            Name::new("Background"),
        ));
    }

    fn add_platform(&mut self, key: AssetKey, platform: Platform) {
        let transform = self
            .at(platform.x, platform.y, PLATFORM_Z)
            .with_scale(Vec3::new(platform.scale, platform.scale, 1.0));
        self.commands.spawn((
            Sprite::from_image(self.assets.image(key)),
            transform,
            StaticBody {
                position: Vec2::new(platform.x, platform.y),
                half_size: PLATFORM_SIZE * platform.scale * 0.5,
            },
            LevelEntity,
            Name::new("Platform"),
        ));
    }

    fn spawn_player(&mut self, spawn: PlayerSpawn) {
        let (image, layout) = self.assets.sheet(AssetKey::Dude);
        let animator = PlayerAnimator::default();

        let mut body = Body::new(Vec2::new(spawn.x, spawn.y), PLAYER_SIZE);
        body.bounce = Vec2::splat(spawn.bounce);
        body.collide_world_bounds = true;

        let transform = self.at(spawn.x, spawn.y, PLAYER_Z);
        self.commands.spawn((
            Sprite::from_atlas_image(
                image,
                TextureAtlas {
                    layout,
                    index: animator.clip().frames().0,
                },
            ),
            transform,
            body,
            animator,
            Player,
            LevelEntity,
            Name::new("Player"),
        ));
    }

    fn spawn_stars(&mut self, stars: &[StarSpawn]) {
        let image = self.assets.image(AssetKey::Star);
        for star in stars {
            let mut body = Body::new(Vec2::new(star.x, star.y), STAR_SIZE);
            body.bounce = Vec2::new(0.0, star.bounce_y);
            body.collide_world_bounds = true;

            let transform = self.at(star.x, star.y, STAR_Z);
            self.commands.spawn((
                Sprite::from_image(image.clone()),
                transform,
                body,
                Visibility::Inherited,
                Star { column_x: star.x },
                LevelEntity,
                Name::new("Star"),
            ));
        }
    }

    fn respawn_stars(&mut self) {
        for (mut body, mut visibility, star) in &mut self.stars {
            body.position = Vec2::new(star.column_x, 0.0);
            body.velocity = Vec2::ZERO;
            body.enabled = true;
            *visibility = Visibility::Inherited;
        }
    }

    fn spawn_adversary(&mut self, spawn: AdversarySpawn) {
        let mut body = Body::new(Vec2::new(spawn.x, spawn.y), BOMB_SIZE);
        body.velocity = Vec2::new(spawn.velocity_x, spawn.velocity_y);
        body.bounce = Vec2::splat(AdversarySpawn::BOUNCE);
        body.gravity = false;
        body.collide_world_bounds = true;

        let transform = self.at(spawn.x, spawn.y, BOMB_Z);
        self.commands.spawn((
            Sprite::from_image(self.assets.image(AssetKey::Bomb)),
            transform,
            body,
            Bomb,
            LevelEntity,
            Name::new("Bomb"),
        ));
    }

    fn controls(&self) -> Controls {
        *self.controls
    }

    fn player_on_ground(&self) -> bool {
        self.player
            .single()
            .is_ok_and(|(body, ..)| body.touching_down)
    }

    fn drive_player(&mut self, motion: PlayerMotion) {
        let Ok((mut body, _, mut animator)) = self.player.single_mut() else {
            return;
        };
        body.velocity.x = motion.velocity_x;
        if let Some(jump) = motion.jump_velocity {
            body.velocity.y = jump;
        }
        animator.play(motion.animation);
    }

    fn set_text(&mut self, slot: TextSlot, text: Option<String>) {
        self.hud.set(slot, text);
    }

    fn play_music(&mut self, key: AssetKey, volume: f32) {
        self.stop_music();
        let volume = volume * self.settings.music_volume;
        self.commands.spawn((
            AudioPlayer::new(self.assets.sound(key)),
            PlaybackSettings::LOOP.with_volume(Volume::Linear(volume)),
            LevelMusic,
            Name::new("Level music"),
        ));
    }

    fn stop_music(&mut self) {
        for entity in &self.music {
            self.commands.entity(entity).despawn();
        }
    }

    fn play_effect(&mut self, key: AssetKey) {
        self.commands.spawn((
            AudioPlayer::new(self.assets.sound(key)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(self.settings.effects_volume)),
        ));
    }

    fn freeze(&mut self) {
        self.physics.paused = true;
        if let Ok((_, mut sprite, mut animator)) = self.player.single_mut() {
            sprite.color = HIT_TINT;
            animator.play(PlayerAnimation::Turn);
        }
    }
}
