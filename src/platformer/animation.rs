use bevy::prelude::*;

use crate::game::PlayerAnimation;

/// Plays [`PlayerAnimation`] clips on a texture-atlas sprite
#[derive(Component, Debug)]
pub struct PlayerAnimator {
    clip: PlayerAnimation,
    frame: usize,
    elapsed: f32,
}

impl Default for PlayerAnimator {
    fn default() -> Self {
        let clip = PlayerAnimation::default();
        Self {
            clip,
            frame: clip.frames().0,
            elapsed: 0.0,
        }
    }
}

impl PlayerAnimator {
    /// Switch clips; asking for the clip already playing keeps its progress
    pub fn play(&mut self, clip: PlayerAnimation) {
        if self.clip == clip {
            return;
        }
        self.clip = clip;
        self.frame = clip.frames().0;
        self.elapsed = 0.0;
    }

    pub fn clip(&self) -> PlayerAnimation {
        self.clip
    }

    /// Advance by `dt` seconds and return the atlas index to show
    pub fn advance(&mut self, dt: f32) -> usize {
        let (first, last) = self.clip.frames();
        let frame_time = 1.0 / self.clip.frame_rate();

        self.elapsed += dt;
        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.frame < last {
                self.frame += 1;
            } else if self.clip.looped() {
                self.frame = first;
            }
        }

        self.frame.clamp(first, last)
    }
}

pub fn animate_player(time: Res<Time>, mut players: Query<(&mut PlayerAnimator, &mut Sprite)>) {
    for (mut animator, mut sprite) in &mut players {
        let index = animator.advance(time.delta_secs());
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = index;
        }
    }
}
