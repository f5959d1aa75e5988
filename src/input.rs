use bevy::prelude::*;

use crate::game::Controls;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Controls>()
            .add_systems(Update, sample_controls.in_set(ControlsSet));
    }
}

/// Systems that read [`Controls`] run after this set
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlsSet;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const JUMP_KEYS: [KeyCode; 3] = [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space];

fn sample_controls(keyboard: Res<ButtonInput<KeyCode>>, mut controls: ResMut<Controls>) {
    let sampled = Controls {
        left: keyboard.any_pressed(LEFT_KEYS),
        right: keyboard.any_pressed(RIGHT_KEYS),
        jump: keyboard.any_pressed(JUMP_KEYS),
    };
    // avoid flagging the resource as changed every frame
    controls.set_if_neq(sampled);
}
