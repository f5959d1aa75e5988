use bevy::camera::ScalingMode;
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameCamera>()
            .add_systems(Startup, setup_camera);
    }
}

/// Maps the 800x600 scene canvas (origin top-left, y down) onto world space
/// (origin at the canvas center, y up).
#[derive(Resource, Debug, Clone)]
pub struct GameCamera {
    pub bounds: CameraBounds,
}

#[derive(Debug, Clone)]
pub struct CameraBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            bounds: CameraBounds {
                width: 800.0,
                height: 600.0,
            },
        }
    }
}

impl GameCamera {
    /// Scene coordinates to world coordinates
    pub fn to_world(&self, scene: Vec2) -> Vec2 {
        Vec2::new(
            scene.x - self.bounds.width * 0.5,
            self.bounds.height * 0.5 - scene.y,
        )
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Orthographic 2D camera that always shows the whole canvas, letterboxed
fn setup_camera(mut commands: Commands, game_camera: Res<GameCamera>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::AutoMin {
            min_width: game_camera.bounds.width,
            min_height: game_camera.bounds.height,
        },
        ..OrthographicProjection::default_2d()
    });
    commands.spawn((Camera2d, projection, MainCamera));
}
