use bevy::prelude::*;

mod camera;
mod config;
mod game;
mod input;
mod platformer;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use config::SettingsPlugin;
use input::InputPlugin;
use platformer::PlatformerPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Nevermind the Platforms".into(),
                    resolution: WindowResolution::new(800, 600),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    // Settings after DefaultPlugins so loading can log
    .add_plugins(SettingsPlugin)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(PlatformerPlugin);

    app.run();
}
