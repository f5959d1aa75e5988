pub mod animation;
pub mod components;
pub mod host;
pub mod hud;
pub mod physics;
pub mod plugin;

pub use plugin::PlatformerPlugin;
