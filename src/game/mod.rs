pub mod assets;
pub mod host;
pub mod levels;
pub mod progression;
pub mod scene;

pub use host::{Controls, PlayerAnimation, PlayerMotion, PlayerSpawn, SceneHost, StarSpawn, TextSlot};
pub use levels::Platform;
pub use progression::{AdversarySpawn, AdvanceResult, Difficulty, SessionState};
