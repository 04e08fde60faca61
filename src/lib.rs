pub mod audio;
pub mod config;
pub mod engine;
pub mod rng;
pub mod state;
pub mod systems;
pub mod web;

pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder, EngineSettings, GameEvent, TickSummary};
pub use state::{FrameSnapshot, GameState, Phase};
