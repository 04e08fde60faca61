mod fall;
mod spawn;

pub use fall::FallSystem;
pub use spawn::SpawnSystem;
