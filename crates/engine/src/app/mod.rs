mod input;
mod loop_runner;
mod scene;

pub use input::{InputSnapshot, InputState};
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use scene::{Scene, SceneCommand, Vec2};
