use engine::{ControlsError, SprintMeterError};
use thiserror::Error;

mod scene_impl;
mod sinks;

pub(crate) use scene_impl::PlayerScene;

#[derive(Debug, Error)]
pub(crate) enum GameplayError {
    #[error(transparent)]
    Controls(#[from] ControlsError),
    #[error(transparent)]
    SprintMeter(#[from] SprintMeterError),
}
