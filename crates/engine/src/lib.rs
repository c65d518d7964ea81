use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub mod app;
pub mod controls;
pub mod player;
pub mod sprint;

pub use app::{
    run_app, AppError, InputSnapshot, InputState, LoopConfig, Scene, SceneCommand, Vec2,
};
pub use controls::{
    Binding, ControlMap, ControlsError, Key, ParseError, ParseErrorKind, UnknownKeyError,
    DEFAULT_CONTROLS_FILE,
};
pub use player::{
    AnimationSink, MeterDisplay, PlayerBindings, PlayerController, TickOutcome, ACTION_ATTACK,
    ACTION_SPRINT, DEFAULT_MOVE_SPEED, REQUIRED_ACTIONS,
};
pub use sprint::{
    SprintIntent, SprintMeter, SprintMeterError, SprintTuning, DEFAULT_REFILL_RATIO,
};

pub const CONTROLS_ENV_VAR: &str = "PROTOGE_CONTROLS";
pub const TUNING_ENV_VAR: &str = "PROTOGE_TUNING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub controls_file: PathBuf,
    pub tuning_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("environment variable {var} is set but empty")]
    EmptyPath { var: &'static str },
}

/// Controls default to `player1controls.ini` in the working directory; the
/// tuning file is only read when its variable is set.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    resolve_paths_from(env::var(CONTROLS_ENV_VAR), env::var(TUNING_ENV_VAR))
}

fn resolve_paths_from(
    controls: Result<String, env::VarError>,
    tuning: Result<String, env::VarError>,
) -> Result<AppPaths, StartupError> {
    let controls_file = optional_path(CONTROLS_ENV_VAR, controls)?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTROLS_FILE));
    let tuning_file = optional_path(TUNING_ENV_VAR, tuning)?;
    Ok(AppPaths {
        controls_file,
        tuning_file,
    })
}

fn optional_path(
    var: &'static str,
    value: Result<String, env::VarError>,
) -> Result<Option<PathBuf>, StartupError> {
    match value {
        Ok(raw) if raw.trim().is_empty() => Err(StartupError::EmptyPath { var }),
        Ok(raw) => Ok(Some(PathBuf::from(raw.trim()))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(StartupError::EnvVar { var, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_player_one_controls_without_tuning() {
        let paths =
            resolve_paths_from(Err(env::VarError::NotPresent), Err(env::VarError::NotPresent))
                .expect("paths");
        assert_eq!(paths.controls_file, PathBuf::from(DEFAULT_CONTROLS_FILE));
        assert_eq!(paths.tuning_file, None);
    }

    #[test]
    fn env_values_override_defaults() {
        let paths = resolve_paths_from(
            Ok("config/player2controls.ini".to_string()),
            Ok("config/tuning.json".to_string()),
        )
        .expect("paths");
        assert_eq!(paths.controls_file, PathBuf::from("config/player2controls.ini"));
        assert_eq!(paths.tuning_file, Some(PathBuf::from("config/tuning.json")));
    }

    #[test]
    fn blank_env_value_is_rejected() {
        let error = resolve_paths_from(Ok("  ".to_string()), Err(env::VarError::NotPresent))
            .expect_err("must fail");
        assert!(matches!(error, StartupError::EmptyPath { var: CONTROLS_ENV_VAR }));
    }
}
