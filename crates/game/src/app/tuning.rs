use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::{SprintTuning, DEFAULT_MOVE_SPEED};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayerTuning {
    pub(crate) move_speed: f32,
    pub(crate) sprint: SprintTuning,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            sprint: SprintTuning::default(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse tuning json {path} at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("tuning value move_speed must be non-negative and finite, got {0}")]
    InvalidMoveSpeed(f32),
}

pub(crate) fn load_tuning(path: Option<&Path>) -> Result<PlayerTuning, TuningError> {
    let Some(path) = path else {
        return Ok(PlayerTuning::default());
    };
    let raw = fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tuning_json(path, &raw)
}

fn parse_tuning_json(path: &Path, raw: &str) -> Result<PlayerTuning, TuningError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let tuning = serde_path_to_error::deserialize::<_, PlayerTuning>(&mut deserializer).map_err(
        |error| {
            let field = error.path().to_string();
            TuningError::Parse {
                path: path.to_path_buf(),
                field,
                source: error.into_inner(),
            }
        },
    )?;

    if !(tuning.move_speed.is_finite() && tuning.move_speed >= 0.0) {
        return Err(TuningError::InvalidMoveSpeed(tuning.move_speed));
    }
    Ok(tuning)
}
