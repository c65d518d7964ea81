use engine::{resolve_app_paths, LoopConfig, Scene, StartupError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{GameplayError, PlayerScene};
use super::tuning::{load_tuning, TuningError};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error(transparent)]
    Gameplay(#[from] GameplayError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Proto GE Startup ===");

    let paths = resolve_app_paths()?;
    info!(
        controls = %paths.controls_file.display(),
        tuning = ?paths.tuning_file,
        "startup"
    );
    let tuning = load_tuning(paths.tuning_file.as_deref())?;
    let scene = PlayerScene::new(&paths.controls_file, &tuning)?;

    Ok(AppWiring {
        config: LoopConfig::default(),
        scene: Box::new(scene),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
