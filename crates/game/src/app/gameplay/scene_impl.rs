use std::path::{Path, PathBuf};

use engine::{
    ControlMap, ControlsError, InputSnapshot, InputState, Key, PlayerBindings, PlayerController,
    Scene, SceneCommand, SprintMeter, ACTION_SPRINT,
};
use tracing::{debug, info, warn};

use super::sinks::{LoggingAnimation, LoggingMeterDisplay};
use super::GameplayError;
use crate::app::tuning::PlayerTuning;

pub(crate) const REBIND_SPRINT_KEY: Key = Key::F2;
pub(crate) const SAVE_CONTROLS_KEY: Key = Key::F5;
pub(crate) const LOAD_CONTROLS_KEY: Key = Key::F9;
const RESERVED_KEYS: [Key; 4] = [
    REBIND_SPRINT_KEY,
    SAVE_CONTROLS_KEY,
    LOAD_CONTROLS_KEY,
    Key::Escape,
];

pub(crate) struct PlayerScene {
    controls_path: PathBuf,
    controls: ControlMap,
    player: PlayerController,
    display: LoggingMeterDisplay,
    animation: LoggingAnimation,
    pending_rebind: Option<&'static str>,
    hitbox_active: bool,
}

impl PlayerScene {
    /// Loads (or creates) the controls file and validates that every action
    /// the controller polls is bound.
    pub(crate) fn new(controls_path: &Path, tuning: &PlayerTuning) -> Result<Self, GameplayError> {
        let controls = ControlMap::load_or_create(controls_path, &ControlMap::player_defaults())?;
        let bindings = PlayerBindings::resolve(&controls)?;
        let meter = SprintMeter::from_tuning(tuning.sprint)?;
        let mut display = LoggingMeterDisplay::default();
        let player = PlayerController::new(bindings, meter, tuning.move_speed, &mut display);

        Ok(Self {
            controls_path: controls_path.to_path_buf(),
            controls,
            player,
            display,
            animation: LoggingAnimation::default(),
            pending_rebind: None,
            hitbox_active: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn controls(&self) -> &ControlMap {
        &self.controls
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> &PlayerController {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn display(&self) -> &LoggingMeterDisplay {
        &self.display
    }

    #[cfg(test)]
    pub(crate) fn animation(&self) -> &LoggingAnimation {
        &self.animation
    }

    #[cfg(test)]
    pub(crate) fn pending_rebind(&self) -> Option<&'static str> {
        self.pending_rebind
    }

    fn save_controls(&self) {
        if let Err(error) = self.controls.save(&self.controls_path) {
            warn!(error = %error, "controls_save_failed");
        }
    }

    /// Swaps in the controls on disk only when they parse and still bind
    /// every required action.
    fn reload_controls(&mut self) -> Result<(), ControlsError> {
        let mut candidate = self.controls.clone();
        candidate.load(&self.controls_path)?;
        self.player.refresh_bindings(&candidate)?;
        self.controls = candidate;
        Ok(())
    }

    fn apply_pending_rebind(&mut self, action: &'static str, input: &InputSnapshot) -> bool {
        let Some(key) = input
            .pressed_keys()
            .find(|key| !RESERVED_KEYS.contains(key))
        else {
            return false;
        };

        let previous = self.controls.rebind(action, key);
        if let Err(error) = self.player.refresh_bindings(&self.controls) {
            warn!(error = %error, "player_bindings_refresh_failed");
        }
        info!(action, key = %key, previous = ?previous, "control_rebound");
        true
    }
}

impl Scene for PlayerScene {
    fn load(&mut self) {
        info!(
            controls = %self.controls_path.display(),
            bindings = self.controls.len(),
            sprint_max = self.player.meter().max(),
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        if let Some(action) = self.pending_rebind {
            if self.apply_pending_rebind(action, input) {
                self.pending_rebind = None;
            }
        } else if input.was_key_pressed(REBIND_SPRINT_KEY) {
            self.pending_rebind = Some(ACTION_SPRINT);
            info!(action = ACTION_SPRINT, "rebind_capture_armed");
        }

        if input.was_key_pressed(SAVE_CONTROLS_KEY) {
            self.save_controls();
        }
        if input.was_key_pressed(LOAD_CONTROLS_KEY) {
            if let Err(error) = self.reload_controls() {
                warn!(error = %error, "controls_reload_failed");
            }
        }

        let outcome = self.player.tick(
            input,
            fixed_dt_seconds,
            &mut self.display,
            &mut self.animation,
        );
        if outcome.hitbox_active != self.hitbox_active {
            debug!(active = outcome.hitbox_active, "hitbox_toggled");
            self.hitbox_active = outcome.hitbox_active;
        }

        SceneCommand::None
    }

    fn unload(&mut self) {
        let position = self.player.position();
        info!(x = position.x, y = position.y, "scene_unloaded");
    }

    fn debug_title(&self) -> Option<String> {
        let meter = self.player.meter();
        let capture = if self.pending_rebind.is_some() {
            " | press a key for sprint"
        } else {
            ""
        };
        Some(format!(
            "Proto GE | sprint {:.1}/{:.1}{capture}",
            meter.current(),
            meter.max()
        ))
    }
}
