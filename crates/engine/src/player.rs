use tracing::debug;

use crate::app::{InputState, Vec2};
use crate::controls::{ControlMap, ControlsError, Key};
use crate::sprint::{SprintIntent, SprintMeter};

pub const ACTION_UP: &str = "up";
pub const ACTION_DOWN: &str = "down";
pub const ACTION_LEFT: &str = "left";
pub const ACTION_RIGHT: &str = "right";
pub const ACTION_SPRINT: &str = "sprint";
pub const ACTION_ATTACK: &str = "attack";
pub const REQUIRED_ACTIONS: [&str; 5] = [
    ACTION_UP,
    ACTION_DOWN,
    ACTION_LEFT,
    ACTION_RIGHT,
    ACTION_SPRINT,
];

pub const DEFAULT_MOVE_SPEED: f32 = 10.0;
pub const SPRINT_SPEED_MULTIPLIER: f32 = 2.0;

/// Bounded-range widget showing the sprint meter.
pub trait MeterDisplay {
    fn set_range(&mut self, min: f32, max: f32);
    fn set_value(&mut self, value: f32);
}

pub trait AnimationSink {
    fn set_walking(&mut self, walking: bool);
    fn set_flip_x(&mut self, flip_x: bool);
}

/// Keys the controller polls, resolved from a [`ControlMap`] up front so a
/// missing binding fails at startup instead of on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBindings {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub sprint: Key,
    pub attack: Option<Key>,
}

impl PlayerBindings {
    pub fn resolve(controls: &ControlMap) -> Result<Self, ControlsError> {
        Ok(Self {
            up: controls.get(ACTION_UP)?,
            down: controls.get(ACTION_DOWN)?,
            left: controls.get(ACTION_LEFT)?,
            right: controls.get(ACTION_RIGHT)?,
            sprint: controls.get(ACTION_SPRINT)?,
            attack: controls.get(ACTION_ATTACK).ok(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub displacement: Vec2,
    pub intent: SprintIntent,
    pub sprint_value: f32,
    pub walking: bool,
    pub hitbox_active: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    bindings: PlayerBindings,
    meter: SprintMeter,
    move_speed: f32,
    position: Vec2,
}

impl PlayerController {
    pub fn new(
        bindings: PlayerBindings,
        meter: SprintMeter,
        move_speed: f32,
        display: &mut dyn MeterDisplay,
    ) -> Self {
        display.set_range(0.0, meter.max());
        display.set_value(meter.current());
        Self {
            bindings,
            meter,
            move_speed,
            position: Vec2::ZERO,
        }
    }

    pub fn refresh_bindings(&mut self, controls: &ControlMap) -> Result<(), ControlsError> {
        self.bindings = PlayerBindings::resolve(controls)?;
        debug!(bindings = ?self.bindings, "player_bindings_refreshed");
        Ok(())
    }

    pub fn tick(
        &mut self,
        input: &dyn InputState,
        dt_seconds: f32,
        display: &mut dyn MeterDisplay,
        animation: &mut dyn AnimationSink,
    ) -> TickOutcome {
        let direction = self.movement_vector(input);
        let walking = direction != Vec2::ZERO;

        let intent = if walking
            && !self.meter.is_exhausted()
            && input.is_key_held(self.bindings.sprint)
        {
            SprintIntent::Draining
        } else {
            SprintIntent::Refilling
        };

        let displacement = if walking {
            let speed = match intent {
                SprintIntent::Draining => self.move_speed * SPRINT_SPEED_MULTIPLIER,
                SprintIntent::Refilling => self.move_speed,
            };
            direction.normalized().scaled(speed * dt_seconds.max(0.0))
        } else {
            Vec2::ZERO
        };
        self.position.x += displacement.x;
        self.position.y += displacement.y;

        let sprint_value = self.meter.tick(intent, dt_seconds);
        display.set_value(sprint_value);

        animation.set_walking(walking);
        if direction.x < 0.0 {
            animation.set_flip_x(true);
        } else if direction.x > 0.0 {
            animation.set_flip_x(false);
        }

        let hitbox_active = self
            .bindings
            .attack
            .is_some_and(|key| input.was_key_pressed(key));

        TickOutcome {
            displacement,
            intent,
            sprint_value,
            walking,
            hitbox_active,
        }
    }

    fn movement_vector(&self, input: &dyn InputState) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if input.is_key_held(self.bindings.up) {
            direction.y += 1.0;
        }
        if input.is_key_held(self.bindings.down) {
            direction.y -= 1.0;
        }
        if input.is_key_held(self.bindings.left) {
            direction.x -= 1.0;
        }
        if input.is_key_held(self.bindings.right) {
            direction.x += 1.0;
        }
        direction
    }

    pub fn bindings(&self) -> &PlayerBindings {
        &self.bindings
    }

    pub fn meter(&self) -> &SprintMeter {
        &self.meter
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}
