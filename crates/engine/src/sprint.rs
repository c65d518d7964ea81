use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_SPRINT_SECONDS: f32 = 3.0;
pub const DEFAULT_DRAIN_RATE: f32 = 1.0;
/// Refill runs at this fraction of the drain rate.
pub const DEFAULT_REFILL_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintIntent {
    Draining,
    Refilling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SprintTuning {
    pub max_seconds: f32,
    pub drain_rate: f32,
    pub refill_rate: f32,
}

impl Default for SprintTuning {
    fn default() -> Self {
        Self {
            max_seconds: DEFAULT_MAX_SPRINT_SECONDS,
            drain_rate: DEFAULT_DRAIN_RATE,
            refill_rate: DEFAULT_DRAIN_RATE * DEFAULT_REFILL_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SprintMeterError {
    #[error("sprint meter max must be positive and finite, got {0}")]
    InvalidMax(f32),
    #[error("sprint {name} rate must be non-negative and finite, got {value}")]
    InvalidRate { name: &'static str, value: f32 },
}

/// Stamina pool measured in seconds of sprint. `current` stays inside
/// `[0, max]` after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintMeter {
    current: f32,
    max: f32,
    drain_rate: f32,
    refill_rate: f32,
}

impl SprintMeter {
    pub fn new(max_seconds: f32) -> Result<Self, SprintMeterError> {
        Self::from_tuning(SprintTuning {
            max_seconds,
            ..SprintTuning::default()
        })
    }

    pub fn from_tuning(tuning: SprintTuning) -> Result<Self, SprintMeterError> {
        if !(tuning.max_seconds.is_finite() && tuning.max_seconds > 0.0) {
            return Err(SprintMeterError::InvalidMax(tuning.max_seconds));
        }
        validate_rate("drain", tuning.drain_rate)?;
        validate_rate("refill", tuning.refill_rate)?;

        Ok(Self {
            current: tuning.max_seconds,
            max: tuning.max_seconds,
            drain_rate: tuning.drain_rate,
            refill_rate: tuning.refill_rate,
        })
    }

    /// Advances the meter by `dt_seconds`; negative or NaN deltas count as
    /// zero. Returns the updated value.
    pub fn tick(&mut self, intent: SprintIntent, dt_seconds: f32) -> f32 {
        let dt = dt_seconds.max(0.0);
        self.current = match intent {
            SprintIntent::Draining => (self.current - dt * self.drain_rate).max(0.0),
            SprintIntent::Refilling => (self.current + dt * self.refill_rate).min(self.max),
        };
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_exhausted(&self) -> bool {
        self.current <= 0.0
    }
}

fn validate_rate(name: &'static str, value: f32) -> Result<(), SprintMeterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SprintMeterError::InvalidRate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until(meter: &mut SprintMeter, intent: SprintIntent, dt: f32, target: f32) -> u32 {
        let mut ticks = 0;
        while meter.current() != target {
            meter.tick(intent, dt);
            ticks += 1;
            assert!(ticks < 10_000, "meter never reached {target}");
        }
        ticks
    }

    #[test]
    fn starts_full() {
        let meter = SprintMeter::new(2.5).expect("meter");
        assert_eq!(meter.current(), 2.5);
        assert_eq!(meter.max(), 2.5);
        assert_eq!(meter.fraction(), 1.0);
    }

    #[test]
    fn drain_clamps_at_zero() {
        let mut meter = SprintMeter::new(1.0).expect("meter");
        assert_eq!(meter.tick(SprintIntent::Draining, 0.75), 0.25);
        assert_eq!(meter.tick(SprintIntent::Draining, 0.75), 0.0);
        assert!(meter.is_exhausted());
    }

    #[test]
    fn refill_runs_at_half_rate_and_clamps_at_max() {
        let mut meter = SprintMeter::new(1.0).expect("meter");
        meter.tick(SprintIntent::Draining, 1.0);
        assert_eq!(meter.tick(SprintIntent::Refilling, 1.0), 0.5);
        assert_eq!(meter.tick(SprintIntent::Refilling, 5.0), 1.0);
    }

    #[test]
    fn refilling_from_empty_takes_twice_as_long_as_draining() {
        let dt = 0.125;
        let mut meter = SprintMeter::new(2.0).expect("meter");

        let drain_ticks = ticks_until(&mut meter, SprintIntent::Draining, dt, 0.0);
        let refill_ticks = ticks_until(&mut meter, SprintIntent::Refilling, dt, 2.0);

        assert_eq!(drain_ticks, 16);
        assert_eq!(refill_ticks, 2 * drain_ticks);
    }

    #[test]
    fn current_stays_in_bounds_for_mixed_ticks() {
        let mut meter = SprintMeter::new(1.5).expect("meter");
        let deltas = [0.0, 0.016, 0.3, 1.7, 0.001, 4.0, 0.25, 0.0, 9.5, 0.033];
        for (step, dt) in deltas.iter().cycle().take(200).enumerate() {
            let intent = if (step / 3) % 2 == 0 {
                SprintIntent::Draining
            } else {
                SprintIntent::Refilling
            };
            let value = meter.tick(intent, *dt);
            assert!((0.0..=meter.max()).contains(&value), "step={step} value={value}");
        }
    }

    #[test]
    fn negative_and_nan_deltas_do_not_move_the_meter() {
        let mut meter = SprintMeter::new(1.0).expect("meter");
        meter.tick(SprintIntent::Draining, 0.5);
        assert_eq!(meter.tick(SprintIntent::Draining, -3.0), 0.5);
        assert_eq!(meter.tick(SprintIntent::Refilling, -3.0), 0.5);
        assert_eq!(meter.tick(SprintIntent::Refilling, f32::NAN), 0.5);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(SprintMeter::new(0.0), Err(SprintMeterError::InvalidMax(0.0)));
        assert!(SprintMeter::new(-1.0).is_err());
        assert!(SprintMeter::new(f32::INFINITY).is_err());
        assert!(SprintMeter::new(f32::NAN).is_err());

        let result = SprintMeter::from_tuning(SprintTuning {
            refill_rate: -0.5,
            ..SprintTuning::default()
        });
        assert_eq!(
            result,
            Err(SprintMeterError::InvalidRate {
                name: "refill",
                value: -0.5
            })
        );
    }

    #[test]
    fn custom_refill_rate_is_honoured() {
        let mut meter = SprintMeter::from_tuning(SprintTuning {
            max_seconds: 1.0,
            drain_rate: 1.0,
            refill_rate: 0.25,
        })
        .expect("meter");
        meter.tick(SprintIntent::Draining, 1.0);
        assert_eq!(meter.tick(SprintIntent::Refilling, 1.0), 0.25);
    }

    #[test]
    fn tuning_fills_missing_fields_with_defaults() {
        let tuning: SprintTuning =
            serde_json::from_str(r#"{ "max_seconds": 4.0 }"#).expect("tuning");
        assert_eq!(tuning.max_seconds, 4.0);
        assert_eq!(tuning.drain_rate, DEFAULT_DRAIN_RATE);
        assert_eq!(tuning.refill_rate, DEFAULT_DRAIN_RATE * DEFAULT_REFILL_RATIO);
    }
}
