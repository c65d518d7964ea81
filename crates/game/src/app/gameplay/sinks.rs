use engine::{AnimationSink, MeterDisplay};
use tracing::{debug, info};

const METER_LOG_STEPS: f32 = 10.0;

/// Stands in for the on-screen sprint bar: remembers the range and value and
/// logs whenever the value crosses a tenth of the range.
#[derive(Debug, Default)]
pub(crate) struct LoggingMeterDisplay {
    min: f32,
    max: f32,
    value: f32,
    last_step: Option<i32>,
}

impl LoggingMeterDisplay {
    #[cfg(test)]
    pub(crate) fn value(&self) -> f32 {
        self.value
    }

    #[cfg(test)]
    pub(crate) fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    fn step_for(&self, value: f32) -> i32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0;
        }
        (((value - self.min) / span) * METER_LOG_STEPS).floor() as i32
    }
}

impl MeterDisplay for LoggingMeterDisplay {
    fn set_range(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max;
        self.last_step = None;
        info!(min, max, "sprint_meter_range");
    }

    fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
        let step = self.step_for(self.value);
        if self.last_step != Some(step) {
            debug!(value = self.value, max = self.max, "sprint_meter");
            self.last_step = Some(step);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct LoggingAnimation {
    walking: bool,
    flip_x: bool,
}

impl LoggingAnimation {
    #[cfg(test)]
    pub(crate) fn walking(&self) -> bool {
        self.walking
    }

    #[cfg(test)]
    pub(crate) fn flip_x(&self) -> bool {
        self.flip_x
    }
}

impl AnimationSink for LoggingAnimation {
    fn set_walking(&mut self, walking: bool) {
        if self.walking != walking {
            debug!(is_walking = walking, "animation_walking_changed");
        }
        self.walking = walking;
    }

    fn set_flip_x(&mut self, flip_x: bool) {
        if self.flip_x != flip_x {
            debug!(flip_x, "animation_flip_changed");
        }
        self.flip_x = flip_x;
    }
}
