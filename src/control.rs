//! Control value state
//!
//! One scalar in `[0, 100]` drives nearly every visual parameter. The
//! externally requested target is reached through a linear ramp so the
//! strips never jump.

use embassy_time::{Duration, Instant};

use crate::transition::ValueTransition;

/// Lowest control value
pub const CONTROL_MIN: f32 = 0.0;

/// Highest control value
pub const CONTROL_MAX: f32 = 100.0;

/// Time the control value needs to follow a new target
pub const CONTROL_RAMP_DURATION: Duration = Duration::from_secs(16);

/// Clamp an external control value into the valid domain
///
/// NaN is treated as the lowest value.
pub fn clamp_control(n: f32) -> f32 {
    if n.is_nan() {
        CONTROL_MIN
    } else {
        n.clamp(CONTROL_MIN, CONTROL_MAX)
    }
}

/// Target/current control value plus the pause flag
#[derive(Debug, Clone)]
pub struct ControlState {
    value: ValueTransition<f32>,
    ramp: Duration,
    paused: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(CONTROL_RAMP_DURATION)
    }
}

impl ControlState {
    /// Create a control state resting at 0
    pub const fn new(ramp: Duration) -> Self {
        Self {
            value: ValueTransition::new_f32(CONTROL_MIN),
            ramp,
            paused: false,
        }
    }

    /// Requested control value
    pub fn target(&self) -> f32 {
        self.value.target()
    }

    /// Ramped control value used for rendering
    pub const fn current(&self) -> f32 {
        self.value.current()
    }

    /// Value the running ramp is anchored at
    pub const fn ramp_start(&self) -> f32 {
        self.value.source()
    }

    pub const fn is_transitioning(&self) -> bool {
        self.value.is_transitioning()
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start ramping towards `target` (clamped to `[0, 100]`)
    pub fn set_target(&mut self, target: f32, now: Instant) {
        self.value.set(clamp_control(target), self.ramp, now);
    }

    /// Drop target and current value to 0, cancel any ramp and lift pause
    pub fn reset(&mut self, now: Instant) {
        self.value.thaw(now);
        self.value.snap(CONTROL_MIN);
        self.paused = false;
    }

    /// Toggle pause; returns the new paused flag
    ///
    /// The ramp is held while paused and continues afterwards.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.value.freeze(now);
        } else {
            self.value.thaw(now);
        }
        self.paused
    }

    /// Advance the ramp to `now`
    pub fn tick(&mut self, now: Instant) {
        self.value.tick(now);
    }
}
