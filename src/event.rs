//! Rare darkening sweeps at high intensity

use embassy_time::{Duration, Instant};
use rand::Rng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::curve::{cyclic_distance, gaussian};
use crate::wave::PERIOD;

/// Control value at which events become possible
pub const EVENT_THRESHOLD: f32 = 70.0;

/// Minimum time between two event triggers
pub const EVENT_COOLDOWN: Duration = Duration::from_millis(1_800);

/// Trigger rate (per second) at control value 100
pub const EVENT_RATE: f32 = 0.8;

/// Sweep speed in domain units per second
pub const EVENT_SWEEP_SPEED: f32 = 42.0;

/// Darkening at the pulse center in brightness points
pub const EVENT_DEPTH: f32 = 28.0;

const EVENT_SIGMA: f32 = 0.8;

/// A single darkening pulse sweeping across the domain
#[derive(Debug, Clone, Default)]
pub struct EventState {
    intensity: f32,
    phase: f32,
    last_trigger: Option<Instant>,
}

impl EventState {
    pub const fn new() -> Self {
        Self {
            intensity: 0.0,
            phase: 0.0,
            last_trigger: None,
        }
    }

    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Position of the pulse center
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Time of the most recent trigger
    pub const fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    /// Cancel a running sweep; the cooldown is kept
    pub fn clear(&mut self) {
        self.intensity = 0.0;
        self.phase = 0.0;
    }

    /// Start a sweep at `now`
    pub fn trigger(&mut self, now: Instant) {
        self.intensity = 1.0;
        self.phase = 0.0;
        self.last_trigger = Some(now);

        #[cfg(feature = "esp32-log")]
        println!("[EventState.trigger] event at {}ms", now.as_millis());
    }

    /// Whether a trigger at `now` would respect the cooldown
    pub fn is_cooled_down(&self, now: Instant) -> bool {
        self.last_trigger
            .is_none_or(|last| now.saturating_duration_since(last) >= EVENT_COOLDOWN)
    }

    /// Advance a running sweep, or roll for a new one
    ///
    /// Returns `true` when a new event was triggered on this tick.
    pub fn tick<R: Rng>(&mut self, n: f32, dt: f32, now: Instant, rng: &mut R) -> bool {
        if self.is_active() {
            self.phase += EVENT_SWEEP_SPEED * dt;
            if self.phase >= PERIOD {
                self.clear();
            } else {
                // Fades out over the sweep
                self.intensity = 1.0 - self.phase / PERIOD;
            }
            return false;
        }

        if n < EVENT_THRESHOLD || !self.is_cooled_down(now) {
            return false;
        }

        let excess = (n - EVENT_THRESHOLD) / (100.0 - EVENT_THRESHOLD);
        let chance = f64::from((EVENT_RATE * excess * dt).clamp(0.0, 1.0));
        if rng.gen_bool(chance) {
            self.trigger(now);
            return true;
        }
        false
    }

    /// Brightness contribution at `position` (zero or negative)
    pub fn contribution(&self, position: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        let distance = cyclic_distance(position, self.phase, PERIOD);
        -EVENT_DEPTH * self.intensity * gaussian(distance, EVENT_SIGMA)
    }
}
