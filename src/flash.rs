//! Rare bright flashes near the far end of a bridge strip

use embassy_time::{Duration, Instant};
use libm::{expf, powf};
use rand::Rng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    color::{Rgb, add_colors, rgb_from_u32, scale_color},
    curve::{saturate, smoothstep},
    math8::unit8,
};

/// Drive level above which flashes may trigger
pub const FLASH_THRESHOLD: f32 = 85.0;

/// How often a trigger is rolled
pub const FLASH_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Trigger probability at full drive
pub const FLASH_CHANCE: f32 = 0.9;

/// Exponential decay rate per second
pub const FLASH_DECAY_RATE: f32 = 5.0;

/// Intensity below which a flash counts as finished
pub const FLASH_EPSILON: f32 = 0.01;

/// Fraction of the strip (at the far end) lit by a flash
pub const FLASH_ZONE: f32 = 0.3;

/// Near-white flash color
pub const FLASH_COLOR: Rgb = rgb_from_u32(0x00FF_F4E0);

/// Secondary remap of the control value used for flash gating
///
/// Values up to 20 map to 0, 100 maps to 100.
pub fn flash_drive(n: f32) -> f32 {
    saturate((n - 20.0) / 80.0) * 100.0
}

/// Trigger probability for one check at control value `n`
pub fn flash_probability(n: f32) -> f32 {
    let drive = flash_drive(n);
    if drive <= FLASH_THRESHOLD {
        return 0.0;
    }
    let excess = (drive - FLASH_THRESHOLD) / (100.0 - FLASH_THRESHOLD);
    saturate(FLASH_CHANCE * powf(excess, 2.0))
}

/// Spatial weight of the flash at LED `index` of a strip with `length` LEDs
pub fn flash_mask(index: f32, length: f32) -> f32 {
    let last = (length - 1.0).max(0.0);
    smoothstep(last * (1.0 - FLASH_ZONE), last, index)
}

#[derive(Debug, Clone, Default)]
pub struct FlashState {
    intensity: f32,
    start_time: Option<Instant>,
    last_check: Option<Instant>,
}

impl FlashState {
    pub const fn new() -> Self {
        Self {
            intensity: 0.0,
            start_time: None,
            last_check: None,
        }
    }

    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    pub const fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Cancel the running flash
    pub fn clear(&mut self) {
        self.intensity = 0.0;
        self.start_time = None;
    }

    /// Roll on the next tick instead of waiting out the check window
    pub fn reset_check_timer(&mut self) {
        self.last_check = None;
    }

    /// Start a flash at full intensity
    pub fn trigger(&mut self, now: Instant) {
        self.intensity = 1.0;
        self.start_time = Some(now);

        #[cfg(feature = "esp32-log")]
        println!("[FlashState.trigger] flash at {}ms", now.as_millis());
    }

    /// Decay a running flash, or roll for a new one once per check interval
    ///
    /// Returns `true` when a flash was triggered on this tick.
    pub fn tick<R: Rng>(&mut self, n: f32, now: Instant, rng: &mut R) -> bool {
        if let Some(start) = self.start_time {
            let elapsed = now.saturating_duration_since(start).as_micros() as f32 / 1_000_000.0;
            self.intensity = expf(-FLASH_DECAY_RATE * elapsed);
            if self.intensity < FLASH_EPSILON {
                self.clear();
            }
            return false;
        }

        // An unarmed check window rolls right away
        if self
            .last_check
            .is_some_and(|last| now.saturating_duration_since(last) < FLASH_CHECK_INTERVAL)
        {
            return false;
        }
        self.last_check = Some(now);

        let chance = flash_probability(n);
        if chance > 0.0 && rng.gen_bool(f64::from(chance)) {
            self.trigger(now);
            return true;
        }
        false
    }

    /// Add the flash glow onto `leds` (saturating)
    pub fn render(&self, leds: &mut [Rgb]) {
        if !self.is_active() {
            return;
        }
        let length = leds.len() as f32;
        for (i, led) in leds.iter_mut().enumerate() {
            let weight = flash_mask(i as f32, length) * self.intensity;
            if weight <= 0.0 {
                continue;
            }
            *led = add_colors(*led, scale_color(FLASH_COLOR, unit8(weight)));
        }
    }
}
