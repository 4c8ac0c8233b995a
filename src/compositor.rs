//! Layered brightness compositor
//!
//! Brightness at a point of the periodic domain is built from five layers:
//!
//! 1. base brightness mapped from the control value
//! 2. dark-wave attenuation (strongest wave wins)
//! 3. rebound bump trailing each wave (strongest wave wins)
//! 4. turbulence noise
//! 5. event darkening
//!
//! and composed as `base * (1 - dark) + rebound + turbulence + event`,
//! clamped to `[0, 100]`.

use embassy_time::Instant;

use crate::{
    curve::{ValueMapper, cyclic_distance, function_b, gaussian, lerp, trailing_distance, unit},
    event::EventState,
    noise::turbulence,
    wave::{PERIOD, Wave},
};

/// Distance behind the leading edge where the rebound peaks
pub const REBOUND_OFFSET: f32 = 2.5;

/// How far past the offset the rebound may still contribute
pub const REBOUND_WINDOW: f32 = 2.0;

const REBOUND_SIGMA: f32 = 1.0;

/// Turbulence amplitude at control value 100, in brightness points
pub const TURBULENCE_AMPLITUDE: f32 = 6.0;

const TURBULENCE_FREQUENCY: f32 = 0.45;
const TURBULENCE_RATE: f32 = 0.8;

/// Per-layer values at one position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerSample {
    pub base: f32,
    pub dark: f32,
    pub rebound: f32,
    pub turbulence: f32,
    pub event: f32,
}

impl LayerSample {
    /// Final brightness (0-100)
    pub fn brightness(&self) -> f32 {
        let value =
            self.base * (1.0 - self.dark) + self.rebound + self.turbulence + self.event;
        if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
    }
}

/// Strongest dark-wave attenuation at `position` (0.0-1.0)
pub fn dark_wave(position: f32, waves: &[Wave]) -> f32 {
    waves
        .iter()
        .map(|wave| {
            let shape = wave.shape();
            let distance = cyclic_distance(position, wave.phase(), PERIOD);
            shape.depth * gaussian(distance, shape.width)
        })
        .fold(0.0, f32::max)
}

/// Strongest rebound bump at `position`, in brightness points
pub fn rebound(position: f32, waves: &[Wave]) -> f32 {
    waves
        .iter()
        .map(|wave| {
            let behind = trailing_distance(wave.phase(), position, PERIOD);
            if behind > REBOUND_OFFSET + REBOUND_WINDOW {
                return 0.0;
            }
            wave.shape().gain * gaussian(behind - REBOUND_OFFSET, REBOUND_SIGMA)
        })
        .fold(0.0, f32::max)
}

/// Combines the layers for a wave group
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    base_mapping: ValueMapper,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(function_b)
    }
}

impl Compositor {
    pub const fn new(base_mapping: ValueMapper) -> Self {
        Self { base_mapping }
    }

    /// Base brightness for control value `n`
    pub fn base(&self, n: f32) -> f32 {
        (self.base_mapping)(n)
    }

    /// Evaluate every layer at `position`
    pub fn sample(
        &self,
        position: f32,
        n: f32,
        waves: &[Wave],
        event: &EventState,
        now: Instant,
    ) -> LayerSample {
        let amplitude = lerp(0.0, TURBULENCE_AMPLITUDE, unit(n));
        LayerSample {
            base: self.base(n),
            dark: dark_wave(position, waves),
            rebound: rebound(position, waves),
            turbulence: amplitude
                * turbulence(position, TURBULENCE_FREQUENCY, now, TURBULENCE_RATE),
            event: event.contribution(position),
        }
    }

    /// Final brightness at `position`
    pub fn brightness(
        &self,
        position: f32,
        n: f32,
        waves: &[Wave],
        event: &EventState,
        now: Instant,
    ) -> f32 {
        self.sample(position, n, waves, event, now).brightness()
    }
}
