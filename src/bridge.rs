//! Bridge strips: gradient base with particle flow and flashes
//!
//! A bridge strip does not take part in the wave domain. It renders its own
//! palette gradient, scaled by the control value, and adds particle glow and
//! the occasional flash on top.

use embassy_time::Instant;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    bounds::{StripBounds, bounded},
    color::{Palette, Rgb, sample_palette, scale_color},
    curve::{ValueMapper, function_b},
    flash::FlashState,
    hex_palette,
    math8::unit8,
    particle::{MAX_PARTICLES, ParticleFlow, glow_amplitude},
};

#[allow(clippy::unreadable_literal)]
static DEFAULT_PALETTE: [Rgb; 3] = hex_palette![
    0x0A1A6E, // Deep blue
    0x119C9A, // Teal
    0x9EEBFF  // Pale cyan
];

/// Configuration of one bridge strip
#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    /// Gradient from the origin (index 0) to the far end
    pub palette: Palette,
    /// Control value to base brightness
    pub base_mapping: ValueMapper,
    /// Seed for particle and flash randomness
    pub seed: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            palette: &DEFAULT_PALETTE,
            base_mapping: function_b,
            seed: 0xB81D_6E00,
        }
    }
}

/// One bridge strip with its own particles and flash state
#[derive(Debug, Clone)]
pub struct BridgeStrip<const PARTICLES: usize = MAX_PARTICLES> {
    bounds: StripBounds,
    palette: Palette,
    base_mapping: ValueMapper,
    particles: ParticleFlow<PARTICLES>,
    flash: FlashState,
    rng: SmallRng,
}

impl<const PARTICLES: usize> BridgeStrip<PARTICLES> {
    pub fn new(bounds: StripBounds, config: &BridgeConfig) -> Self {
        Self {
            bounds,
            palette: config.palette,
            base_mapping: config.base_mapping,
            particles: ParticleFlow::new(bounds.len),
            flash: FlashState::new(),
            rng: SmallRng::seed_from_u64(config.seed ^ u64::from(bounds.start)),
        }
    }

    pub const fn bounds(&self) -> StripBounds {
        self.bounds
    }

    pub const fn particles(&self) -> &ParticleFlow<PARTICLES> {
        &self.particles
    }

    pub const fn particles_mut(&mut self) -> &mut ParticleFlow<PARTICLES> {
        &mut self.particles
    }

    pub const fn flash(&self) -> &FlashState {
        &self.flash
    }

    pub const fn flash_mut(&mut self) -> &mut FlashState {
        &mut self.flash
    }

    /// Gradient color at a fractional LED position, before brightness
    pub fn gradient_at(&self, position: f32) -> Rgb {
        let last = (f32::from(self.bounds.len) - 1.0).max(1.0);
        sample_palette(self.palette, unit8(position / last))
    }

    /// Forget spawn and check timing so the next tick reacts to a new control value
    pub fn reset_timers(&mut self) {
        self.particles.reset_spawn_timer();
        self.flash.reset_check_timer();
    }

    /// Drop particles and any running flash
    pub fn clear(&mut self) {
        self.particles.clear();
        self.flash.clear();
    }

    /// Advance particles and flash by `dt` seconds
    pub fn tick(&mut self, n: f32, dt: f32, now: Instant) {
        self.particles.tick(n, dt, &mut self.rng);
        self.flash.tick(n, now, &mut self.rng);
    }

    /// Write the strip into the frame buffer
    pub fn render(&self, frame: &mut [Rgb], n: f32) {
        let Some(leds) = bounded(frame, self.bounds) else {
            return;
        };

        let level = unit8((self.base_mapping)(n) / 100.0);
        for (i, led) in leds.iter_mut().enumerate() {
            *led = scale_color(self.gradient_at(i as f32), level);
        }

        self.particles
            .render(leds, glow_amplitude(n), |position| self.gradient_at(position));
        self.flash.render(leds);
    }
}
