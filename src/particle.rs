//! Particle flow along a bridge strip
//!
//! Particles are born at LED 0, drift towards the far end and speed up in
//! the final stretch, leaving a glowing trail. They are removed, not faded,
//! once they run off the strip.

use heapless::Vec;
use libm::{expf, powf};
use rand::Rng;

use crate::{
    color::{Rgb, add_colors, shift_hue},
    curve::{lerp, smoothstep, unit},
    math8::unit8,
};

/// Default particle pool size per strip
pub const MAX_PARTICLES: usize = 24;

/// Spawns per second at control value 100
pub const MAX_SPAWN_RATE: f32 = 14.0;

/// Exponent of the spawn rate curve
pub const SPAWN_EXPONENT: f32 = 1.6;

/// Fraction of the strip (at the far end) where particles accelerate
pub const ACCEL_ZONE: f32 = 0.35;

/// Speed multiplier reached at the end of the strip
pub const ACCEL_PEAK: f32 = 2.6;

const SPEED_AT_MIN: f32 = 6.0;
const SPEED_AT_MAX: f32 = 28.0;

const TRAIL_BEHIND: f32 = 4.0;
const TRAIL_AHEAD: f32 = 1.2;

// Beyond this many falloff lengths a particle contributes nothing visible
const GLOW_CUTOFF: f32 = 5.0;

const HUE_JITTER: i8 = 12;

/// Spawns per second for control value `n`
pub fn spawn_rate(n: f32) -> f32 {
    MAX_SPAWN_RATE * powf(unit(n), SPAWN_EXPONENT)
}

/// Speed before acceleration, in LEDs per second
pub fn base_speed(n: f32) -> f32 {
    lerp(SPEED_AT_MIN, SPEED_AT_MAX, unit(n))
}

/// Speed multiplier at `position` on a strip of `length` LEDs
pub fn acceleration(position: f32, length: f32) -> f32 {
    let zone_start = length * (1.0 - ACCEL_ZONE);
    1.0 + (ACCEL_PEAK - 1.0) * smoothstep(zone_start, length, position)
}

/// Brightness factor of a particle's glow at signed offset `offset`
///
/// `offset` is `led - particle`, so negative values are behind the particle.
pub fn glow_falloff(offset: f32) -> f32 {
    if offset >= 0.0 {
        expf(-offset / TRAIL_AHEAD)
    } else {
        expf(offset / TRAIL_BEHIND)
    }
}

/// Overall glow strength for control value `n`
pub fn glow_amplitude(n: f32) -> f32 {
    lerp(0.35, 1.0, unit(n))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: f32,
    energy: f32,
    hue_shift: i8,
}

impl Particle {
    pub const fn new(energy: f32, hue_shift: i8) -> Self {
        Self {
            position: 0.0,
            energy,
            hue_shift,
        }
    }

    /// LED index (fractional) of the particle
    pub const fn position(&self) -> f32 {
        self.position
    }

    pub const fn energy(&self) -> f32 {
        self.energy
    }

    pub const fn hue_shift(&self) -> i8 {
        self.hue_shift
    }
}

/// Fixed-capacity particle system for one strip
#[derive(Debug, Clone)]
pub struct ParticleFlow<const N: usize = MAX_PARTICLES> {
    particles: Vec<Particle, N>,
    length: f32,
    spawn_budget: f32,
}

impl<const N: usize> ParticleFlow<N> {
    /// Create an empty flow for a strip of `length` LEDs
    pub fn new(length: u16) -> Self {
        Self {
            particles: Vec::new(),
            length: f32::from(length),
            spawn_budget: 0.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle and forget fractional spawns
    pub fn clear(&mut self) {
        self.particles.clear();
        self.spawn_budget = 0.0;
    }

    /// Make the next tick spawn a particle under the new control value
    pub fn reset_spawn_timer(&mut self) {
        self.spawn_budget = self.spawn_budget.max(1.0);
    }

    /// Add a particle at the origin
    ///
    /// Returns `false` when the pool is full; the request is dropped.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        self.particles.push(particle).is_ok()
    }

    /// Advance particles, retire the ones past the end and spawn new ones
    pub fn tick<R: Rng>(&mut self, n: f32, dt: f32, rng: &mut R) {
        if unit(n) <= 0.0 {
            self.clear();
            return;
        }

        let speed = base_speed(n);
        for particle in &mut self.particles {
            particle.position += speed * acceleration(particle.position, self.length) * dt;
        }

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].position > self.length {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }

        self.spawn_budget += spawn_rate(n) * dt.max(0.0);
        while self.spawn_budget >= 1.0 {
            self.spawn_budget -= 1.0;
            let energy = rng.gen_range(0.5..1.0);
            let hue_shift = rng.gen_range(-HUE_JITTER..=HUE_JITTER);
            self.spawn(Particle::new(energy, hue_shift));
        }
    }

    /// Add every particle's glow onto `leds` (saturating)
    ///
    /// `color_at` gives the base gradient color at a fractional LED position.
    pub fn render<F>(&self, leds: &mut [Rgb], amplitude: f32, color_at: F)
    where
        F: Fn(f32) -> Rgb,
    {
        if self.particles.is_empty() || amplitude <= 0.0 {
            return;
        }

        for (i, led) in leds.iter_mut().enumerate() {
            let x = i as f32;
            let mut sum = [0.0f32; 3];
            for particle in &self.particles {
                let offset = x - particle.position;
                if offset > TRAIL_AHEAD * GLOW_CUTOFF || offset < -TRAIL_BEHIND * GLOW_CUTOFF {
                    continue;
                }
                let weight = glow_falloff(offset) * particle.energy * amplitude;
                let color = shift_hue(color_at(particle.position), particle.hue_shift);
                sum[0] += f32::from(color.r) * weight;
                sum[1] += f32::from(color.g) * weight;
                sum[2] += f32::from(color.b) * weight;
            }
            let glow = Rgb::new(
                unit8(sum[0] / 255.0),
                unit8(sum[1] / 255.0),
                unit8(sum[2] / 255.0),
            );
            *led = add_colors(*led, glow);
        }
    }
}
