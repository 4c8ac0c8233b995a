//! Periodic wave engine
//!
//! Waves travel along a circular domain of length [`PERIOD`]. Every wave
//! freezes its speed and shape at spawn time, so a control change only
//! affects waves spawned afterwards while the ones in flight finish as they
//! started.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::curve::{Easing, lerp, unit, wrap};

/// Length of the periodic domain
pub const PERIOD: f32 = 21.0;

/// Default number of simultaneously active waves
pub const MAX_WAVES: usize = 10;

/// Spawn interval at control value 0
pub const SLOW_INTERVAL_S: f32 = 2.4;

/// Spawn interval at control value 100
pub const FAST_INTERVAL_S: f32 = 0.6;

/// Below this control value no wave is spawned
pub const SPAWN_THRESHOLD: f32 = 1e-3;

// Shape of a wave at source values 0 and 100
const WIDTH_AT_MIN: f32 = 3.0;
const WIDTH_AT_MAX: f32 = 1.2;
const DEPTH_AT_MIN: f32 = 0.35;
const DEPTH_AT_MAX: f32 = 0.85;
const GAIN_AT_MIN: f32 = 4.0;
const GAIN_AT_MAX: f32 = 12.0;

/// Travel speed for a control value, in domain units per second
pub fn wave_speed(n: f32) -> f32 {
    unit(n) * 100.0 + 10.0
}

/// Time between wave spawns for a control value, in seconds
///
/// Non-increasing in `n` for any monotonic `easing`.
pub fn wave_interval(n: f32, easing: Easing) -> f32 {
    lerp(SLOW_INTERVAL_S, FAST_INTERVAL_S, easing(unit(n)))
}

/// Visual parameters derived from a wave's source control value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveShape {
    /// Gaussian sigma of the dark trough
    pub width: f32,
    /// Peak attenuation (0.0-1.0)
    pub depth: f32,
    /// Peak rebound brightness in brightness points
    pub gain: f32,
}

impl WaveShape {
    pub fn from_control(n: f32) -> Self {
        let t = unit(n);
        Self {
            width: lerp(WIDTH_AT_MIN, WIDTH_AT_MAX, t),
            depth: lerp(DEPTH_AT_MIN, DEPTH_AT_MAX, t),
            gain: lerp(GAIN_AT_MIN, GAIN_AT_MAX, t),
        }
    }
}

/// A single traveling wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    phase: f32,
    speed: f32,
    source: f32,
    shape: WaveShape,
}

impl Wave {
    /// Create a wave at phase 0 for the given control value
    pub fn new(source: f32) -> Self {
        Self {
            phase: 0.0,
            speed: wave_speed(source),
            source,
            shape: WaveShape::from_control(source),
        }
    }

    /// Position of the leading edge
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Control value the wave was spawned with
    pub const fn source(&self) -> f32 {
        self.source
    }

    pub const fn shape(&self) -> WaveShape {
        self.shape
    }

    /// A wave stays active until it has crossed the whole domain
    pub fn is_active(&self) -> bool {
        self.phase < PERIOD
    }
}

/// Spawns, advances and retires waves, and tracks the primary phase
#[derive(Debug, Clone)]
pub struct WaveEngine<const N: usize = MAX_WAVES> {
    waves: Vec<Wave, N>,
    phase: f32,
    last_spawn: Option<Instant>,
    easing: Easing,
}

impl<const N: usize> WaveEngine<N> {
    pub const fn new(easing: Easing) -> Self {
        Self {
            waves: Vec::new(),
            phase: 0.0,
            last_spawn: None,
            easing,
        }
    }

    /// Currently active waves, in no particular order
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn active_count(&self) -> usize {
        self.waves.len()
    }

    /// Position of the primary traveling reference, in `[0, PERIOD)`
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Time of the last spawn, `None` when the next tick may spawn right away
    pub const fn last_spawn(&self) -> Option<Instant> {
        self.last_spawn
    }

    /// Let the next tick spawn without waiting for the interval
    pub fn reset_spawn_timer(&mut self) {
        self.last_spawn = None;
    }

    /// Drop all waves and rewind the spawn timer
    pub fn clear(&mut self) {
        self.waves.clear();
        self.last_spawn = None;
    }

    /// Add a wave for control value `n`
    ///
    /// Returns `false` without touching the pool when it is full.
    pub fn spawn(&mut self, n: f32) -> bool {
        let wave = Wave::new(n);
        if self.waves.push(wave).is_err() {
            return false;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "WAVE_SPAWN n={} speed={} phase={}",
            wave.source(),
            wave.speed(),
            self.phase
        );

        true
    }

    /// Spawn when the interval for `n` has elapsed since the previous spawn
    ///
    /// The timer restarts even when the pool is full, so a saturated pool
    /// does not cause a burst of spawns once slots free up.
    pub fn maybe_spawn(&mut self, n: f32, now: Instant) -> bool {
        if n < SPAWN_THRESHOLD {
            return false;
        }
        if let Some(last) = self.last_spawn {
            let interval = seconds_to_duration(wave_interval(n, self.easing));
            if now.saturating_duration_since(last) < interval {
                return false;
            }
        }
        self.last_spawn = Some(now);
        self.spawn(n)
    }

    /// Move every wave and the primary phase forward by `dt` seconds
    ///
    /// `n` sets the speed of the primary phase; waves keep their own speed.
    pub fn advance(&mut self, n: f32, dt: f32) {
        self.phase = wrap(self.phase + wave_speed(n) * dt, PERIOD);

        for wave in &mut self.waves {
            wave.phase += wave.speed * dt;
        }
        self.retire();
    }

    /// Remove waves that crossed the domain
    fn retire(&mut self) {
        let mut i = 0;
        while i < self.waves.len() {
            if self.waves[i].is_active() {
                i += 1;
            } else {
                self.waves.swap_remove(i);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_to_duration(seconds: f32) -> Duration {
    Duration::from_micros((seconds.max(0.0) * 1_000_000.0) as u64)
}
