//! Wave group: strips sharing one periodic domain
//!
//! Every strip of a group owns a logical position on the domain. The
//! compositor evaluates brightness at that position and the strip's middle
//! zone shows it; both end zones run a sparse accent pattern.

use embassy_time::Instant;
use heapless::Vec;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    bounds::{StripBounds, bounded},
    color::{BLACK, Rgb, rgb_from_u32, scale_color},
    compositor::{Compositor, LayerSample},
    curve::{Easing, ValueMapper, ease_cubic, function_a, function_b, smoothstep, wrap},
    event::EventState,
    math8::unit8,
    wave::{MAX_WAVES, PERIOD, WaveEngine},
};

/// Default number of strips in a group
pub const MAX_GROUP_STRIPS: usize = 16;

/// One LED out of this many is lit in the accent zones
pub const ACCENT_STRIDE: usize = 3;

/// Largest displacement of the edge strips towards the seam
pub const STRETCH_TRAVEL: f32 = 0.9;

/// How the first and last strip of a group react to the control value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndpointStretch {
    /// Edge strips keep their position
    Fixed,
    /// Edge strips slide towards the seam as the control value rises
    Eased,
}

impl EndpointStretch {
    /// Displacement of an edge strip for control value `n`
    pub fn offset(self, n: f32) -> f32 {
        match self {
            Self::Fixed => 0.0,
            Self::Eased => STRETCH_TRAVEL * smoothstep(0.0, 100.0, n),
        }
    }
}

/// Configuration of a wave group
#[derive(Debug, Clone, Copy)]
pub struct GroupConfig {
    /// Color of a fully lit LED
    pub color: Rgb,
    /// Control value to base brightness
    pub base_mapping: ValueMapper,
    /// Control value to accent brightness
    pub accent_mapping: ValueMapper,
    /// Easing of the wave spawn interval
    pub cadence: Easing,
    pub stretch: EndpointStretch,
    /// Seed for event rolls
    pub seed: u64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            color: rgb_from_u32(0x00FF_B878),
            base_mapping: function_b,
            accent_mapping: function_a,
            cadence: ease_cubic,
            stretch: EndpointStretch::Eased,
            seed: 0x71DE_5EED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStrip {
    pub bounds: StripBounds,
    position: f32,
    pinned: bool,
}

impl GroupStrip {
    /// Resting position on the periodic domain
    pub const fn position(&self) -> f32 {
        self.position
    }
}

/// Strips, waves and events of one independently rendered group
#[derive(Debug, Clone)]
pub struct WaveGroup<const STRIPS: usize = MAX_GROUP_STRIPS, const WAVES: usize = MAX_WAVES> {
    strips: Vec<GroupStrip, STRIPS>,
    engine: WaveEngine<WAVES>,
    event: EventState,
    compositor: Compositor,
    accent_mapping: ValueMapper,
    color: Rgb,
    stretch: EndpointStretch,
    rng: SmallRng,
}

impl<const STRIPS: usize, const WAVES: usize> WaveGroup<STRIPS, WAVES> {
    pub fn new(config: &GroupConfig) -> Self {
        Self {
            strips: Vec::new(),
            engine: WaveEngine::new(config.cadence),
            event: EventState::new(),
            compositor: Compositor::new(config.base_mapping),
            accent_mapping: config.accent_mapping,
            color: config.color,
            stretch: config.stretch,
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    pub fn strips(&self) -> &[GroupStrip] {
        &self.strips
    }

    pub const fn engine(&self) -> &WaveEngine<WAVES> {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut WaveEngine<WAVES> {
        &mut self.engine
    }

    pub const fn event(&self) -> &EventState {
        &self.event
    }

    /// Add a strip; strips added this way are spread evenly over the domain
    ///
    /// Returns the bounds back when the group is full.
    pub fn add_strip(&mut self, bounds: StripBounds) -> Result<(), StripBounds> {
        self.strips
            .push(GroupStrip {
                bounds,
                position: 0.0,
                pinned: false,
            })
            .map_err(|strip| strip.bounds)?;
        self.distribute();
        Ok(())
    }

    /// Add a strip at an explicit domain position
    pub fn add_strip_at(&mut self, bounds: StripBounds, position: f32) -> Result<(), StripBounds> {
        self.strips
            .push(GroupStrip {
                bounds,
                position: wrap(position, PERIOD),
                pinned: true,
            })
            .map_err(|strip| strip.bounds)
    }

    fn distribute(&mut self) {
        let count = self.strips.len() as f32;
        for (i, strip) in self.strips.iter_mut().enumerate() {
            if !strip.pinned {
                strip.position = (i as f32 + 1.0) * PERIOD / (count + 1.0);
            }
        }
    }

    /// Domain position of strip `index` for control value `n`
    ///
    /// The first and last strip are pushed towards the seam by the
    /// configured endpoint stretch.
    pub fn logical_position(&self, index: usize, n: f32) -> Option<f32> {
        let strip = self.strips.get(index)?;
        let last = self.strips.len() - 1;
        let offset = self.stretch.offset(n);
        let position = if last == 0 {
            strip.position
        } else if index == 0 {
            (strip.position - offset).max(0.0)
        } else if index == last {
            (strip.position + offset).min(PERIOD)
        } else {
            strip.position
        };
        Some(position)
    }

    /// Forget spawn timing so the next tick reacts to a new control value
    pub fn reset_timers(&mut self) {
        self.engine.reset_spawn_timer();
    }

    /// Drop all waves and any running event
    pub fn clear(&mut self) {
        self.engine.clear();
        self.event.clear();
    }

    /// Advance waves and events by `dt` seconds
    pub fn tick(&mut self, n: f32, dt: f32, now: Instant) {
        self.engine.advance(n, dt);
        self.engine.maybe_spawn(n, now);
        self.event.tick(n, dt, now, &mut self.rng);
    }

    /// All layer values of strip `index`
    pub fn sample(&self, index: usize, n: f32, now: Instant) -> Option<LayerSample> {
        let position = self.logical_position(index, n)?;
        Some(
            self.compositor
                .sample(position, n, self.engine.waves(), &self.event, now),
        )
    }

    /// Final brightness (0-100) of strip `index`
    pub fn brightness(&self, index: usize, n: f32, now: Instant) -> Option<f32> {
        self.sample(index, n, now).map(|sample| sample.brightness())
    }

    /// Write every strip of the group into the frame buffer
    pub fn render(&self, frame: &mut [Rgb], n: f32, now: Instant) {
        let accent = scale_color(self.color, unit8((self.accent_mapping)(n) / 100.0));

        for (index, strip) in self.strips.iter().enumerate() {
            let Some(brightness) = self.brightness(index, n, now) else {
                continue;
            };
            let Some(leds) = bounded(frame, strip.bounds) else {
                continue;
            };
            let body = scale_color(self.color, unit8(brightness / 100.0));
            let (head, middle, _) = strip.bounds.zones();

            let (head_leds, rest) = leds.split_at_mut(head);
            let (middle_leds, tail_leds) = rest.split_at_mut(middle);

            for (i, led) in head_leds.iter_mut().enumerate() {
                *led = if i % ACCENT_STRIDE == 0 { accent } else { BLACK };
            }
            middle_leds.fill(body);
            // Mirror the head so the outermost LED is lit on both ends
            for (i, led) in tail_leds.iter_mut().rev().enumerate() {
                *led = if i % ACCENT_STRIDE == 0 { accent } else { BLACK };
            }
        }
    }
}
