use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::StripBounds;
use crate::bridge::{BridgeConfig, BridgeStrip};
use crate::color::{BLACK, Rgb};
use crate::command::Command;
use crate::command_processor::{CommandEffects, CommandProcessor, CommandReceiver, apply_command};
use crate::control::{CONTROL_RAMP_DURATION, ControlState};
use crate::group::{GroupConfig, WaveGroup};

/// Default number of bridge strips
pub const MAX_BRIDGES: usize = 4;

/// Delta substituted for a stalled frame
pub const NOMINAL_FRAME_DELTA: Duration = Duration::from_millis(16);

/// Longest wall-clock delta accepted as-is
pub const MAX_FRAME_DELTA: Duration = Duration::from_secs(1);

/// Which subsystems stop while paused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseScope {
    /// Only the wave domain and the control ramp stop; bridges keep flowing
    WavesOnly,
    /// Bridges stop as well
    Everything,
}

/// Configuration for the renderer
#[derive(Debug, Clone, Copy)]
pub struct ComposerConfig {
    pub group: GroupConfig,
    /// Used for every bridge added with [`Renderer::add_bridge`]
    pub bridge: BridgeConfig,
    pub pause_scope: PauseScope,
    /// Duration of a control value ramp
    pub ramp: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            group: GroupConfig::default(),
            bridge: BridgeConfig::default(),
            pause_scope: PauseScope::WavesOnly,
            ramp: CONTROL_RAMP_DURATION,
        }
    }
}

/// Replace implausibly long frame deltas with the nominal frame time
pub fn clamp_frame_delta(delta: Duration) -> Duration {
    if delta > MAX_FRAME_DELTA {
        NOMINAL_FRAME_DELTA
    } else {
        delta
    }
}

fn seconds(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}

/// Renderer - drives every subsystem and owns the frame buffer
pub struct Renderer<'a, const MAX_LEDS: usize, const CHANNEL_SIZE: usize, const BRIDGES: usize = MAX_BRIDGES> {
    // External dependencies and configuration
    commands: CommandProcessor<'a, CHANNEL_SIZE>,
    pause_scope: PauseScope,
    bridge_config: BridgeConfig,

    // Internal state
    control: ControlState,
    group: WaveGroup,
    bridges: Vec<BridgeStrip, BRIDGES>,
    clock: Instant,
    last_frame: Option<Instant>,
    blackout: bool,
    frame_buffer: [Rgb; MAX_LEDS],
}

impl<'a, const MAX_LEDS: usize, const CHANNEL_SIZE: usize, const BRIDGES: usize>
    Renderer<'a, MAX_LEDS, CHANNEL_SIZE, BRIDGES>
{
    pub fn new(commands: CommandReceiver<'a, CHANNEL_SIZE>, config: &ComposerConfig) -> Self {
        Self {
            commands: CommandProcessor::new(commands),
            pause_scope: config.pause_scope,
            bridge_config: config.bridge,
            control: ControlState::new(config.ramp),
            group: WaveGroup::new(&config.group),
            bridges: Vec::new(),
            clock: Instant::from_millis(0),
            last_frame: None,
            blackout: false,
            frame_buffer: [BLACK; MAX_LEDS],
        }
    }

    /// Add a strip to the wave group
    pub fn add_group_strip(&mut self, bounds: StripBounds) -> Result<(), StripBounds> {
        self.group.add_strip(bounds)
    }

    /// Add a bridge strip using the configured bridge settings
    pub fn add_bridge(&mut self, bounds: StripBounds) -> Result<(), StripBounds> {
        self.bridges
            .push(BridgeStrip::new(bounds, &self.bridge_config))
            .map_err(|bridge| bridge.bounds())
    }

    pub const fn control(&self) -> &ControlState {
        &self.control
    }

    pub const fn group(&self) -> &WaveGroup {
        &self.group
    }

    pub const fn group_mut(&mut self) -> &mut WaveGroup {
        &mut self.group
    }

    pub fn bridges(&self) -> &[BridgeStrip] {
        &self.bridges
    }

    pub fn bridges_mut(&mut self) -> &mut [BridgeStrip] {
        &mut self.bridges
    }

    /// Simulation time
    pub const fn clock(&self) -> Instant {
        self.clock
    }

    /// Whether the output is forced dark after a quit command
    pub const fn is_blackout(&self) -> bool {
        self.blackout
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }

    /// Apply a command right away, bypassing the channel
    pub fn apply(&mut self, command: Command) {
        let mut effects = CommandEffects::default();
        apply_command(&mut self.control, command, self.clock, &mut effects);
        self.apply_effects(&effects);
    }

    /// Process one frame at wall-clock time `now`
    ///
    /// The first call only establishes the time base. Gaps longer than
    /// [`MAX_FRAME_DELTA`] advance the simulation by [`NOMINAL_FRAME_DELTA`].
    pub fn render(&mut self, now: Instant) -> &[Rgb] {
        let delta = self
            .last_frame
            .map(|last| clamp_frame_delta(now.saturating_duration_since(last)))
            .unwrap_or(Duration::from_millis(0));
        self.last_frame = Some(now);
        self.step(delta)
    }

    /// Advance the simulation by `delta` and render a frame
    ///
    /// `delta` is used as given; this is the deterministic entry point.
    pub fn step(&mut self, delta: Duration) -> &[Rgb] {
        self.clock += delta;
        let now = self.clock;
        let dt = seconds(delta);

        self.process_commands(now);
        self.control.tick(now);
        let n = self.control.current();

        let paused = self.control.is_paused();
        if !paused {
            self.group.tick(n, dt, now);
        }
        if !paused || self.pause_scope == PauseScope::WavesOnly {
            for bridge in &mut self.bridges {
                bridge.tick(n, dt, now);
            }
        }

        self.frame_buffer.fill(BLACK);
        if !self.blackout {
            self.group.render(&mut self.frame_buffer, n, now);
            for bridge in &self.bridges {
                bridge.render(&mut self.frame_buffer, n);
            }
        }

        &self.frame_buffer
    }

    /// Process pending commands from the channel (non-blocking)
    fn process_commands(&mut self, now: Instant) {
        let effects = self.commands.process_pending(&mut self.control, now);
        self.apply_effects(&effects);
    }

    /// Apply side effects from command processing
    fn apply_effects(&mut self, effects: &CommandEffects) {
        if !effects.has_effects() {
            return;
        }

        if effects.clear {
            self.group.clear();
            for bridge in &mut self.bridges {
                bridge.clear();
            }
        }

        if effects.reset_timers {
            self.group.reset_timers();
            for bridge in &mut self.bridges {
                bridge.reset_timers();
            }
        }

        if let Some(blackout) = effects.blackout {
            self.blackout = blackout;
        }

        #[cfg(feature = "esp32-log")]
        if let Some(paused) = effects.paused {
            println!("[Renderer] paused={}", paused);
        }
    }
}
