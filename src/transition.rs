use embassy_time::{Duration, Instant};

use crate::curve::lerp;

/// Blends two values of type `T` using a progress value (0.0-1.0)
pub type ValueBlender<T> = fn(T, T, f32) -> T;

/// Linear ramp between two values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy + PartialEq> {
    /// Blender function
    blend: ValueBlender<T>,
    /// Current interpolated value
    current: T,
    /// Value at the start of transition
    source: T,
    /// Target value (None if no transition in progress)
    target: Option<T>,
    /// Total transition duration
    duration: Duration,
    /// Time at which the transition started
    start_time: Instant,
    /// Set while the ramp is held in place
    frozen_at: Option<Instant>,
}

impl<T: Copy + PartialEq> ValueTransition<T> {
    /// Create a new value transition
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
            frozen_at: None,
        }
    }

    /// Get current value
    pub const fn current(&self) -> T {
        self.current
    }

    /// Value the ramp is heading to, or the current value when idle
    pub fn target(&self) -> T {
        self.target.unwrap_or(self.current)
    }

    /// Value the running ramp started from
    pub const fn source(&self) -> T {
        self.source
    }

    /// Check if a transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Check if the ramp is held by [`Self::freeze`]
    pub const fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Set value for transition
    ///
    /// The ramp restarts from the value reached at `now`, so retargeting
    /// mid-transition never jumps. Retargeting to the value already being
    /// ramped to keeps the running ramp.
    pub fn set(&mut self, value: T, duration: Duration, now: Instant) {
        if self.target.unwrap_or(self.current) == value {
            return;
        }
        self.tick(now);

        if duration.as_ticks() == 0 {
            self.snap(value);
            return;
        }

        self.start_time = now;
        self.source = self.current;
        self.target = Some(value);
        self.duration = duration;
        if self.frozen_at.is_some() {
            // Frozen time is measured from the new anchor
            self.frozen_at = Some(now);
        }
    }

    /// Jump to `value` immediately, cancelling any ramp
    pub fn snap(&mut self, value: T) {
        self.current = value;
        self.source = value;
        self.target = None;
        self.duration = Duration::from_millis(0);
    }

    /// Hold the current value until [`Self::thaw`]
    pub fn freeze(&mut self, now: Instant) {
        if self.frozen_at.is_some() {
            return;
        }
        self.tick(now);
        self.frozen_at = Some(now);
    }

    /// Resume a held ramp where it stopped
    pub fn thaw(&mut self, now: Instant) {
        let Some(frozen_at) = self.frozen_at.take() else {
            return;
        };
        self.start_time += now.saturating_duration_since(frozen_at);
    }

    /// Update transition state
    ///
    /// Call this once per frame with the current simulation time.
    pub fn tick(&mut self, now: Instant) {
        if self.frozen_at.is_some() {
            return;
        }
        let Some(target) = self.target else {
            return;
        };

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return;
        }

        let progress = elapsed.as_ticks() as f32 / self.duration.as_ticks() as f32;
        self.current = (self.blend)(self.source, target, progress);
    }
}

impl ValueTransition<f32> {
    /// Create a new scalar transition
    pub const fn new_f32(initial: f32) -> Self {
        Self::new(initial, lerp)
    }
}
