#![no_std]

pub mod bounds;
pub mod bridge;
pub mod channel;
pub mod color;
pub mod command;
pub mod command_processor;
pub mod compositor;
pub mod control;
pub mod curve;
pub mod event;
pub mod flash;
pub mod frame_scheduler;
pub mod group;
pub mod math8;
pub mod noise;
pub mod particle;
pub mod renderer;
pub mod transition;
pub mod wave;

pub use bounds::StripBounds;
pub use bridge::{BridgeConfig, BridgeStrip};
pub use command::{Command, CommandError};
pub use command_processor::{
    CommandChannel, CommandEffects, CommandProcessor, CommandReceiver, CommandSender,
};
pub use control::ControlState;
pub use frame_scheduler::FrameScheduler;
pub use group::{EndpointStretch, GroupConfig, WaveGroup};
pub use renderer::{ComposerConfig, PauseScope, Renderer};
pub use wave::{PERIOD, Wave, WaveEngine};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strips
    fn write(&mut self, colors: &[Rgb]);
}
