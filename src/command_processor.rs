//! Command processing module
//!
//! Applies queued commands to the control state and reports the side effects
//! the renderer has to carry out on its subsystems.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Channel, Receiver, Sender};
use crate::command::Command;
use crate::control::ControlState;

/// Side effects from processing commands that the renderer should apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEffects {
    /// New blackout state for the output
    pub blackout: Option<bool>,
    /// Pause state after a toggle
    pub paused: Option<bool>,
    /// Spawn and check timers must restart under the new control value
    pub reset_timers: bool,
    /// Waves, events, particles and flashes must be dropped
    pub clear: bool,
}

impl CommandEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.blackout.is_some() || self.paused.is_some() || self.reset_timers || self.clear
    }
}

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, Command, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, Command, SIZE>;

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<Command, SIZE>;

/// Drains the command channel into the control state
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Apply all pending commands (non-blocking)
    pub fn process_pending(&mut self, control: &mut ControlState, now: Instant) -> CommandEffects {
        let mut effects = CommandEffects::default();
        for command in self.commands.drain() {
            apply_command(control, command, now, &mut effects);
        }
        effects
    }
}

/// Apply one command to the control state, recording its side effects
pub fn apply_command(
    control: &mut ControlState,
    command: Command,
    now: Instant,
    effects: &mut CommandEffects,
) {
    #[cfg(feature = "esp32-log")]
    println!("[apply_command] {:?} at {}ms", command, now.as_millis());

    match command {
        Command::SetTarget(_) | Command::Retreat(_) => {
            if let Some(target) = command.target() {
                control.set_target(target, now);
            }
            effects.reset_timers = true;
            effects.blackout = Some(false);
        }
        Command::TogglePause => {
            effects.paused = Some(control.toggle_pause(now));
        }
        Command::Quit => {
            control.reset(now);
            effects.paused = Some(false);
            effects.reset_timers = true;
            effects.clear = true;
            effects.blackout = Some(true);
        }
    }
}
