//! Desktop preview app for tidal-composer
//!
//! Renders a wave group and its bridges in a window. Commands typed into the
//! command line use the same text protocol as the hardware controller.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use tidal_composer::{
    Command, CommandChannel, CommandSender, ComposerConfig, Instant, PauseScope, Renderer, Rgb,
    StripBounds,
};

/// Maximum number of LEDs the renderer supports
const MAX_LEDS: usize = 180;

/// LEDs per wave group strip
const GROUP_STRIP_LEN: u16 = 30;

/// Number of strips in the wave group
const GROUP_STRIPS: u16 = 3;

/// LEDs per bridge strip
const BRIDGE_LEN: u16 = 45;

/// Number of bridge strips
const BRIDGES: u16 = 2;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Command channel size
const COMMAND_CHANNEL_SIZE: usize = 16;

/// Static command channel for communication between UI and renderer
static COMMANDS_CHANNEL: CommandChannel<COMMAND_CHANNEL_SIZE> =
    CommandChannel::<COMMAND_CHANNEL_SIZE>::new();

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 420.0])
            .with_title("Tidal Composer Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "tidal-composer-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    renderer: Renderer<'static, MAX_LEDS, COMMAND_CHANNEL_SIZE>,
    command_sender: CommandSender<'static, COMMAND_CHANNEL_SIZE>,

    /// Wall-clock reference for the renderer
    started: StdInstant,
    /// Pending command line text
    command_line: String,
    /// Result of the last submitted command
    status: String,
    /// Target picked with the slider
    target: f32,
    /// LED pixel size for display
    led_size: f32,
}

impl PreviewApp {
    fn new() -> Self {
        let config = ComposerConfig {
            pause_scope: PauseScope::WavesOnly,
            ..ComposerConfig::default()
        };
        let mut renderer = Renderer::<MAX_LEDS, COMMAND_CHANNEL_SIZE>::new(
            COMMANDS_CHANNEL.receiver(),
            &config,
        );

        let mut bounds = StripBounds::new(0, GROUP_STRIP_LEN);
        for _ in 0..GROUP_STRIPS {
            let _ = renderer.add_group_strip(bounds);
            bounds = bounds.next(GROUP_STRIP_LEN);
        }
        let mut bounds = StripBounds::new(bounds.start, BRIDGE_LEN);
        for _ in 0..BRIDGES {
            let _ = renderer.add_bridge(bounds);
            bounds = bounds.next(BRIDGE_LEN);
        }

        Self {
            renderer,
            command_sender: COMMANDS_CHANNEL.sender(),
            started: StdInstant::now(),
            command_line: String::new(),
            status: String::from("type f,<0-100>, b,<0-100>, s or q"),
            target: 0.0,
            led_size: LED_SIZE,
        }
    }

    fn send(&mut self, command: Command) {
        self.status = match self.command_sender.try_send(command) {
            Ok(()) => format!("sent {command:?}"),
            Err(_) => String::from("command queue full"),
        };
    }

    fn submit_line(&mut self) {
        match Command::parse(&self.command_line) {
            Ok(command) => {
                if let Some(target) = command.target() {
                    self.target = target;
                }
                self.send(command);
                self.command_line.clear();
            }
            Err(err) => self.status = format!("error: {err}"),
        }
    }

    fn now(&self) -> Instant {
        #[allow(clippy::cast_possible_truncation)]
        Instant::from_micros(self.started.elapsed().as_micros() as u64)
    }

    fn paint_strip(&self, ui: &mut egui::Ui, label: &str, leds: &[Rgb]) {
        ui.horizontal(|ui| {
            ui.add_sized([70.0, self.led_size], egui::Label::new(label));
            let pitch = self.led_size + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let width = leds.len() as f32 * pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, self.led_size), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in leds.iter().enumerate() {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(origin.x + i as f32 * pitch, origin.y),
                    egui::vec2(self.led_size, self.led_size),
                );
                painter.rect_filled(rect, 3.0, egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b));
            }
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now();
        let frame = self.renderer.render(now).to_vec();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            // <Commands>
            ui.horizontal(|ui| {
                ui.label("Command:");
                let response = ui.text_edit_singleline(&mut self.command_line);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.submit_line();
                    response.request_focus();
                }
                ui.label(&self.status);
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Target:");
                let slider = ui.add(egui::Slider::new(&mut self.target, 0.0..=100.0));
                if slider.drag_stopped() {
                    self.send(Command::SetTarget(self.target));
                }

                let paused = self.renderer.control().is_paused();
                if ui.button(if paused { "▶ Resume" } else { "⏸ Pause" }).clicked() {
                    self.send(Command::TogglePause);
                }
                if ui.button("⏹ Quit").clicked() {
                    self.target = 0.0;
                    self.send(Command::Quit);
                }
            });
            // </Commands>

            ui.add_space(4.0);

            // <State>
            let control = self.renderer.control();
            let engine = self.renderer.group().engine();
            ui.label(format!(
                "n={:.1} target={:.1} waves={} phase={:.2}{}{}",
                control.current(),
                control.target(),
                engine.active_count(),
                engine.phase(),
                if control.is_paused() { " [paused]" } else { "" },
                if self.renderer.is_blackout() { " [blackout]" } else { "" },
            ));
            // </State>

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Size: ");
                ui.add(egui::Slider::new(&mut self.led_size, 4.0..=24.0));
            });

            ui.add_space(16.0);

            // === LED Display ===
            for (i, strip) in self.renderer.group().strips().iter().enumerate() {
                let range = strip.bounds.start as usize..strip.bounds.end();
                self.paint_strip(ui, &format!("group {i}"), &frame[range]);
            }
            ui.add_space(8.0);
            for (i, bridge) in self.renderer.bridges().iter().enumerate() {
                let bounds = bridge.bounds();
                let range = bounds.start as usize..bounds.end();
                self.paint_strip(ui, &format!("bridge {i}"), &frame[range]);
            }
        });
    }
}
