//! Desktop preview app for myrtio-light-chase
//!
//! Runs the reference chase configuration against a simulated strip and
//! draws the frames the scheduler transmits.

use std::convert::Infallible;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_light_chase::{
    Brightness, ChaseScheduler, ConfigError, Instant, REFERENCE_BRIGHTNESS, REFERENCE_LED_COUNT,
    Rgb, SmartLedsOutput, reference_config,
};
use smart_leds::SmartLedsWrite;

/// Number of segments in the reference configuration
const SEGMENTS: usize = 3;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Largest amount of simulated time fed to the scheduler per UI frame
const MAX_STEP_MS: u64 = 250;

type PreviewScheduler =
    ChaseScheduler<SmartLedsOutput<FrameCapture>, REFERENCE_LED_COUNT, SEGMENTS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Render as a 1D strip, wrapped to available window width
    Strip,
    /// Render the strip as vertical columns of a fixed height
    Curtain,
}

/// Strip backend that keeps the last transmitted frame for drawing
#[derive(Debug, Default)]
struct FrameCapture {
    frame: Vec<Rgb>,
}

impl SmartLedsWrite for FrameCapture {
    type Error = Infallible;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.frame.clear();
        self.frame.extend(iterator.into_iter().map(Into::into));
        Ok(())
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Light Chase Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-light-chase-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()?))),
    )
}

fn build_scheduler(brightness: u8) -> Result<PreviewScheduler, ConfigError> {
    let output = SmartLedsOutput::new(FrameCapture::default(), Brightness::new(brightness));
    ChaseScheduler::new(&reference_config(), output)
}

struct PreviewApp {
    scheduler: PreviewScheduler,

    /// Simulated time in milliseconds
    t_ms: u64,
    /// Simulated time not yet fed to the scheduler, in microseconds
    pending_us: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Output brightness in percent
    brightness: u8,
    /// Completed sweeps per segment
    sweeps: [u32; SEGMENTS],
    /// LED pixel size for display
    led_size: f32,
    /// Preview layout
    layout: Layout,
    /// Column height in `Layout::Curtain`
    column_height: usize,
}

impl PreviewApp {
    fn new() -> Result<Self, ConfigError> {
        let mut app = Self {
            scheduler: build_scheduler(REFERENCE_BRIGHTNESS)?,
            t_ms: 0,
            pending_us: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            brightness: REFERENCE_BRIGHTNESS,
            sweeps: [0; SEGMENTS],
            led_size: LED_SIZE,
            layout: Layout::Strip,
            column_height: 20,
        };
        app.scheduler.catch_up(Instant::from_millis(0));
        Ok(app)
    }

    /// Restart the simulation from a freshly initialized strip
    fn reset(&mut self) {
        if let Ok(scheduler) = build_scheduler(self.brightness) {
            self.scheduler = scheduler;
            self.scheduler.catch_up(Instant::from_millis(0));
            self.t_ms = 0;
            self.pending_us = 0;
            self.sweeps = [0; SEGMENTS];
            self.last_frame = StdInstant::now();
        }
    }

    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Accumulate wall-clock time scaled by the speed slider
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_us = delta.as_secs_f64() * 1_000_000.0 * f64::from(self.time_scale);
            if delta_us.is_finite() && delta_us > 0.0 {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let delta_us = delta_us as u64;
                self.pending_us = (self.pending_us + delta_us).min(MAX_STEP_MS * 1_000);
            }
        }
    }

    /// Feed the pending time one millisecond at a time so every timeout
    /// gets its own poll
    fn run_scheduler(&mut self) {
        while self.pending_us >= 1_000 {
            self.pending_us -= 1_000;
            self.t_ms += 1;
            self.scheduler.catch_up(Instant::from_millis(self.t_ms));

            let outcome = self.scheduler.poll();
            for index in outcome.completed {
                self.sweeps[index] += 1;
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_scheduler();

        let frame = self.scheduler.output().writer().frame.clone();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("⏮ Reset").clicked() {
                            self.reset();
                        }
                        if ui
                            .button(if self.playing {
                                "⏸ Pause"
                            } else {
                                "▶ Play"
                            })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(
                            egui::Slider::new(&mut self.time_scale, 0.1..=5.0)
                                .logarithmic(true),
                        );
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <LayoutSelector>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Size: ");
                        ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Layout:");
                        ui.selectable_value(&mut self.layout, Layout::Strip, "strip");
                        ui.selectable_value(&mut self.layout, Layout::Curtain, "curtain");

                        if self.layout == Layout::Curtain {
                            ui.add_space(8.0);
                            ui.label("Height:");
                            ui.add(egui::Slider::new(
                                &mut self.column_height,
                                1usize..=REFERENCE_LED_COUNT,
                            ));
                        }
                    });
                });
                // </LayoutSelector>
            });

            ui.add_space(16.0);

            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Brightness:");
                    let old_brightness = self.brightness;
                    ui.add(egui::Slider::new(&mut self.brightness, 0u8..=100u8).suffix("%"));
                    if self.brightness != old_brightness {
                        self.scheduler
                            .output_mut()
                            .set_brightness(Brightness::new(self.brightness));
                    }
                });

                ui.add_space(4.0);

                for (index, sweeps) in self.sweeps.iter().enumerate() {
                    let segment = self.scheduler.segment(index);
                    let bounds = segment.bounds();
                    ui.label(format!(
                        "Segment {index} [{}, {}] {:?}: edge {}, {sweeps} sweeps",
                        bounds.start,
                        bounds.end,
                        segment.direction(),
                        segment.current(),
                    ));
                }
            });

            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            match self.layout {
                Layout::Strip => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
                    let rows = frame.len().div_ceil(leds_per_row);
                    #[allow(clippy::cast_precision_loss)]
                    let height = rows as f32 * led_pitch;

                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(available_width, height),
                        egui::Sense::hover(),
                    );
                    let origin = response.rect.min;

                    #[allow(clippy::cast_precision_loss)]
                    for (i, pixel) in frame.iter().enumerate() {
                        let row = i / leds_per_row;
                        let col = i % leds_per_row;
                        let x = origin.x + col as f32 * led_pitch;
                        let y = origin.y + row as f32 * led_pitch;

                        let rect = egui::Rect::from_min_size(
                            egui::pos2(x, y),
                            egui::vec2(self.led_size, self.led_size),
                        );
                        let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                        painter.rect_filled(rect, 3.0, color);
                    }
                }
                Layout::Curtain => {
                    let per_column = self.column_height.max(1);

                    #[allow(clippy::cast_precision_loss)]
                    let height = per_column as f32 * led_pitch;

                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(available_width, height),
                        egui::Sense::hover(),
                    );
                    let origin = response.rect.min;

                    #[allow(clippy::cast_precision_loss)]
                    for (i, pixel) in frame.iter().enumerate() {
                        let column = i / per_column;
                        let offset = i % per_column;
                        let x = origin.x + column as f32 * led_pitch;
                        let y = origin.y + offset as f32 * led_pitch;

                        let rect = egui::Rect::from_min_size(
                            egui::pos2(x, y),
                            egui::vec2(self.led_size, self.led_size),
                        );
                        let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                        painter.rect_filled(rect, 2.0, color);
                    }
                }
            }
        });
    }
}
