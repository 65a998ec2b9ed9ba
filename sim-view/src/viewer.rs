//! Interactive stochastic grid viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation engine,
//! the step parameters and the run timer, and implements [`eframe::App`]
//! to render and control the simulation through an egui UI.

use eframe::App;
use glam::Vec2;
use log::info;
use rand::rng;
use sim_core::{
    config::{DEFAULT_DENSITY, Params},
    engine::SimulationEngine,
    types::Age,
};

use crate::config::{
    CELL_GAP, GRID_SIZE_RANGE, INTERVAL_MS_RANGE, INTERVAL_MS_STEP, LEGEND_HEIGHT,
    LIFESPAN_RANGE, SWATCH_SIZE, ViewConfig,
};

const OFF_COLOR: egui::Color32 = egui::Color32::WHITE;
const ON_COLOR: egui::Color32 = egui::Color32::from_rgb(0x14, 0x14, 0x14);
const GAP_COLOR: egui::Color32 = egui::Color32::from_rgb(0xdc, 0xdc, 0xdc);

/// Legend stops for the age heatmap, new to old.
const HEATMAP_LEGEND: [egui::Color32; 5] = [
    egui::Color32::from_rgb(0x10, 0xb9, 0x81),
    egui::Color32::from_rgb(0x05, 0x96, 0x69),
    egui::Color32::from_rgb(0x04, 0x78, 0x57),
    egui::Color32::from_rgb(0x06, 0x4e, 0x3b),
    ON_COLOR,
];

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`SimulationEngine`] and the [`Params`] passed to each step.
/// - Host settings ([`ViewConfig`]): grid size, step interval, display mode.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running` is `true` and the interval has elapsed, step once.
/// 3. Render the grid.
///
/// At most one step happens per frame, so automatic steps never overlap.
///
/// ### Fields
/// - `engine` - Grid, age grid and generation counter.
/// - `params` - Spread/extinguish probabilities and lifespan.
/// - `cfg` - Host settings.
///
/// - `rng` - Random number generator for stepping and randomizing.
///
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `last_step_dt` - Actual time delta between the last two steps (for display only).
pub struct Viewer {
    engine: SimulationEngine,
    params: Params,
    cfg: ViewConfig,

    rng: rand::rngs::ThreadRng,

    running: bool,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer with an empty grid of the default size, paused.
    pub fn new() -> Self {
        let cfg = ViewConfig::default();
        Self {
            engine: SimulationEngine::new(cfg.grid_size),
            params: Params::default(),
            cfg,
            rng: rng(),
            running: false,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        }
    }

    fn set_running(&mut self, running: bool) {
        if self.running != running {
            info!(
                "simulation {} at generation {}",
                if running { "started" } else { "stopped" },
                self.engine.generation()
            );
        }
        self.running = running;
    }

    /// Recreates the grid at `size`, stopping any run.
    fn resize(&mut self, size: usize) {
        self.cfg.grid_size = size;
        self.engine.resize(size);
        self.set_running(false);
        info!("grid resized to {size}x{size}");
    }

    /// Turns all cells off and stops any run.
    fn clear(&mut self) {
        self.engine.clear();
        self.set_running(false);
    }

    /// Refills the grid at the reference density. A run in progress continues.
    fn randomize(&mut self) {
        self.engine.randomize(DEFAULT_DENSITY, &mut self.rng);
    }

    fn step_once(&mut self) {
        self.engine.step(&self.params, &mut self.rng);
    }

    /// Steps once if running and the interval has elapsed since the last step.
    ///
    /// ### Parameters
    /// - `now` - Current egui time in seconds.
    ///
    /// ### Returns
    /// `true` if a step was taken.
    fn tick(&mut self, now: f64) -> bool {
        if !self.running {
            return false;
        }
        let elapsed = now - self.last_step_time;
        if elapsed < self.cfg.interval_secs() {
            return false;
        }
        if self.last_step_time > 0.0 {
            self.last_step_dt = elapsed;
        }
        self.step_once();
        self.last_step_time = now;
        true
    }

    /// Builds the top panel UI (run controls, stepping, randomize, clear).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Stop" } else { "▶ Start" })
                    .clicked()
                {
                    self.set_running(!self.running);
                }

                if ui
                    .add_enabled(!self.running, egui::Button::new("Step"))
                    .clicked()
                {
                    self.step_once();
                    self.last_step_time = ctx.input(|i| i.time);
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }
            });
        });
    }

    /// Builds the bottom status bar (generation, burning cells, step timing).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("burning = {}", self.engine.burning_count()));
                ui.label(format!("generation = {}", self.engine.generation()));
            });
        });
    }

    /// Builds the left-hand panel with the parameter sliders and the rules legend.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");

                ui.separator();
                let mut size = self.cfg.grid_size;
                ui.add(egui::Slider::new(&mut size, GRID_SIZE_RANGE).text("Grid size (N)"));
                if size != self.cfg.grid_size {
                    self.resize(size);
                }

                ui.add(
                    egui::Slider::new(&mut self.params.prob_spread, 0.0..=1.0)
                        .step_by(0.01)
                        .text("Spread (a)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.prob_extinguish, 0.0..=1.0)
                        .step_by(0.01)
                        .text("Extinguish (s)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.lifespan, LIFESPAN_RANGE)
                        .text("Lifespan (L)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.cfg.interval_ms, INTERVAL_MS_RANGE)
                        .step_by(INTERVAL_MS_STEP)
                        .suffix(" ms")
                        .text("Interval (T)"),
                );

                ui.separator();
                ui.checkbox(&mut self.cfg.show_heatmap, "Show age heatmap");

                ui.separator();
                ui.label("Rules");
                ui.small("1. An OFF cell ignites more easily the more ON neighbors it has.");
                ui.small("2. Each ON neighbor may extinguish an ON cell with probability s.");
                ui.small("3. An ON cell turns OFF after L steps.");

                ui.separator();
                if ui.button("Reset parameters").clicked() {
                    self.params = Params::default();
                }
            });
    }

    /// Builds the legend row under the board: OFF/ON swatches, or the
    /// new-to-old gradient when the heatmap is shown.
    fn ui_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            swatch(ui, OFF_COLOR);
            ui.small("OFF");
            ui.separator();
            if self.cfg.show_heatmap {
                ui.small("New");
                let spacing = ui.spacing().item_spacing.x;
                ui.spacing_mut().item_spacing.x = 0.0;
                for color in HEATMAP_LEGEND {
                    swatch(ui, color);
                }
                ui.spacing_mut().item_spacing.x = spacing;
                ui.small("Old");
            } else {
                swatch(ui, ON_COLOR);
                ui.small("ON");
            }
        });
    }

    /// Builds the central panel where the grid is drawn and cells are toggled.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let board_area = egui::vec2(avail.x, (avail.y - LEGEND_HEIGHT).max(0.0));
            let response = ui.allocate_response(board_area, egui::Sense::click());
            let board = board_rect(response.rect);
            let painter = ui.painter_at(response.rect);
            let size = self.engine.size();

            if response.clicked()
                && let Some(pos) = response.interact_pointer_pos()
                && let Some((row, col)) = cell_at(Vec2::new(pos.x, pos.y), board, size)
            {
                self.engine.toggle_cell(row, col);
            }

            painter.rect_filled(board, 0.0, GAP_COLOR);
            for (row, col, &on) in self.engine.grid().indexed() {
                let color = cell_color(
                    on,
                    self.engine.age(row, col),
                    self.params.lifespan,
                    self.cfg.show_heatmap,
                );
                painter.rect_filled(cell_rect(board, size, row, col), 0.0, color);
            }

            self.ui_legend(ui);

            // Auto-run simulation if requested.
            if self.running {
                self.tick(ctx.input(|i| i.time));
                ctx.request_repaint();
            }
        });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Small filled square with a thin outline, used by the legend.
fn swatch(ui: &mut egui::Ui, color: egui::Color32) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.painter().rect_stroke(
        rect,
        2.0,
        egui::Stroke::new(1.0, GAP_COLOR),
        egui::StrokeKind::Inside,
    );
}

/// Largest square centered in `area`.
fn board_rect(area: egui::Rect) -> egui::Rect {
    let side = area.width().min(area.height());
    egui::Rect::from_center_size(area.center(), egui::vec2(side, side))
}

/// Screen rectangle of cell `(row, col)`, shrunk by [`CELL_GAP`].
fn cell_rect(board: egui::Rect, size: usize, row: usize, col: usize) -> egui::Rect {
    let cell = board.width() / size as f32;
    let min = board.min + egui::vec2(col as f32 * cell, row as f32 * cell);
    egui::Rect::from_min_size(min, egui::vec2(cell, cell)).shrink(CELL_GAP * 0.5)
}

/// Maps a screen position to the `(row, col)` of the cell under it.
///
/// ### Parameters
/// - `p` - Screen-space position.
/// - `board` - Screen rectangle covered by the grid.
/// - `size` - Grid side length.
///
/// ### Returns
/// `Some((row, col))` if `p` lies on the board, `None` otherwise.
fn cell_at(p: Vec2, board: egui::Rect, size: usize) -> Option<(usize, usize)> {
    if size == 0 || board.width() <= 0.0 {
        return None;
    }
    let origin = Vec2::new(board.min.x, board.min.y);
    let local = (p - origin) / (board.width() / size as f32);
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let (row, col) = (local.y as usize, local.x as usize);
    (row < size && col < size).then_some((row, col))
}

/// Fill color of one cell.
///
/// Off cells are white. Burning cells are dark in flat mode; in heatmap
/// mode they fade from bright emerald (new) to near black (at the lifespan).
fn cell_color(on: bool, age: Age, lifespan: Age, heatmap: bool) -> egui::Color32 {
    match (on, heatmap) {
        (false, _) => OFF_COLOR,
        (true, false) => ON_COLOR,
        (true, true) => heatmap_color(age, lifespan),
    }
}

fn heatmap_color(age: Age, lifespan: Age) -> egui::Color32 {
    let ratio = (age as f32 / lifespan.max(1) as f32).min(1.0);
    hsl_to_color(160.0, 0.84, 0.50 - ratio * 0.45)
}

/// Converts HSL (hue in degrees, saturation and lightness in `[0, 1]`) to sRGB.
fn hsl_to_color(h: f32, s: f32, l: f32) -> egui::Color32 {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    egui::Color32::from_rgb(to_u8(r), to_u8(g), to_u8(b))
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
