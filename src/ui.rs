use std::collections::VecDeque;

use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};

use orbevo::simulation::population::Simulation;
use orbevo::simulation::rocket::Rocket;

const MAX_HISTORY_POINTS: usize = 500;

/// UI state kept across frames: controls and the fitness history plot data.
pub struct UiState {
    pub paused: bool,
    pub steps_per_frame: u32,
    pub show_network: bool,
    fitness_history: VecDeque<(f64, f64)>,
    last_recorded_epoch: Option<u32>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            paused: false,
            steps_per_frame: 1,
            show_network: true,
            fitness_history: VecDeque::new(),
            last_recorded_epoch: None,
        }
    }

    /// Records one average-fitness sample per completed epoch.
    pub fn record(&mut self, simulation: &Simulation) {
        let epoch = simulation.population.epoch;
        if epoch == 0 || self.last_recorded_epoch == Some(epoch) {
            return;
        }
        self.last_recorded_epoch = Some(epoch);
        self.fitness_history
            .push_back((epoch as f64, simulation.population.average_fitness as f64));
        if self.fitness_history.len() > MAX_HISTORY_POINTS {
            self.fitness_history.pop_front();
        }
    }
}

pub fn draw(state: &mut UiState, simulation: &Simulation) {
    egui_macroquad::ui(|ctx| {
        egui::SidePanel::right("stats_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Evolution Stats");
                ui.separator();

                ui.horizontal(|ui| {
                    let label = if state.paused { "Resume" } else { "Pause" };
                    if ui.button(label).clicked() {
                        state.paused = !state.paused;
                    }
                    ui.checkbox(&mut state.show_network, "Network view");
                });

                ui.add(
                    egui::Slider::new(&mut state.steps_per_frame, 1..=50).text("steps per frame"),
                );
                ui.separator();

                let stats = simulation.population.stats();
                ui.label(format!("Epoch: {}", stats.epoch));
                ui.label(format!("Tick: {}", simulation.tick_count));
                ui.label(format!("Alive: {} / Dead: {}", stats.alive, stats.dead));
                ui.label(format!(
                    "Spawn band: {:.0}-{:.0}",
                    stats.spawn_band.min_dist, stats.spawn_band.max_dist
                ));
                ui.label(format!("Best fitness: {:.1}", stats.best_fitness));
                ui.label(format!("Best orbits: {}", stats.best_orbits));
                ui.label(format!("Best ttl: {}", stats.best_ttl));
                ui.label(format!("Avg fitness (last epoch): {:.1}", stats.average_fitness));

                ui.separator();
                ui.label("Average fitness per epoch");
                let points: PlotPoints =
                    state.fitness_history.iter().map(|&(x, y)| [x, y]).collect();
                Plot::new("avg_fitness_plot")
                    .height(140.0)
                    .allow_drag(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(points));
                    });

                if state.show_network {
                    ui.separator();
                    ui.label("Newest rocket brain");
                    if let Some(rocket) = simulation.population.newest_rocket() {
                        draw_network(ui, rocket);
                    } else {
                        ui.label("No rocket alive");
                    }
                }
            });
    });

    egui_macroquad::draw();
}

/// Draws the brain of one rocket: neurons colored by activation, connections
/// colored by the signal (activation times weight) flowing through them.
fn draw_network(ui: &mut egui::Ui, rocket: &Rocket) {
    let activations = &rocket.brain.activations;
    if activations.len() != rocket.brain.layers.len() + 1 {
        ui.label("No activations yet");
        return;
    }

    let width = ui.available_width().max(200.0);
    let height = 220.0;
    let (response, painter) =
        ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let rect = response.rect;

    let layer_count = activations.len();
    let layer_spacing = rect.width() / (layer_count as f32 + 1.0);

    let neuron_pos = |layer_idx: usize, neuron_idx: usize, layer_len: usize| {
        egui::pos2(
            rect.left() + layer_spacing * (layer_idx as f32 + 1.0),
            rect.top() + rect.height() * (neuron_idx as f32 + 1.0) / (layer_len as f32 + 1.0),
        )
    };

    // Connections first so neurons draw on top.
    for (layer_idx, layer) in rocket.brain.layers.iter().enumerate() {
        let inputs = &activations[layer_idx];
        let outputs = &activations[layer_idx + 1];

        for out_idx in 0..outputs.len() {
            for (in_idx, &input) in inputs.iter().enumerate() {
                let weight = layer.weights[[out_idx, in_idx]];
                let signal = input * weight;
                let strength = signal.abs().min(1.0);
                let alpha = (40.0 + strength * 180.0) as u8;

                let color = if signal >= 0.0 {
                    egui::Color32::from_rgba_unmultiplied(0, 200, 80, alpha)
                } else {
                    egui::Color32::from_rgba_unmultiplied(220, 60, 60, alpha)
                };

                painter.line_segment(
                    [
                        neuron_pos(layer_idx, in_idx, inputs.len()),
                        neuron_pos(layer_idx + 1, out_idx, outputs.len()),
                    ],
                    egui::Stroke::new(0.5 + strength, color),
                );
            }
        }
    }

    for (layer_idx, layer) in activations.iter().enumerate() {
        for (neuron_idx, &activation) in layer.iter().enumerate() {
            let level = (activation.clamp(-1.0, 1.0).abs() * 255.0) as u8;
            let blue = (u16::from(level) + 80).min(255) as u8;
            painter.circle_filled(
                neuron_pos(layer_idx, neuron_idx, layer.len()),
                4.0,
                egui::Color32::from_rgb(level, level, blue),
            );
        }
    }
}
