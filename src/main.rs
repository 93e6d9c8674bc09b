use macroquad::prelude::*;

mod graphics;
mod ui;

use orbevo::simulation::params::Params;
use orbevo::simulation::population::Simulation;
use orbevo::simulation::storage::JsonFileStore;

const GENOME_POOL_PATH: &str = "genome_pool.json";

#[macroquad::main("Orbital Neuroevolution")]
async fn main() {
    let params = Params::default();
    let mut simulation: Option<Simulation> = None;
    let mut ui_state = ui::UiState::new();
    let starfield = graphics::Starfield::new(160);

    println!("Starting orbital neuroevolution simulation");

    loop {
        let Some(ref mut sim) = simulation else {
            clear_background(BLACK);
            let text = "Start a new evolution by pressing Enter";
            let font_size = 30.0;

            let text_size = measure_text(text, None, font_size as _, 1.0);
            draw_text(
                text,
                screen_width() / 2. - text_size.width / 2.,
                screen_height() / 2. - text_size.height / 2.,
                font_size,
                GRAY,
            );

            if is_key_down(KeyCode::Enter) {
                let store = JsonFileStore::new(GENOME_POOL_PATH);
                simulation = Some(Simulation::new(&params, Box::new(store)));
            }
            next_frame().await;
            continue;
        };

        clear_background(BLACK);

        if !ui_state.paused {
            for _ in 0..ui_state.steps_per_frame {
                sim.step(&params);
            }
        }

        starfield.draw();
        graphics::draw_bodies(&sim.population);

        ui_state.record(sim);
        ui::draw(&mut ui_state, sim);

        next_frame().await
    }
}
