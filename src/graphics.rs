use macroquad::prelude::*;
use macroquad::rand::gen_range;

use orbevo::simulation::body::{Body, BodyRole};
use orbevo::simulation::population::Population;

/// Fixed background star positions, generated once per session.
pub struct Starfield {
    stars: Vec<(f32, f32, f32)>,
}

impl Starfield {
    pub fn new(count: usize) -> Self {
        let stars = (0..count)
            .map(|_| {
                (
                    gen_range(0.0, 1.0),
                    gen_range(0.0, 1.0),
                    gen_range(0.4, 1.5),
                )
            })
            .collect();
        Self { stars }
    }

    pub fn draw(&self) {
        for &(x, y, radius) in &self.stars {
            draw_circle(
                x * screen_width(),
                y * screen_height(),
                radius,
                Color::from_rgba(255, 255, 255, 140),
            );
        }
    }
}

pub fn draw_bodies(population: &Population) {
    for body in population.bodies() {
        draw_trail(body);
    }
    for body in population.bodies() {
        match body.role {
            BodyRole::CentralBody => {
                // Soft glow under the planet
                draw_circle(
                    body.pos[0],
                    body.pos[1],
                    body.radius * 2.5,
                    Color::from_rgba(34, 197, 94, 40),
                );
                draw_circle(
                    body.pos[0],
                    body.pos[1],
                    body.radius,
                    Color::from_rgba(34, 197, 94, 255),
                );
            }
            BodyRole::Agent => draw_circle(body.pos[0], body.pos[1], body.radius, RED),
        }
    }
}

fn draw_trail(body: &Body) {
    if body.trail.len() < 2 {
        return;
    }
    for pair in body.trail.windows(2) {
        draw_line(
            pair[0][0],
            pair[0][1],
            pair[1][0],
            pair[1][1],
            1.0,
            Color::from_rgba(255, 255, 255, 80),
        );
    }
}
