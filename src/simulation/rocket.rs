//! Rocket agents: sensing, thinking, thrust, orbit tracking, and fitness.

use ndarray::{Array1, array};

use super::body::{Body, BodyRole};
use super::brain::{Genome, NeuralNetwork};
use super::params::Params;
use super::physics;
use super::storage::GenomeRecord;

/// Discrete thrust action selected by the brain, indexed by the argmax of the
/// network output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Thrust up (negative y).
    Up,
    /// Thrust down (positive y).
    Down,
    /// Thrust right (positive x).
    Right,
    /// Thrust left (negative x).
    Left,
    /// No thrust, no fuel consumed.
    Coast,
}

impl Action {
    /// Maps a network output index to an action. Out-of-range indices coast.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Action::Up,
            1 => Action::Down,
            2 => Action::Right,
            3 => Action::Left,
            _ => Action::Coast,
        }
    }

    /// Unit thrust direction, or `None` for coasting.
    pub fn thrust_direction(self) -> Option<Array1<f32>> {
        match self {
            Action::Up => Some(array![0.0, -1.0]),
            Action::Down => Some(array![0.0, 1.0]),
            Action::Right => Some(array![1.0, 0.0]),
            Action::Left => Some(array![-1.0, 0.0]),
            Action::Coast => None,
        }
    }
}

/// An agent: a physical body plus a brain, fuel, orbit tracking, and fitness.
#[derive(Debug, Clone)]
pub struct Rocket {
    /// Physical state shared with the physics functions.
    pub body: Body,
    /// Neural network controlling thrust.
    pub brain: NeuralNetwork,
    /// Ticks survived this epoch.
    pub ttl: u32,
    /// Completed orbits around the central body.
    pub orbits: u32,
    /// Cumulative signed angle traveled around the central body.
    pub total_angle: f32,
    /// Bearing angle observed last tick; `None` before the first observation.
    pub last_angle: Option<f32>,
    /// Remaining fuel.
    pub fuel: f32,
    /// Cumulative fitness, monotonically accumulated per tick.
    pub fitness: f32,
    /// Sensed inputs from the most recent tick, kept for the visualizer.
    pub last_inputs: Array1<f32>,
}

impl Rocket {
    /// Creates a rocket at `pos` with a fresh random brain. When a `seed`
    /// genome is given it is loaded wholesale first; the brain is always
    /// perturbed once afterwards, so every new rocket is a mutated clone of a
    /// historical elite or a mutated random initialization.
    pub fn new(pos: Array1<f32>, params: &Params, seed: Option<&Genome>) -> Self {
        let mut brain = NeuralNetwork::new(&params.layer_sizes, params.learning_rate);
        if let Some(genome) = seed {
            brain.load(genome);
        }
        brain.perturb_weights(params.mutation_sigma, params.mutation_chance);

        let input_size = params.layer_sizes.first().copied().unwrap_or(0);

        Self {
            body: Body::new(BodyRole::Agent, pos, params.rocket_mass, params.rocket_radius),
            brain,
            ttl: 0,
            orbits: 0,
            total_angle: 0.0,
            last_angle: None,
            fuel: params.rocket_fuel,
            fitness: 0.0,
            last_inputs: Array1::zeros(input_size),
        }
    }

    /// Advances the rocket one tick against the central body.
    ///
    /// Thrust emitted by the brain lands after integration, so it is
    /// integrated on the next tick together with gravity.
    pub fn update(&mut self, central: &Body, params: &Params) {
        self.body.apply_gravitation(central, params);
        self.body.handle_collision(central, params);
        self.body.integrate(params);
        self.think(central, params);
        self.ttl += 1;
        self.body.out_of_range = physics::is_too_far(&self.body, central, params.max_distance);
        self.track_orbit(central);
        self.update_fitness(central, params);
        self.body.record_trail(params.trail_capacity);
    }

    /// Senses relative state, runs the brain, and applies the chosen action.
    pub fn think(&mut self, central: &Body, params: &Params) {
        let inputs = self.sense(central, params);
        let outputs = self.brain.forward(&inputs);
        self.last_inputs = inputs;
        let action = Action::from_index(NeuralNetwork::argmax(&outputs));
        self.apply_action(action, params);
    }

    /// Normalized sensory inputs: relative position, distance, radial and
    /// tangential velocity, raw velocity, acceleration and force components,
    /// and fuel fraction.
    fn sense(&self, central: &Body, params: &Params) -> Array1<f32> {
        let delta = &central.pos - &self.body.pos;
        let distance = delta.dot(&delta).sqrt();
        let max = params.max_distance;

        let (radial, tangent) = if distance > 0.0 {
            let radial = &delta / distance;
            let tangent = array![-radial[1], radial[0]];
            (radial, tangent)
        } else {
            (Array1::zeros(2), Array1::zeros(2))
        };

        let radial_velocity = self.body.vel.dot(&radial);
        let tangent_velocity = self.body.vel.dot(&tangent);

        array![
            delta[0] / max,
            delta[1] / max,
            distance / max,
            radial_velocity * 100.0,
            tangent_velocity * 100.0,
            self.body.vel[0] * 100.0,
            self.body.vel[1] * 100.0,
            self.body.acc[0] * 1000.0,
            self.body.acc[1] * 1000.0,
            self.body.force[0] * 10_000.0,
            self.body.force[1] * 10_000.0,
            self.fuel / params.rocket_fuel,
        ]
    }

    /// Applies a thrust action, consuming one fuel unit per actuated tick.
    /// Coasting consumes nothing; with fuel exhausted, thrust requests are
    /// silently ignored and fuel never goes negative.
    pub fn apply_action(&mut self, action: Action, params: &Params) {
        if self.fuel <= 0.0 {
            return;
        }

        if let Some(direction) = action.thrust_direction() {
            self.body.add_force(&(direction * params.thrust_force));
            self.fuel = (self.fuel - params.fuel_consumption).max(0.0);
        }
    }

    /// Accumulates the signed shortest-path angular delta of the bearing to
    /// the central body. Deltas beyond ±π are wrapped by 2π so a near-full
    /// revolution is not counted as a near-zero step.
    pub fn track_orbit(&mut self, central: &Body) {
        let dx = self.body.pos[0] - central.pos[0];
        let dy = self.body.pos[1] - central.pos[1];
        let angle = dy.atan2(dx);

        if let Some(last) = self.last_angle {
            let mut delta = angle - last;
            if delta > std::f32::consts::PI {
                delta -= std::f32::consts::TAU;
            }
            if delta < -std::f32::consts::PI {
                delta += std::f32::consts::TAU;
            }
            self.total_angle += delta;
        }

        self.last_angle = Some(angle);
    }

    /// Adds the five per-tick fitness terms: clamped proximity reward,
    /// tangential-alignment reward, time-alive reward, orbit bonus for newly
    /// completed orbits, and the drift penalty beyond the threshold.
    pub fn update_fitness(&mut self, central: &Body, params: &Params) {
        let delta = &central.pos - &self.body.pos;
        let distance = delta.dot(&delta).sqrt();

        let proximity = params.proximity_weight / distance.max(params.proximity_floor);

        let speed = self.body.vel.dot(&self.body.vel).sqrt();
        if speed > params.speed_epsilon && distance > 0.0 {
            let tangent = array![delta[1] / distance, -delta[0] / distance];
            let alignment = (tangent.dot(&self.body.vel) / speed).abs();
            self.fitness += alignment * params.tangent_align_weight;
        }

        self.fitness += params.time_alive_weight;

        let completed = (self.total_angle.abs() / std::f32::consts::TAU).floor() as u32;
        if completed > self.orbits {
            self.fitness += params.orbit_bonus * (completed - self.orbits) as f32;
            self.orbits = completed;
        }

        if distance > params.penalty_threshold {
            self.fitness -= (distance - params.penalty_threshold) * params.distance_penalty;
        }

        self.fitness += proximity;
    }

    /// A rocket is dead once it has registered a disabling collision or left
    /// the interaction range; it then leaves the live population for the epoch.
    pub fn is_dead(&self) -> bool {
        self.body.touched || self.body.out_of_range
    }

    /// Exports the genome annotated with the metrics that earned its place.
    pub fn export(&self) -> GenomeRecord {
        GenomeRecord {
            ttl: self.ttl,
            orbits: self.orbits,
            fitness: self.fitness,
            genome: self.brain.export(),
        }
    }
}
