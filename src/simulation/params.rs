use serde::{Deserialize, Serialize};

/// A distance band rockets can spawn in, relative to the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    /// Minimum spawn distance from the central body.
    pub min_dist: f32,
    /// Maximum spawn distance from the central body.
    pub max_dist: f32,
}

/// Simulation parameters that control physics, fitness shaping, and evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Gravitational constant used for the inverse-square attraction.
    pub gravitational_constant: f32,
    /// Restitution coefficient for rocket/central-body collisions.
    pub restitution: f32,
    /// Fixed integration time step applied to acceleration each tick.
    pub time_step: f32,
    /// Maximum interaction distance; rockets beyond it are terminated.
    pub max_distance: f32,
    /// Mass of the central body.
    pub central_mass: f32,
    /// Collision radius of the central body.
    pub central_radius: f32,
    /// Fixed position of the central body.
    pub central_position: (f32, f32),
    /// Mass of each rocket.
    pub rocket_mass: f32,
    /// Collision radius of each rocket.
    pub rocket_radius: f32,
    /// Magnitude of the unit thrust force.
    pub thrust_force: f32,
    /// Fuel each rocket starts an epoch with.
    pub rocket_fuel: f32,
    /// Fuel consumed per actuated tick.
    pub fuel_consumption: f32,
    /// Weight of the reciprocal proximity reward.
    pub proximity_weight: f32,
    /// Distance floor clamping the proximity reward near zero distance.
    pub proximity_floor: f32,
    /// Weight of the tangential-alignment reward.
    pub tangent_align_weight: f32,
    /// Constant fitness gained per tick survived.
    pub time_alive_weight: f32,
    /// Fitness bonus per completed orbit.
    pub orbit_bonus: f32,
    /// Penalty rate per unit of distance beyond the threshold.
    pub distance_penalty: f32,
    /// Distance beyond which the drift penalty applies.
    pub penalty_threshold: f32,
    /// Minimum speed for the tangential-alignment reward to contribute.
    pub speed_epsilon: f32,
    /// Spawn distance bands; one is chosen uniformly per epoch.
    pub spawn_bands: Vec<SpawnBand>,
    /// Number of rockets per epoch.
    pub population_size: usize,
    /// Tick budget after which an epoch is forcibly ended.
    pub max_ticks_per_epoch: u32,
    /// Maximum number of retained trail points per body.
    pub trail_capacity: usize,
    /// Neural network layer dimensions (input, hidden..., output).
    pub layer_sizes: Vec<usize>,
    /// Learning rate for the supervised backpropagation path.
    pub learning_rate: f32,
    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// Per-weight probability of receiving mutation noise.
    pub mutation_chance: f32,
    /// Maximum number of genomes kept in the persisted pool.
    pub pool_capacity: usize,
    /// Fraction of a ranked population persisted at epoch end.
    pub elite_fraction: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.1,
            restitution: 0.8,
            time_step: 100_000.0,
            max_distance: 600.0,
            central_mass: 1.0,
            central_radius: 10.0,
            central_position: (400.0, 400.0),
            rocket_mass: 0.0001,
            rocket_radius: 4.0,
            thrust_force: 1e-9,
            rocket_fuel: 500.0,
            fuel_consumption: 1.0,
            proximity_weight: 10.0,
            proximity_floor: 10.0,
            tangent_align_weight: 5.0,
            time_alive_weight: 0.01,
            orbit_bonus: 100.0,
            distance_penalty: 0.1,
            penalty_threshold: 400.0,
            speed_epsilon: 0.0001,
            spawn_bands: vec![
                SpawnBand {
                    min_dist: 400.0,
                    max_dist: 600.0,
                },
                SpawnBand {
                    min_dist: 200.0,
                    max_dist: 400.0,
                },
                SpawnBand {
                    min_dist: 100.0,
                    max_dist: 200.0,
                },
            ],
            population_size: 100,
            max_ticks_per_epoch: 2000,
            trail_capacity: 200,
            layer_sizes: vec![12, 8, 5],
            learning_rate: 0.1,
            mutation_sigma: 0.05,
            mutation_chance: 0.1,
            pool_capacity: 10,
            elite_fraction: 0.1,
        }
    }
}
