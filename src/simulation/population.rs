//! Population manager and epoch lifecycle.
//!
//! The manager owns the central body and the rocket population, drives
//! per-tick updates and death culling, and at epoch end ranks the full
//! population, persists the elite into the genome pool, and respawns a fresh
//! generation seeded from that pool. The cycle has no terminal state; it runs
//! until externally stopped.

use std::cmp::Ordering;

use ndarray::array;
use rand::Rng;

use super::body::Body;
use super::params::{Params, SpawnBand};
use super::rocket::Rocket;
use super::storage::GenomeStore;

/// Snapshot of population-level statistics for display.
#[derive(Debug, Clone, Copy)]
pub struct PopulationStats {
    /// Completed-epoch counter.
    pub epoch: u32,
    /// Rockets still simulating.
    pub alive: usize,
    /// Rockets removed this epoch.
    pub dead: usize,
    /// Highest fitness in the current population.
    pub best_fitness: f32,
    /// Most orbits completed in the current population.
    pub best_orbits: u32,
    /// Longest survival in the current population.
    pub best_ttl: u32,
    /// Average fitness of the last completed epoch.
    pub average_fitness: f32,
    /// Spawn band shared by every rocket this epoch.
    pub spawn_band: SpawnBand,
}

/// Owns the central body, the live and dead rocket sets, and the persistence
/// handle. Every rocket is in exactly one of the two sets during an epoch.
pub struct Population {
    /// Rockets currently simulating.
    pub alive: Vec<Rocket>,
    /// Rockets that died this epoch, in death order.
    pub dead: Vec<Rocket>,
    /// The shared central body.
    pub central: Body,
    /// Monotonically increasing epoch counter.
    pub epoch: u32,
    /// Average fitness over the last completed epoch's full population.
    pub average_fitness: f32,
    /// Spawn band chosen for the current epoch.
    pub spawn_band: SpawnBand,
    store: Box<dyn GenomeStore>,
}

impl Population {
    /// Creates the central body and spawns the first generation, seeding
    /// brains from whatever the store already holds.
    pub fn new(params: &Params, store: Box<dyn GenomeStore>) -> Self {
        let mut population = Self {
            alive: Vec::new(),
            dead: Vec::new(),
            central: Body::central(params),
            epoch: 0,
            average_fitness: 0.0,
            spawn_band: SpawnBand {
                min_dist: 0.0,
                max_dist: 0.0,
            },
            store,
        };
        population.spawn(params);
        population
    }

    /// Spawns a full population at random angles within one spawn band.
    ///
    /// The band is chosen once per epoch, so every rocket of an epoch shares
    /// the same distance band and only the angle varies. Seed genomes are
    /// drawn uniformly from the persisted pool when it is non-empty.
    fn spawn(&mut self, params: &Params) {
        let mut rng = rand::rng();

        self.spawn_band = if params.spawn_bands.is_empty() {
            SpawnBand {
                min_dist: 0.0,
                max_dist: 0.0,
            }
        } else {
            params.spawn_bands[rng.random_range(0..params.spawn_bands.len())]
        };

        let pool = self.store.load_pool();
        let (center_x, center_y) = params.central_position;
        let band = self.spawn_band;

        self.alive = (0..params.population_size)
            .map(|_| {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let distance =
                    band.min_dist + rng.random::<f32>() * (band.max_dist - band.min_dist);
                let pos = array![
                    center_x + angle.cos() * distance,
                    center_y + angle.sin() * distance,
                ];
                let seed = if pool.is_empty() {
                    None
                } else {
                    Some(&pool[rng.random_range(0..pool.len())].genome)
                };
                Rocket::new(pos, params, seed)
            })
            .collect();
    }

    /// Updates every live rocket against the central body, sequentially. The
    /// central body never changes during an epoch, so no rocket observes
    /// another rocket's post-tick state.
    pub fn update(&mut self, params: &Params) {
        for rocket in &mut self.alive {
            rocket.update(&self.central, params);
        }
    }

    /// Moves dead rockets to the dead set, preserving order in both sets.
    pub fn cull_dead(&mut self) {
        let mut still_alive = Vec::with_capacity(self.alive.len());
        for rocket in self.alive.drain(..) {
            if rocket.is_dead() {
                self.dead.push(rocket);
            } else {
                still_alive.push(rocket);
            }
        }
        self.alive = still_alive;
    }

    /// An epoch ends when no rocket is left alive or the tick budget is spent.
    pub fn should_end_epoch(&self, tick_count: u32, params: &Params) -> bool {
        self.alive.is_empty() || tick_count > params.max_ticks_per_epoch
    }

    /// Ends the current epoch: persists the elite, then reinitializes the
    /// central body and spawns the next generation.
    pub fn start_new_epoch(&mut self, params: &Params) {
        self.persist_elite(params);
        self.central = Body::central(params);
        self.dead.clear();
        self.spawn(params);
        self.epoch += 1;
    }

    /// Ranks the full population by fitness (stable, descending), merges the
    /// top fraction into the persisted pool, re-ranks, truncates to the pool
    /// capacity, and saves. Persistence failures are reported and ignored.
    fn persist_elite(&mut self, params: &Params) {
        let mut ranked: Vec<&Rocket> = self.alive.iter().chain(self.dead.iter()).collect();
        if ranked.is_empty() {
            return;
        }

        ranked.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(Ordering::Equal)
        });

        let elite_count = ((ranked.len() as f32 * params.elite_fraction).floor() as usize).max(1);

        let mut combined = self.store.load_pool();
        let previous_best = combined.first().map_or(0.0, |record| record.fitness);

        combined.extend(ranked.iter().take(elite_count).map(|rocket| rocket.export()));
        combined.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(Ordering::Equal)
        });
        combined.truncate(params.pool_capacity);

        let best = combined.first().map_or(0.0, |record| record.fitness);
        if best > previous_best {
            println!(
                "epoch {} - best fitness improved: {:.1} -> {:.1}",
                self.epoch, previous_best, best
            );
        } else {
            println!(
                "epoch {} - best fitness: {:.1} (no improvement)",
                self.epoch, best
            );
        }

        if let Err(err) = self.store.save_pool(&combined) {
            eprintln!("failed to save genome pool: {err}");
        }

        let total: f32 = ranked.iter().map(|rocket| rocket.fitness).sum();
        self.average_fitness = total / ranked.len() as f32;
    }

    /// The central body followed by every live rocket, for rendering.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.central).chain(self.alive.iter().map(|rocket| &rocket.body))
    }

    /// The most recently spawned rocket still alive, used by the network
    /// visualizer.
    pub fn newest_rocket(&self) -> Option<&Rocket> {
        self.alive.last()
    }

    /// Current population-level statistics.
    pub fn stats(&self) -> PopulationStats {
        let mut best_fitness = 0.0f32;
        let mut best_orbits = 0;
        let mut best_ttl = 0;

        for rocket in self.alive.iter().chain(self.dead.iter()) {
            if rocket.fitness > best_fitness {
                best_fitness = rocket.fitness;
            }
            if rocket.orbits > best_orbits {
                best_orbits = rocket.orbits;
            }
            if rocket.ttl > best_ttl {
                best_ttl = rocket.ttl;
            }
        }

        PopulationStats {
            epoch: self.epoch,
            alive: self.alive.len(),
            dead: self.dead.len(),
            best_fitness,
            best_orbits,
            best_ttl,
            average_fitness: self.average_fitness,
            spawn_band: self.spawn_band,
        }
    }
}

/// Thin tick-driven driver around a [`Population`]: counts ticks, detects
/// epoch termination, and rolls the cycle over. Stoppable only between ticks.
pub struct Simulation {
    /// The managed population.
    pub population: Population,
    /// Ticks elapsed in the current epoch.
    pub tick_count: u32,
}

impl Simulation {
    /// Creates a simulation with a freshly initialized population.
    pub fn new(params: &Params, store: Box<dyn GenomeStore>) -> Self {
        Self {
            population: Population::new(params, store),
            tick_count: 0,
        }
    }

    /// Advances one tick, or rolls over into the next epoch when the current
    /// one has terminated.
    pub fn step(&mut self, params: &Params) {
        if self.population.should_end_epoch(self.tick_count, params) {
            self.population.start_new_epoch(params);
            self.tick_count = 0;
            return;
        }

        self.population.update(params);
        self.population.cull_dead();
        self.tick_count += 1;
    }
}
