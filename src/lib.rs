//! # Orbevo - Orbital Neuro-evolution Simulation
//!
//! A simulation of rocket agents with neural network brains that learn to orbit
//! a central gravitating body through evolutionary weight perturbation.
//!
//! ## Features
//!
//! - Feedforward neural network brains (sigmoid activation, argmax action selection)
//! - Newtonian gravity with elastic agent/central-body collisions
//! - Per-tick fitness shaping (proximity, tangential motion, survival, orbit bonuses)
//! - Epoch-based selection with a persisted elite genome pool
//! - Gaussian weight perturbation as the sole variation operator
//! - Supervised backpropagation training as a standalone capability
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::physics`] - Gravity, collision detection and response
//! - [`simulation::body`] - Physical bodies, roles, and trails
//! - [`simulation::rocket`] - Agent behavior, fuel, orbits, fitness
//! - [`simulation::brain`] - Neural network inference, training, mutation
//! - [`simulation::population`] - Population manager and epoch lifecycle
//! - [`simulation::storage`] - Genome pool persistence

/// Core simulation logic and data structures.
pub mod simulation {
    /// Physical bodies with roles, force accumulation, and trails.
    pub mod body;
    /// Neural network implementation for rocket brains.
    pub mod brain;
    /// Simulation parameters.
    pub mod params;
    /// Pure physics functions: gravity, collisions, distance checks.
    pub mod physics;
    /// Population manager and epoch state machine.
    pub mod population;
    /// Rocket agents: thinking, thrust, orbit tracking, fitness.
    pub mod rocket;
    /// Genome pool persistence backends.
    pub mod storage;
}
