//! Physical bodies: state, force accumulation, integration, and trails.
//!
//! A [`Body`] is either the fixed central body or a rocket's physical shell,
//! distinguished by [`BodyRole`]. All physics operates on these fields only;
//! agent behavior lives in [`super::rocket`].

use ndarray::{Array1, array};

use super::params::Params;
use super::physics;

/// Role of a body in the simulation, determining gravity and collision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    /// The fixed massive body rockets orbit. Does not integrate motion.
    CentralBody,
    /// A rocket's physical shell. Integrates motion and can collide.
    Agent,
}

/// A gravitating physical object.
#[derive(Debug, Clone)]
pub struct Body {
    /// Role of this body.
    pub role: BodyRole,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Velocity.
    pub vel: Array1<f32>,
    /// Acceleration, cleared after each integration.
    pub acc: Array1<f32>,
    /// Accumulated force for the current tick, cleared after integration.
    pub force: Array1<f32>,
    /// Mass.
    pub mass: f32,
    /// Collision radius.
    pub radius: f32,
    /// Set when a disabling collision has been registered.
    pub touched: bool,
    /// Set when the body has exceeded the maximum interaction distance.
    pub out_of_range: bool,
    /// Bounded history of past positions, oldest first.
    pub trail: Vec<Array1<f32>>,
}

impl Body {
    /// Creates a body at rest at the given position.
    pub fn new(role: BodyRole, pos: Array1<f32>, mass: f32, radius: f32) -> Self {
        let trail = vec![pos.clone()];
        Self {
            role,
            pos,
            vel: Array1::zeros(2),
            acc: Array1::zeros(2),
            force: Array1::zeros(2),
            mass,
            radius,
            touched: false,
            out_of_range: false,
            trail,
        }
    }

    /// Creates the central body from the configured position, mass, and radius.
    pub fn central(params: &Params) -> Self {
        Self::new(
            BodyRole::CentralBody,
            array![params.central_position.0, params.central_position.1],
            params.central_mass,
            params.central_radius,
        )
    }

    /// Accumulates a force for the current tick.
    pub fn add_force(&mut self, force: &Array1<f32>) {
        self.force += force;
    }

    /// Accumulates gravitational attraction toward `other`.
    ///
    /// Skipped when `other` is an agent, when the pair already overlaps, or
    /// when the positions coincide.
    pub fn apply_gravitation(&mut self, other: &Body, params: &Params) {
        match other.role {
            BodyRole::Agent => return,
            BodyRole::CentralBody => {}
        }

        let collision = physics::circle_collision(self, other);
        if collision.distance == 0.0 {
            return;
        }

        if collision.distance >= collision.min_dist {
            let force = physics::gravitational_force(self, other, params.gravitational_constant);
            self.add_force(&force);
        }
    }

    /// Checks and resolves a collision against `other`, marking `touched` on
    /// contact. Only agents colliding with the central body are handled.
    pub fn handle_collision(&mut self, other: &Body, params: &Params) {
        if self.role != BodyRole::Agent || other.role != BodyRole::CentralBody {
            return;
        }

        let collision = physics::circle_collision(self, other);
        if collision.colliding
            && physics::resolve_elastic_collision(self, other, &collision, params.restitution)
        {
            self.touched = true;
        }
    }

    /// Integrates Newtonian motion from the accumulated force, then clears
    /// force and acceleration for the next tick. Central bodies are fixed and
    /// do not integrate.
    pub fn integrate(&mut self, params: &Params) {
        match self.role {
            BodyRole::CentralBody => return,
            BodyRole::Agent => {}
        }

        self.acc.scaled_add(1.0 / self.mass, &self.force);
        self.vel.scaled_add(params.time_step, &self.acc);
        self.pos += &self.vel;

        self.force.fill(0.0);
        self.acc.fill(0.0);
    }

    /// Appends the current position to the trail. When the trail exceeds its
    /// capacity the two oldest points are evicted, not one, so the retained
    /// length follows a sawtooth around the capacity.
    pub fn record_trail(&mut self, capacity: usize) {
        self.trail.push(self.pos.clone());
        if self.trail.len() > capacity {
            let evict = self.trail.len().min(2);
            self.trail.drain(..evict);
        }
    }
}
