//! Pure physics functions for gravity, collision detection, and collision response.
//!
//! All positions and velocities are `Array1<f32>` of length 2. Degenerate inputs
//! (coincident bodies) resolve to explicit fallbacks instead of errors: zero
//! force, skipped resolution.

use ndarray::Array1;

use super::body::Body;

/// Result of a circle/circle overlap test.
#[derive(Debug, Clone)]
pub struct Collision {
    /// Whether the bounding circles overlap.
    pub colliding: bool,
    /// Displacement from `a` to `b`.
    pub delta: Array1<f32>,
    /// Euclidean distance between the centers.
    pub distance: f32,
    /// Sum of both radii (minimum non-overlapping distance).
    pub min_dist: f32,
}

/// Inverse-square gravitational force on `a` from `b`.
///
/// Returns the zero vector when the two positions coincide.
pub fn gravitational_force(a: &Body, b: &Body, gravitational_constant: f32) -> Array1<f32> {
    let delta = &b.pos - &a.pos;
    let distance_squared = delta.dot(&delta);
    let distance = distance_squared.sqrt();

    if distance == 0.0 {
        return Array1::zeros(2);
    }

    let magnitude = gravitational_constant * a.mass * b.mass / distance_squared;
    delta * (magnitude / distance)
}

/// Tests whether the bounding circles of two bodies overlap.
pub fn circle_collision(a: &Body, b: &Body) -> Collision {
    let delta = &b.pos - &a.pos;
    let distance = delta.dot(&delta).sqrt();
    let min_dist = a.radius + b.radius;

    Collision {
        colliding: distance < min_dist,
        delta,
        distance,
        min_dist,
    }
}

/// Distance threshold test used to terminate rockets that escape the gravity well.
pub fn is_too_far(a: &Body, b: &Body, max_distance: f32) -> bool {
    let delta = &b.pos - &a.pos;
    delta.dot(&delta).sqrt() > max_distance
}

/// Resolves an elastic collision asymmetrically: only `a` is pushed out and
/// receives an impulse. The massive body `b` is never displaced.
///
/// Positional correction always applies on overlap; the impulse applies only
/// when the bodies are closing along the collision normal. Coincident centers
/// are a non-event.
///
/// Returns whether `a` registered contact.
pub fn resolve_elastic_collision(
    a: &mut Body,
    b: &Body,
    collision: &Collision,
    restitution: f32,
) -> bool {
    if collision.distance == 0.0 {
        return false;
    }

    let overlap = collision.min_dist - collision.distance;
    let normal = &collision.delta / collision.distance;

    a.pos.scaled_add(-overlap, &normal);

    let relative = &a.vel - &b.vel;
    let closing = relative.dot(&normal);

    if closing <= 0.0 {
        return true;
    }

    let impulse = -(1.0 + restitution) * closing;
    a.vel.scaled_add(impulse, &normal);

    true
}
