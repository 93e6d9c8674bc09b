#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::array;
use orbevo::simulation::body::{Body, BodyRole};
use orbevo::simulation::physics;

const G: f32 = 0.1;
const RESTITUTION: f32 = 0.8;

fn central_at(x: f32, y: f32) -> Body {
    Body::new(BodyRole::CentralBody, array![x, y], 1.0, 10.0)
}

fn rocket_at(x: f32, y: f32) -> Body {
    Body::new(BodyRole::Agent, array![x, y], 0.0001, 4.0)
}

fn magnitude(v: &ndarray::Array1<f32>) -> f32 {
    v.dot(v).sqrt()
}

#[test]
fn test_gravity_zero_distance_is_zero_force() {
    let a = rocket_at(400.0, 400.0);
    let b = central_at(400.0, 400.0);

    let force = physics::gravitational_force(&a, &b, G);

    assert_eq!(force[0], 0.0);
    assert_eq!(force[1], 0.0);
    assert!(force.iter().all(|component| component.is_finite()));
}

#[test]
fn test_gravity_points_toward_attractor() {
    let a = rocket_at(300.0, 400.0);
    let b = central_at(400.0, 400.0);

    let force = physics::gravitational_force(&a, &b, G);

    assert!(force[0] > 0.0);
    assert!(force[1].abs() < 1e-12);
}

#[test]
fn test_gravity_inverse_square_falloff() {
    let b = central_at(0.0, 0.0);

    let near = magnitude(&physics::gravitational_force(&rocket_at(50.0, 0.0), &b, G));
    let mid = magnitude(&physics::gravitational_force(&rocket_at(100.0, 0.0), &b, G));
    let far = magnitude(&physics::gravitational_force(&rocket_at(200.0, 0.0), &b, G));

    assert!(near > mid);
    assert!(mid > far);
    // Doubling the distance quarters the force
    assert!((mid / far - 4.0).abs() < 1e-3);
}

#[test]
fn test_circle_collision_reports_geometry() {
    let a = rocket_at(390.0, 400.0);
    let b = central_at(400.0, 400.0);

    let collision = physics::circle_collision(&a, &b);

    assert!(collision.colliding);
    assert_eq!(collision.distance, 10.0);
    assert_eq!(collision.min_dist, 14.0);
    assert_eq!(collision.delta[0], 10.0);
    assert_eq!(collision.delta[1], 0.0);
}

#[test]
fn test_circle_collision_separated() {
    let a = rocket_at(300.0, 400.0);
    let b = central_at(400.0, 400.0);

    let collision = physics::circle_collision(&a, &b);

    assert!(!collision.colliding);
    assert_eq!(collision.distance, 100.0);
}

#[test]
fn test_is_too_far_threshold() {
    let b = central_at(0.0, 0.0);

    assert!(!physics::is_too_far(&rocket_at(600.0, 0.0), &b, 600.0));
    assert!(physics::is_too_far(&rocket_at(600.1, 0.0), &b, 600.0));
}

#[test]
fn test_resolution_when_closing_separates_and_reflects() {
    let mut a = rocket_at(392.0, 400.0);
    a.vel = array![0.5, 0.0]; // moving toward the central body
    let b = central_at(400.0, 400.0);

    let collision = physics::circle_collision(&a, &b);
    assert!(collision.colliding);

    let touched = physics::resolve_elastic_collision(&mut a, &b, &collision, RESTITUTION);
    assert!(touched);

    // Positional correction pushes a out to exactly the minimum distance
    let separation = magnitude(&(&b.pos - &a.pos));
    assert!((separation - collision.min_dist).abs() < 1e-3);

    // Impulse reverses the closing velocity, scaled by restitution
    assert!((a.vel[0] - (-0.5 * RESTITUTION)).abs() < 1e-4);
}

#[test]
fn test_resolution_when_separating_leaves_velocity_unchanged() {
    let mut a = rocket_at(392.0, 400.0);
    a.vel = array![-0.5, 0.0]; // already moving away
    let b = central_at(400.0, 400.0);

    let collision = physics::circle_collision(&a, &b);
    let touched = physics::resolve_elastic_collision(&mut a, &b, &collision, RESTITUTION);

    assert!(touched);
    assert_eq!(a.vel[0], -0.5);
    assert_eq!(a.vel[1], 0.0);
}

#[test]
fn test_resolution_coincident_centers_is_a_non_event() {
    let mut a = rocket_at(400.0, 400.0);
    a.vel = array![0.3, -0.2];
    let b = central_at(400.0, 400.0);

    let collision = physics::circle_collision(&a, &b);
    let touched = physics::resolve_elastic_collision(&mut a, &b, &collision, RESTITUTION);

    assert!(!touched);
    assert_eq!(a.pos[0], 400.0);
    assert_eq!(a.vel[0], 0.3);
}

#[test]
fn test_central_body_is_never_displaced() {
    let mut a = rocket_at(392.0, 400.0);
    a.vel = array![0.5, 0.0];
    let b = central_at(400.0, 400.0);
    let b_pos_before = b.pos.clone();
    let b_vel_before = b.vel.clone();

    let collision = physics::circle_collision(&a, &b);
    physics::resolve_elastic_collision(&mut a, &b, &collision, RESTITUTION);

    assert_eq!(b.pos, b_pos_before);
    assert_eq!(b.vel, b_vel_before);
}
