//! Force laws for the sandbox
//!
//! Every law here produces a per-tick velocity delta rather than a force, and
//! pair laws use one sign convention: a positive magnitude pushes the pair
//! apart, a negative one pulls it together. [`pair_delta`] turns a magnitude
//! into the delta for the first body; the second body always receives the
//! exact negation.

use glam::Vec2;

/// Separations below this have no usable direction and produce no delta.
const DIRECTION_EPSILON: f32 = 1.0e-6;

/// Velocity delta for body `a` from a pair magnitude acting between `a` and `b`.
///
/// Body `b` receives `-pair_delta(a, b, magnitude)`.
pub fn pair_delta(a: Vec2, b: Vec2, magnitude: f32) -> Vec2 {
    let axis = b - a;
    let dist = axis.length();
    if dist < DIRECTION_EPSILON || !magnitude.is_finite() {
        return Vec2::ZERO;
    }
    -(axis / dist) * magnitude
}

/// Electromagnetic magnitude: q1 * q2 * k / max(d, d_min)^2
///
/// Like charges give a positive (repulsive) magnitude.
pub fn electromagnetic_magnitude(q1: f32, q2: f32, k: f32, dist: f32, min_dist: f32) -> f32 {
    let r = dist.max(min_dist);
    q1 * q2 * k / (r * r)
}

/// Nuclear magnitude: k / max(d, d_min), zero beyond `threshold`.
///
/// `k` is expected to be negative so nucleons pull together.
pub fn nuclear_magnitude(k: f32, dist: f32, threshold: f32, min_dist: f32) -> f32 {
    if dist >= threshold {
        return 0.0;
    }
    k / dist.max(min_dist)
}

/// Gravity magnitude: -k / max(d, d_min)^2 (always attractive for k >= 0)
pub fn gravity_magnitude(k: f32, dist: f32, min_dist: f32) -> f32 {
    let r = dist.max(min_dist);
    -k / (r * r)
}

/// Short-range proton/electron capture pull: -strength / (d + 1) within `range`
pub fn capture_magnitude(strength: f32, dist: f32, range: f32) -> f32 {
    if dist >= range {
        return 0.0;
    }
    -strength / (dist + 1.0)
}

/// One-directional gravity pull of a massive body at `source` on a body at `target`.
pub fn gravity_pull(target: Vec2, source: Vec2, k: f32, min_dist: f32) -> Vec2 {
    let dist = target.distance(source);
    pair_delta(target, source, gravity_magnitude(k, dist, min_dist))
}

/// Point attractor pull toward `point`, scaled by inverse distance, inside `radius`.
pub fn attractor_delta(position: Vec2, point: Vec2, radius: f32, strength: f32) -> Vec2 {
    let dist = position.distance(point);
    if dist >= radius {
        return Vec2::ZERO;
    }
    pair_delta(position, point, -strength / (dist + 1.0))
}
