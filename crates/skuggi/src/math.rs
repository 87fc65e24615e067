//! Math types, glam re-exports, and the geometry kernel.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. The free functions here are the rotation and
//! coordinate helpers the projector and the batch renderer are built on.
//!
//! ## Rotation order matters
//!
//! [`rotate_about_pivot`] is deliberately *not* a composed yaw-pitch-roll
//! matrix. It applies three independent 2D rotations in the fixed order
//! X, then Y, then Z, each one reusing the coordinates produced by the
//! previous step. Two single-axis calls chained together therefore give a
//! different result than one call with both angles set — every visual in the
//! engine depends on this exact sequencing, so it must never be "fixed" into
//! a proper 3D rotation.

pub use glam::{Mat4, Vec2, Vec3};

use std::f32::consts::TAU;

/// Rotate `point` about `pivot` by the given per-axis angles (radians).
///
/// The point is translated so the pivot sits at the origin, rotated about
/// X, then Y, then Z (counter-clockwise, right-handed), and translated back.
/// Axes with an angle of exactly `0.0` are skipped; rotation by zero is an
/// identity, so this only saves the trig calls.
pub fn rotate_about_pivot(point: Vec3, pivot: Vec3, angles: Vec3) -> Vec3 {
    let mut p = point - pivot;

    if angles.x != 0.0 {
        let (s, c) = angles.x.sin_cos();
        p = Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c);
    }
    if angles.y != 0.0 {
        let (s, c) = angles.y.sin_cos();
        p = Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c);
    }
    if angles.z != 0.0 {
        let (s, c) = angles.z.sin_cos();
        p = Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z);
    }

    p + pivot
}

/// True mathematical modulo: the result has the sign of `modulo`.
///
/// The `%` operator is a remainder and goes negative for negative input,
/// which corrupts angle normalization and grid indexing. `modulo(-1.0, 4.0)`
/// is `3.0`, not `-1.0`.
pub fn modulo(number: f32, modulo: f32) -> f32 {
    ((number % modulo) + modulo) % modulo
}

/// Angle of the vector from `a` to `b`, normalized into `[0, 2π)`.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    modulo((b.y - a.y).atan2(b.x - a.x), TAU)
}

/// Integer lattice points within `radius + 0.5` of the rounded center,
/// sorted nearest-first by distance to the *unrounded* center.
///
/// Radius 0 yields exactly one point: the rounded center. The half-cell
/// slack means a radius-1 disc picks up the four von-Neumann neighbors and
/// the diagonals. Z is carried through from the rounded center untouched —
/// the disc lives in the X/Y ground plane.
pub fn coordinates_in_disc(center: Vec3, radius: f32) -> Vec<Vec3> {
    let snapped = center.round();
    let reach = radius + 0.5;
    let span = reach.ceil() as i32;

    let mut points = Vec::new();
    for dy in -span..=span {
        for dx in -span..=span {
            let offset = Vec2::new(dx as f32, dy as f32);
            if offset.length() <= reach {
                points.push(Vec3::new(snapped.x + offset.x, snapped.y + offset.y, snapped.z));
            }
        }
    }

    points.sort_by(|a, b| {
        let da = (*a - center).truncate().length_squared();
        let db = (*b - center).truncate().length_squared();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    points
}
