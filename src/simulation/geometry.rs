//! Pure geometric helpers: local-frame transforms, angles, distances.
//!
//! Boids fly towards their local +Y axis, with positive X to their left. Every
//! angle in the crate is measured in radians with that convention, so the
//! functions here are the single source of truth for frame conversions.

use ndarray::Array1;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Result of a visibility test against an observer's vision cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    /// Whether the point falls inside the cone.
    pub is_visible: bool,
    /// Raw angle to the point in the observer's local frame, from [`angle_to_point`].
    pub angle: f32,
}

/// Rotates `target - origin` into the observer's heading-aligned frame.
///
/// The observer's heading becomes local +Y. Returns `(lx, ly)`.
pub fn local_coordinates(origin: &Array1<f32>, rotation: f32, target: &Array1<f32>) -> (f32, f32) {
    let dx = target[0] - origin[0];
    let dy = target[1] - origin[1];
    let (sin, cos) = (rotation.sin(), rotation.cos());

    let lx = dx * cos + dy * sin;
    let ly = -dx * sin + dy * cos;
    (lx, ly)
}

/// Angle from the origin to `(x, y)`.
///
/// `atan(y/x)` with the standard quadrant correction of `+π` when `x < 0`,
/// which is the two-argument arctangent shifted into this frame.
pub fn angle_to_point(x: f32, y: f32) -> f32 {
    let angle = (y / x).atan();
    if x < 0.0 { angle + PI } else { angle }
}

/// Tests whether a point in local coordinates falls inside the vision cone.
///
/// The cone is symmetric around the observer's heading (local +Y), extending
/// `vision_angle` radians to either side. A zero angle sees nothing; `π` sees
/// every bearing.
pub fn visibility(vision_angle: f32, local_x: f32, local_y: f32) -> Visibility {
    let angle = angle_to_point(local_x, local_y);

    // Bearing measured from the local +Y axis, normalized to [0, 2π).
    let mut bearing = angle - FRAC_PI_2;
    if bearing < 0.0 {
        bearing += TAU;
    }

    // A degenerate cone sees nothing; otherwise the edge of the cone counts as
    // visible so a π half-angle covers every bearing, including dead astern.
    let is_visible =
        vision_angle > 0.0 && (bearing <= vision_angle || bearing >= TAU - vision_angle);

    Visibility { is_visible, angle }
}

/// Normalizes an angle into `[0, modulus)` by removing whole wraps.
pub fn unwrap_mod(angle: f32, modulus: f32) -> f32 {
    if angle > 0.0 && angle < modulus {
        return angle;
    }
    let wraps = (angle / modulus).floor();
    angle - wraps * modulus
}

/// Normalizes an angle into the canonical `[0, 2π)` range.
pub fn unwrap_angle(angle: f32) -> f32 {
    unwrap_mod(angle, TAU)
}

/// Squared Euclidean distance with an early-exit cap.
///
/// Returns `None` when either axis delta alone exceeds `max_radius`, meaning
/// "definitely farther than the cap" without computing the full product. All
/// radius comparisons in the crate happen in squared space; no square root is
/// taken here.
pub fn squared_distance(
    p1: &Array1<f32>,
    p2: &Array1<f32>,
    max_radius: Option<f32>,
) -> Option<f32> {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];

    if let Some(cap) = max_radius {
        if dx.abs() > cap || dy.abs() > cap {
            return None;
        }
    }

    Some(dx * dx + dy * dy)
}

// Parabolic sine approximation constants, with the classic 0.225 precision
// correction term. Absolute error stays below ~1e-3 over the full circle.
const SIN_B: f32 = 4.0 / PI;
const SIN_C: f32 = -4.0 / (PI * PI);
const SIN_P: f32 = 0.225;

/// Fast sine approximation, accurate to about three decimal places.
///
/// Used by the integrator's position advance, where the approximation error is
/// far below a pixel per tick.
pub fn fast_sin(x: f32) -> f32 {
    // Wrap into [-π, π).
    let x = x - TAU * ((x + PI) / TAU).floor();

    let y = SIN_B * x + SIN_C * x * x.abs();
    SIN_P * (y * y.abs() - y) + y
}

/// Fast cosine approximation via the shifted [`fast_sin`].
pub fn fast_cos(x: f32) -> f32 {
    fast_sin(x + FRAC_PI_2)
}
