//! 2D vector helpers on top of `glam::Vec2`.
//!
//! Thin wrappers that pin down the normalization policy the tracer relies on:
//! a near-zero vector normalizes to `+x` instead of producing NaNs.

use glam::Vec2;

/// Vectors shorter than this normalize to [`FALLBACK_DIRECTION`].
pub const DEGENERATE_LENGTH: f32 = 1e-3;

/// Direction returned when normalizing a degenerate vector.
pub const FALLBACK_DIRECTION: Vec2 = Vec2::X;

/// Euclidean length of `v`.
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Normalize `v` to unit length.
///
/// Returns `(1, 0)` when `length(v) < DEGENERATE_LENGTH`. Callers must treat
/// that as a valid direction, not an error.
pub fn normalize(v: Vec2) -> Vec2 {
    let len = length(v);
    if len < DEGENERATE_LENGTH {
        FALLBACK_DIRECTION
    } else {
        v / len
    }
}

/// Inner product of `a` and `b`.
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// Unit direction for an angle in radians, measured from `+x` toward `+y`.
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_of_3_4_is_5() {
        assert_eq!(length(Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_normalize_gives_unit_length() {
        let n = normalize(Vec2::new(-7.0, 24.0));
        assert!((length(n) - 1.0).abs() < 1e-6);
        assert!((n.x + 7.0 / 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_degenerate_falls_back_to_x() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::X);
        assert_eq!(normalize(Vec2::new(5e-4, -5e-4)), Vec2::X);
    }

    #[test]
    fn test_normalize_just_above_threshold() {
        let n = normalize(Vec2::new(0.0, 2e-3));
        assert!((n - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(Vec2::new(1.0, 2.0), Vec2::new(3.0, -4.0)), -5.0);
        assert_eq!(dot(Vec2::X, Vec2::Y), 0.0);
    }

    #[test]
    fn test_from_angle() {
        let d = from_angle(std::f32::consts::FRAC_PI_2);
        assert!((d - Vec2::Y).length() < 1e-6);
        assert_eq!(from_angle(0.0), Vec2::X);
    }
}
