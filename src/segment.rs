//! Ray versus line-segment intersection.

use glam::Vec2;

use crate::interval::Interval;
use crate::ray::Ray;

/// Below this `|cross(direction, edge)|` the ray counts as parallel to the edge.
pub const PARALLEL_EPSILON: f32 = 1e-3;

/// Smallest ray parameter accepted as a hit.
///
/// Rejects the ray's own origin when it sits on a surface.
pub const MIN_RAY_PARAM: f32 = 0.01;

/// Where a ray crosses a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Intersection point.
    pub point: Vec2,
    /// Ray parameter of the hit.
    pub t: f32,
    /// Position along the segment, 0 at `p1` and 1 at `p2`.
    pub s: f32,
}

/// Intersect `ray` with the segment `p1`–`p2`.
///
/// Solves `origin + t·dir = p1 + s·(p2 − p1)` by Cramer's rule. A hit needs
/// `t > MIN_RAY_PARAM` and `s` within `[0, 1]`; near-parallel pairs never hit.
pub fn intersect_segment(ray: &Ray, p1: Vec2, p2: Vec2) -> Option<SegmentHit> {
    let dir = ray.direction;
    let edge = p2 - p1;
    let denom = dir.x * edge.y - dir.y * edge.x;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let diff = ray.origin - p1;
    let t = (diff.y * edge.x - diff.x * edge.y) / denom;
    let s = (diff.y * dir.x - diff.x * dir.y) / denom;

    if Interval::above(MIN_RAY_PARAM).surrounds(t) && Interval::UNIT.contains(s) {
        Some(SegmentHit {
            point: p1 + edge * s,
            t,
            s,
        })
    } else {
        None
    }
}
