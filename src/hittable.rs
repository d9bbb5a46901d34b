//! Ray-surface intersection bookkeeping.
//!
//! Defines the Hittable trait for obstacles and HitRecord for the nearest
//! surface crossing along a ray.

use glam::Vec2;

use crate::interval::Interval;
use crate::ray::Ray;

/// Ray-surface intersection information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray crosses the surface
    pub point: Vec2,
    /// Surface normal at the hit, unit length, facing against the incident ray
    pub normal: Vec2,
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// True if the ray enters the obstacle, false if it is leaving it
    pub front_face: bool,
}

impl HitRecord {
    /// Set surface normal and determine front/back face.
    ///
    /// `outward_normal` must point away from the obstacle interior. A ray
    /// travelling along it is inside and leaving.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec2) {
        self.front_face = r.direction.dot(outward_normal) <= 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for obstacles that rays can cross.
///
/// Must be thread-safe (Sync + Send) so rays can be traced in parallel.
pub trait Hittable: Sync + Send {
    /// Nearest crossing whose distance lies in `ray_t` (closed below, open above).
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Nearest hit over `objects`, with the index of the object that was hit.
///
/// Uses linear search. On equal distances the earlier object wins.
pub fn closest_hit<H: Hittable>(
    objects: &[H],
    r: &Ray,
    ray_t: Interval,
) -> Option<(usize, HitRecord)> {
    let mut closest = None;
    let mut closest_so_far = ray_t.max;

    for (index, object) in objects.iter().enumerate() {
        if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
            closest_so_far = rec.distance;
            closest = Some((index, rec));
        }
    }

    closest
}
