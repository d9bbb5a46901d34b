//! Ray representation for 2D propagation.
//!
//! A ray is defined as r(t) = origin + t * direction, a half-line in the
//! scene plane used for surface intersection queries.

use glam::Vec2;

/// Ray in the scene plane defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in scene units.
    ///
    /// The light source position for the first leg, or a point just past the
    /// last surface for later legs.
    pub origin: Vec2,

    /// Direction of travel.
    ///
    /// The tracer keeps this normalized, so `t` equals distance travelled.
    pub direction: Vec2,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + t * self.direction
    }
}
