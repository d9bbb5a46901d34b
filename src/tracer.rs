//! Per-wavelength ray propagation through the prisms.
//!
//! Each base ray is followed from the source, surface to surface, refracting
//! at every crossing until it leaves the scene, is caught by total internal
//! reflection, or runs out of bounces. Passes share no state; every call
//! retraces from the current scene parameters.

use std::time::Instant;

use glam::Vec2;
use image::Rgb;
use log::{debug, trace};
use rayon::prelude::*;

use crate::hittable::closest_hit;
use crate::interval::Interval;
use crate::material::{Interface, Refraction};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::spectrum::BaseRay;
use crate::vector::{length, normalize};

/// Surface crossings followed per ray before giving up.
pub const MAX_BOUNCES: usize = 10;

/// Hits closer than this to the current origin are ignored.
///
/// Together with [`ADVANCE_BIAS`] this keeps a ray from re-hitting the surface
/// it just crossed. Tuned for scenes measured in hundreds of units.
pub const HIT_BIAS: f32 = 1.0;

/// How far past a surface the next leg starts.
pub const ADVANCE_BIAS: f32 = 0.1;

/// Length of the final leg drawn for a ray that leaves the scene.
pub const ESCAPE_DISTANCE: f32 = 2000.0;

/// Refracted directions shorter than this end the ray.
pub const MIN_DIRECTION_LENGTH: f32 = 0.1;

/// How a traced ray ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Left the scene; the last point is the escape point.
    Escaped,
    /// Stopped at a surface where it could not refract out.
    TotalInternalReflection,
    /// Still bouncing when the bounce limit ran out.
    MaxBounces,
}

/// Polyline followed by one wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedRay {
    /// Wavelength in nanometers.
    pub wavelength: f32,
    /// Display color of the wavelength.
    pub color: Rgb<u8>,
    /// Path vertices, starting at the source.
    pub points: Vec<Vec2>,
    /// Why tracing stopped.
    pub outcome: Outcome,
}

impl TracedRay {
    /// True when the ray escaped the scene.
    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Escaped
    }
}

/// Tracing parameters.
///
/// Defaults are the named constants in this module; rescale them together if
/// the scene units change.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracer {
    /// Maximum surface crossings per ray
    pub max_bounces: usize,
    /// Minimum distance from the current origin to an accepted hit
    pub hit_bias: f32,
    /// Offset applied past each crossed surface
    pub advance_bias: f32,
    /// Length of the escape leg
    pub escape_distance: f32,
    /// Shortest refracted direction still followed
    pub min_direction_length: f32,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer {
    /// Tracer using the default constants.
    pub fn new() -> Self {
        Self {
            max_bounces: MAX_BOUNCES,
            hit_bias: HIT_BIAS,
            advance_bias: ADVANCE_BIAS,
            escape_distance: ESCAPE_DISTANCE,
            min_direction_length: MIN_DIRECTION_LENGTH,
        }
    }

    /// Trace every base ray through `scene`.
    ///
    /// Rays are independent and traced in parallel; the output keeps the
    /// order of `base_rays`.
    pub fn trace(&self, scene: &Scene, base_rays: &[BaseRay]) -> Vec<TracedRay> {
        let start = Instant::now();

        let rays: Vec<TracedRay> = base_rays
            .par_iter()
            .map(|base| self.trace_ray(scene, base))
            .collect();

        let count = |outcome: Outcome| rays.iter().filter(|r| r.outcome == outcome).count();
        debug!(
            "Traced {} rays through {} prisms in {:.2?}: {} escaped, {} TIR, {} out of bounces",
            rays.len(),
            scene.prisms.len(),
            start.elapsed(),
            count(Outcome::Escaped),
            count(Outcome::TotalInternalReflection),
            count(Outcome::MaxBounces),
        );

        rays
    }

    /// Follow a single wavelength from the source.
    pub fn trace_ray(&self, scene: &Scene, base: &BaseRay) -> TracedRay {
        let mut r = Ray::new(scene.source.pos, scene.source.direction());
        let mut points = vec![r.origin];

        let finish = |points: Vec<Vec2>, outcome: Outcome| TracedRay {
            wavelength: base.wavelength,
            color: base.color,
            points,
            outcome,
        };

        for bounce in 0..self.max_bounces {
            let window = Interval::above(self.hit_bias);
            let Some((index, rec)) = closest_hit(&scene.prisms, &r, window) else {
                points.push(r.at(self.escape_distance));
                return finish(points, Outcome::Escaped);
            };
            points.push(rec.point);

            let interface = Interface::at(&rec, &scene.prisms[index].glass, base.wavelength);
            trace!(
                "{:.1} nm bounce {}: {} '{}' at ({:.2}, {:.2}), n {:.4} -> {:.4}",
                base.wavelength,
                bounce,
                if rec.front_face { "entering" } else { "leaving" },
                scene.prisms[index].name,
                rec.point.x,
                rec.point.y,
                interface.n1,
                interface.n2,
            );

            let direction = match interface.refract(r.direction) {
                Refraction::Transmitted(d) if length(d) >= self.min_direction_length => {
                    normalize(d)
                }
                _ => {
                    trace!("{:.1} nm stopped by total internal reflection", base.wavelength);
                    return finish(points, Outcome::TotalInternalReflection);
                }
            };

            r = Ray::new(rec.point + direction * self.advance_bias, direction);
        }

        finish(points, Outcome::MaxBounces)
    }
}

/// Trace `base_rays` through `scene` with default parameters.
pub fn trace(scene: &Scene, base_rays: &[BaseRay]) -> Vec<TracedRay> {
    Tracer::new().trace(scene, base_rays)
}
