//! Regular convex prisms.
//!
//! A prism stores only its primitive pose: centroid, circumradius, rotation and
//! side count. Vertices, edges and normals are derived on every query, so an
//! edit to the pose shows up in the very next trace.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Cauchy;
use crate::ray::Ray;
use crate::segment::intersect_segment;
use crate::vector::{dot, from_angle, length, normalize};

fn default_sides() -> usize {
    3
}

/// A regular polygonal prism made of dispersive glass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prism {
    /// Display name.
    pub name: String,
    /// Centroid in scene units.
    pub pos: Vec2,
    /// Circumradius; must be positive.
    pub size: f32,
    /// Rotation in radians.
    #[serde(default)]
    pub rotation: f32,
    /// Number of sides, 3 for the classic triangular prism.
    #[serde(default = "default_sides")]
    pub sides: usize,
    /// Dispersion of the prism glass.
    #[serde(default)]
    pub glass: Cauchy,
}

impl Prism {
    /// Triangular prism of the default glass.
    pub fn new(name: impl Into<String>, pos: Vec2, size: f32, rotation: f32) -> Self {
        Self {
            name: name.into(),
            pos,
            size,
            rotation,
            sides: default_sides(),
            glass: Cauchy::default(),
        }
    }

    /// Same prism as a regular polygon with `sides` sides.
    pub fn with_sides(mut self, sides: usize) -> Self {
        self.sides = sides;
        self
    }

    /// Same prism made of `glass`.
    pub fn with_glass(mut self, glass: Cauchy) -> Self {
        self.glass = glass;
        self
    }

    /// Vertices in order; vertex 0 points to `-y` at zero rotation.
    ///
    /// Vertex `i` sits at angle `rotation + i·(2π/sides) − π/2` from the centroid.
    pub fn vertices(&self) -> Vec<Vec2> {
        let step = TAU / self.sides as f32;
        (0..self.sides)
            .map(|i| {
                let angle = self.rotation + i as f32 * step - FRAC_PI_2;
                self.pos + from_angle(angle) * self.size
            })
            .collect()
    }

    /// Edges as `(v[i], v[(i + 1) % n])`, closing the loop.
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let vertices = self.vertices();
        let n = vertices.len();
        (0..n).map(|i| (vertices[i], vertices[(i + 1) % n])).collect()
    }

    /// Unit normal of the edge `p1`–`p2` pointing away from the centroid.
    pub fn outward_normal(&self, p1: Vec2, p2: Vec2) -> Vec2 {
        let edge = p2 - p1;
        let normal = normalize(Vec2::new(-edge.y, edge.x));
        let mid = (p1 + p2) * 0.5;
        if dot(normal, mid - self.pos) < 0.0 {
            -normal
        } else {
            normal
        }
    }

    /// Whether `point` lies inside or on the outline.
    pub fn contains(&self, point: Vec2) -> bool {
        self.edges()
            .iter()
            .all(|&(p1, p2)| dot(self.outward_normal(p1, p2), point - p1) <= 0.0)
    }
}

/// Outline of `prism` for drawing and hit-testing.
pub fn vertices_of(prism: &Prism) -> Vec<Vec2> {
    prism.vertices()
}

impl Hittable for Prism {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut window = ray_t;

        for (p1, p2) in self.edges() {
            let Some(hit) = intersect_segment(r, p1, p2) else {
                continue;
            };
            let distance = length(hit.point - r.origin);
            if !window.admits(distance) {
                continue;
            }
            window = window.with_max(distance);

            let mut rec = HitRecord {
                point: hit.point,
                normal: Vec2::ZERO,
                distance,
                front_face: false,
            };
            rec.set_face_normal(r, self.outward_normal(p1, p2));
            closest = Some(rec);
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_prism() -> Prism {
        Prism::new("Prism 1", Vec2::new(350.0, 350.0), 150.0, 0.0)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_vertex_zero_points_up_at_zero_rotation() {
        let v = demo_prism().vertices();
        assert_eq!(v.len(), 3);
        assert!(close(v[0], Vec2::new(350.0, 200.0)));
        assert!(close(v[1], Vec2::new(350.0 + 150.0 * 0.866_025_4, 425.0)));
        assert!(close(v[2], Vec2::new(350.0 - 150.0 * 0.866_025_4, 425.0)));
    }

    #[test]
    fn test_vertices_follow_pose_edits() {
        let mut prism = demo_prism();
        prism.pos = Vec2::new(0.0, 0.0);
        prism.size = 10.0;
        prism.rotation = FRAC_PI_2;
        let v = prism.vertices();
        assert!(close(v[0], Vec2::new(10.0, 0.0)));
        assert!(v.iter().all(|p| (length(*p) - 10.0).abs() < 1e-4));
    }

    #[test]
    fn test_edges_close_the_loop() {
        let prism = demo_prism();
        let v = prism.vertices();
        let e = prism.edges();
        assert_eq!(e.len(), 3);
        assert_eq!(e[2], (v[2], v[0]));
    }

    #[test]
    fn test_square_prism() {
        let square = Prism::new("Cube", Vec2::ZERO, 1.0, 0.0).with_sides(4);
        let v = square.vertices();
        assert_eq!(v.len(), 4);
        assert!(close(v[0], Vec2::new(0.0, -1.0)));
        assert!(close(v[1], Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_outward_normals_point_away_from_centroid() {
        for sides in 3..=8 {
            for rotation in [0.0f32, 0.4, 1.9, 3.3, 5.8] {
                let prism =
                    Prism::new("p", Vec2::new(-20.0, 75.0), 42.0, rotation).with_sides(sides);
                for (p1, p2) in prism.edges() {
                    let n = prism.outward_normal(p1, p2);
                    let mid = (p1 + p2) * 0.5;
                    assert!(dot(n, mid - prism.pos) > 0.0);
                    assert!((length(n) - 1.0).abs() < 1e-5);
                    assert!(dot(n, p2 - p1).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_contains() {
        let prism = demo_prism();
        assert!(prism.contains(prism.pos));
        assert!(prism.contains(Vec2::new(350.0, 400.0)));
        assert!(!prism.contains(Vec2::new(350.0, 430.0)));
        assert!(!prism.contains(Vec2::new(230.0, 250.0)));
    }

    #[test]
    fn test_hit_left_face_from_outside() {
        let prism = demo_prism();
        let ray = Ray::new(Vec2::new(50.0, 350.0), Vec2::X);
        let rec = prism.hit(&ray, Interval::above(0.0)).unwrap();
        let expected_x = 350.0 - 150.0 * 0.866_025_4 * (2.0 / 3.0);
        assert!((rec.point.x - expected_x).abs() < 1e-2);
        assert!((rec.point.y - 350.0).abs() < 1e-3);
        assert!(rec.front_face);
        assert!(dot(rec.normal, ray.direction) < 0.0);
    }

    #[test]
    fn test_hit_from_inside_is_back_face() {
        let prism = demo_prism();
        let ray = Ray::new(prism.pos, Vec2::X);
        let rec = prism.hit(&ray, Interval::above(0.0)).unwrap();
        assert!(!rec.front_face);
        assert!(dot(rec.normal, ray.direction) < 0.0);
    }

    #[test]
    fn test_hit_respects_window() {
        let prism = demo_prism();
        let ray = Ray::new(Vec2::new(50.0, 350.0), Vec2::X);
        assert!(prism.hit(&ray, Interval::new(0.0, 100.0)).is_none());
    }
}
