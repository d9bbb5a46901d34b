//! Glass model for the prisms.
//!
//! Dispersion comes from a two-term Cauchy equation; refraction at a surface is
//! vector Snell's law with total internal reflection reported explicitly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::hittable::HitRecord;
use crate::vector::dot;

/// Refractive index of the medium around the prisms.
pub const AIR_INDEX: f32 = 1.0;

/// Two-term Cauchy dispersion, `n = a + b / λ²` with λ in micrometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cauchy {
    /// Constant term, roughly the index at long wavelengths.
    pub a: f32,
    /// Dispersion strength in µm².
    pub b: f32,
}

impl Cauchy {
    /// Crown-like glass used for every prism unless a scene says otherwise.
    pub const CROWN: Cauchy = Cauchy { a: 1.5046, b: 0.012 };

    /// Glass with the given Cauchy coefficients.
    pub fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    /// Refractive index at `wavelength_nm`.
    ///
    /// Index falls as wavelength grows, so violet bends more than red.
    pub fn index_at(&self, wavelength_nm: f32) -> f32 {
        let l = wavelength_nm / 1000.0;
        self.a + self.b / (l * l)
    }
}

impl Default for Cauchy {
    fn default() -> Self {
        Self::CROWN
    }
}

/// Refractive index of the default prism glass at `wavelength_nm`.
pub fn index_of_refraction(wavelength_nm: f32) -> f32 {
    Cauchy::CROWN.index_at(wavelength_nm)
}

/// Result of refracting a direction through a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// Light crosses the surface with this new direction.
    Transmitted(Vec2),
    /// The transmitted angle would exceed 90°; nothing crosses.
    TotalInternalReflection,
}

impl Refraction {
    /// Transmitted direction, or the zero vector on total internal reflection.
    pub fn into_direction(self) -> Vec2 {
        match self {
            Refraction::Transmitted(direction) => direction,
            Refraction::TotalInternalReflection => Vec2::ZERO,
        }
    }
}

/// Refract `incident` through a surface with `normal` facing against it,
/// going from index `n1` into index `n2`.
pub fn refract(incident: Vec2, normal: Vec2, n1: f32, n2: f32) -> Refraction {
    let cos_i = -dot(incident, normal);
    let ratio = n1 / n2;
    let sin2_t = ratio * ratio * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return Refraction::TotalInternalReflection;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Refraction::Transmitted(incident * ratio + normal * (ratio * cos_i - cos_t))
}

/// Indices and facing normal on both sides of a hit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interface {
    /// Index on the incident side.
    pub n1: f32,
    /// Index on the transmitted side.
    pub n2: f32,
    /// Surface normal pointing against the incident ray.
    pub normal: Vec2,
}

impl Interface {
    /// Resolve the interface for a hit on a prism made of `glass`.
    ///
    /// Entering goes air → glass; exiting goes glass → air. `rec.normal`
    /// already faces the incident ray.
    pub fn at(rec: &HitRecord, glass: &Cauchy, wavelength_nm: f32) -> Self {
        let n_glass = glass.index_at(wavelength_nm);
        let (n1, n2) = if rec.front_face {
            (AIR_INDEX, n_glass)
        } else {
            (n_glass, AIR_INDEX)
        };
        Self {
            n1,
            n2,
            normal: rec.normal,
        }
    }

    /// Refract `incident` through this interface.
    pub fn refract(&self, incident: Vec2) -> Refraction {
        refract(incident, self.normal, self.n1, self.n2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{from_angle, length, normalize};

    #[test]
    fn test_sodium_d_line_index() {
        let n = index_of_refraction(589.3);
        let expected = 1.5046 + 0.012 / (0.5893 * 0.5893);
        assert!((n - expected).abs() < 1e-5);
        assert!((n - 1.5392).abs() < 1e-3);
    }

    #[test]
    fn test_index_decreases_with_wavelength() {
        let mut previous = index_of_refraction(400.0);
        let mut wl = 410.0;
        while wl <= 700.0 {
            let n = index_of_refraction(wl);
            assert!(n < previous, "index should fall at {wl} nm");
            previous = n;
            wl += 10.0;
        }
    }

    #[test]
    fn test_custom_glass() {
        let flint = Cauchy::new(1.67, 0.0074);
        assert!(flint.index_at(550.0) > index_of_refraction(550.0));
        assert_eq!(Cauchy::default(), Cauchy::CROWN);
    }

    #[test]
    fn test_normal_incidence_passes_straight() {
        let out = refract(Vec2::X, -Vec2::X, 1.0, 1.5).into_direction();
        assert!((out - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_equal_indices_leave_direction_unchanged() {
        for deg in [-80.0f32, -45.0, -10.0, 0.0, 30.0, 60.0, 89.0] {
            let d = from_angle(deg.to_radians());
            // Normal facing against the incident direction.
            let n = -normalize(Vec2::new(1.0, 0.3));
            if dot(d, n) > 0.0 {
                continue;
            }
            let out = refract(d, n, 1.5, 1.5).into_direction();
            assert!((out - d).length() < 1e-5, "changed at {deg}°: {out:?}");
        }
    }

    #[test]
    fn test_entering_bends_toward_normal() {
        let incident = from_angle(30f32.to_radians());
        let normal = -Vec2::X;
        let Refraction::Transmitted(out) = refract(incident, normal, 1.0, 1.5) else {
            panic!("unexpected total internal reflection");
        };
        let sin_t = out.y / length(out);
        assert!((sin_t - 0.5 / 1.5).abs() < 1e-5);
        assert!((length(out) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection_past_critical_angle() {
        let n = 1.5;
        let critical = (1.0f32 / n).asin();
        let normal = -Vec2::X;

        let steep = from_angle(critical + 0.05);
        assert_eq!(refract(steep, normal, n, 1.0), Refraction::TotalInternalReflection);
        assert_eq!(refract(steep, normal, n, 1.0).into_direction(), Vec2::ZERO);

        let shallow = from_angle(critical - 0.05);
        assert!(matches!(refract(shallow, normal, n, 1.0), Refraction::Transmitted(_)));
    }

    #[test]
    fn test_interface_swaps_indices_on_exit() {
        let mut rec = HitRecord {
            point: Vec2::ZERO,
            normal: -Vec2::X,
            distance: 5.0,
            front_face: true,
        };
        let entering = Interface::at(&rec, &Cauchy::CROWN, 589.3);
        assert_eq!(entering.n1, AIR_INDEX);
        assert!((entering.n2 - index_of_refraction(589.3)).abs() < 1e-6);

        rec.front_face = false;
        let exiting = Interface::at(&rec, &Cauchy::CROWN, 589.3);
        assert_eq!(exiting.n2, AIR_INDEX);
        assert_eq!(exiting.n1, entering.n2);
    }
}
