//! Visible spectrum sampling and wavelength → display color mapping.

use image::Rgb;

/// Shortest sampled wavelength in nanometers.
pub const WAVELENGTH_MIN: f32 = 400.0;
/// Longest sampled wavelength in nanometers.
pub const WAVELENGTH_MAX: f32 = 700.0;
/// Number of base rays spanning the visible range.
pub const RAY_COUNT: usize = 50;

/// Display color for a wavelength in nanometers.
///
/// Piecewise linear over the visible bands, red at 700 nm through violet at
/// 400 nm. Band boundaries sit at 450, 495, 570, 590 and 620 nm.
pub fn color_for_wavelength(wl: f32) -> Rgb<u8> {
    if wl >= 620.0 {
        Rgb([255, 0, 0])
    } else if wl >= 590.0 {
        let f = (wl - 590.0) / 30.0;
        Rgb([255, (165.0 * (1.0 - f)) as u8, 0])
    } else if wl >= 570.0 {
        Rgb([255, 255, 0])
    } else if wl >= 495.0 {
        let f = (wl - 495.0) / 75.0;
        Rgb([(255.0 * f) as u8, 255, 0])
    } else if wl >= 450.0 {
        let f = (wl - 450.0) / 45.0;
        Rgb([0, (255.0 * f) as u8, 255])
    } else {
        let f = (wl - 400.0) / 50.0;
        Rgb([(148.0 * (1.0 - f)) as u8, 0, (211.0 + 44.0 * f) as u8])
    }
}

/// One spectral sample of the source: a wavelength and its fixed color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRay {
    /// Wavelength in nanometers.
    pub wavelength: f32,
    /// Display color, computed once from the wavelength.
    pub color: Rgb<u8>,
}

impl BaseRay {
    /// Sample at `wavelength` nm with its spectral color.
    pub fn new(wavelength: f32) -> Self {
        Self {
            wavelength,
            color: color_for_wavelength(wavelength),
        }
    }
}

/// `count` base rays evenly spaced from 700 nm down to 400 nm.
///
/// A single sample sits at 700 nm.
pub fn visible_spectrum(count: usize) -> Vec<BaseRay> {
    let span = WAVELENGTH_MAX - WAVELENGTH_MIN;
    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            BaseRay::new(WAVELENGTH_MAX - t * span)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(color_for_wavelength(620.0), Rgb([255, 0, 0]));
        assert_eq!(color_for_wavelength(700.0), Rgb([255, 0, 0]));
        assert_eq!(color_for_wavelength(590.0), Rgb([255, 165, 0]));
        assert_eq!(color_for_wavelength(570.0), Rgb([255, 255, 0]));
        assert_eq!(color_for_wavelength(495.0), Rgb([0, 255, 0]));
        assert_eq!(color_for_wavelength(450.0), Rgb([0, 0, 255]));
        assert_eq!(color_for_wavelength(400.0), Rgb([148, 0, 211]));
    }

    #[test]
    fn test_orange_band_green_falls_toward_red() {
        let mut previous = color_for_wavelength(590.5)[1];
        for wl in [595.0, 600.0, 605.0, 610.0, 615.0, 619.5] {
            let g = color_for_wavelength(wl)[1];
            assert!(g < previous, "green should fall at {wl} nm");
            previous = g;
        }
    }

    #[test]
    fn test_green_band_red_rises_with_wavelength() {
        let mut previous = color_for_wavelength(495.5)[0];
        for wl in [500.0, 520.0, 540.0, 560.0, 569.5] {
            let r = color_for_wavelength(wl)[0];
            assert!(r > previous, "red should rise at {wl} nm");
            previous = r;
        }
    }

    #[test]
    fn test_cyan_band_green_rises_with_wavelength() {
        let a = color_for_wavelength(455.0);
        let b = color_for_wavelength(470.0);
        let c = color_for_wavelength(490.0);
        assert!(a[1] < b[1] && b[1] < c[1]);
        assert_eq!(a[2], 255);
    }

    #[test]
    fn test_violet_band() {
        let a = color_for_wavelength(410.0);
        let b = color_for_wavelength(440.0);
        assert!(a[0] > b[0]);
        assert!(a[2] < b[2]);
    }

    #[test]
    fn test_visible_spectrum_spans_range() {
        let rays = visible_spectrum(RAY_COUNT);
        assert_eq!(rays.len(), RAY_COUNT);
        assert_eq!(rays[0].wavelength, 700.0);
        assert!((rays[RAY_COUNT - 1].wavelength - 400.0).abs() < 1e-3);
        assert!(rays.windows(2).all(|w| w[0].wavelength > w[1].wavelength));
        assert!(rays.iter().all(|r| r.color == color_for_wavelength(r.wavelength)));
    }

    #[test]
    fn test_visible_spectrum_small_counts() {
        assert!(visible_spectrum(0).is_empty());
        let one = visible_spectrum(1);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].wavelength, 700.0);
    }
}
