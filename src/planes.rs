//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the real plane with an arbitrary pair of corners
//! defining the leftlower and rightupper corners of the window.
use errors::FlameError;
use num::Complex;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.  For that reason,
/// the lower-left-hand corner is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// window onto the real plane, treating the real part of each value
/// as the x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

impl ComplexPlane {
    /// Inclusive on every edge.  NaN is never inside.
    pub fn contains(&self, point: &Complex<f64>) -> bool {
        point.re >= self.0.re && point.re <= self.1.re && point.im >= self.0.im && point.im <= self.1.im
    }
}

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a window onto the real cartesian plane.  Maps points
/// from the window onto the grid, and draws seed points from the
/// window.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the window, left-lower and
    /// right-upper
    pub complex_plane: ComplexPlane,
    // The ratio mapping the width and height, respectively, of the two
    // different planes.
    grid_factors: (f64, f64),
    // Seed point distributions along each axis.
    seed_re: Uniform<f64>,
    seed_im: Uniform<f64>,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the two
    /// corners of the window.  The window must have some extent on
    /// both axes, and the integral plane must have at least one pixel.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, FlameError> {
        if width == 0 || height == 0 {
            return Err(FlameError::config(format!(
                "The raster must have at least one pixel, not {}x{}.",
                width, height
            )));
        }

        // Also catches NaN corners.
        if !(rightupper.re > leftlower.re) {
            return Err(FlameError::config(
                "The left lower corner is not to the left of the right upper corner.",
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(FlameError::config(
                "The left lower corner is not lower than the right upper corner.",
            ));
        }

        let region_width = rightupper.re - leftlower.re;
        let region_height = rightupper.im - leftlower.im;
        if !region_width.is_finite() || !region_height.is_finite() {
            return Err(FlameError::config("The window must be finite."));
        }

        // these are the multipliers of the real plane to the integral plane.
        let grid_factors = (
            (width as f64) / region_width,
            (height as f64) / region_height,
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            grid_factors,
            seed_re: Uniform::new(leftlower.re, rightupper.re),
            seed_im: Uniform::new(leftlower.im, rightupper.im),
        })
    }

    /// Given a point on the real plane, map that as closely as
    /// possible to a pixel on the integral plane.  Points outside the
    /// window land nowhere, and neither do points exactly on its right
    /// or upper edge, which would map one past the last pixel.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        if !self.complex_plane.contains(point) {
            return None;
        }
        let IntegralPlane(width, height) = self.integral_plane;
        let left = ((point.re - self.complex_plane.0.re) * self.grid_factors.0) as usize;
        let top = ((point.im - self.complex_plane.0.im) * self.grid_factors.1) as usize;
        if left < width && top < height {
            Some(Pixel(left, top))
        } else {
            None
        }
    }

    /// Draw a point uniformly from inside the window.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Complex<f64> {
        Complex::new(self.seed_re.sample(rng), self.seed_im.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_raster() {
        let pm = PlaneMapper::new(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn point_to_pixel_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.5, 2.5)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex::new(4.5, 0.5)), Some(Pixel(4, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(5.0, 5.0)), None);
    }

    #[test]
    fn point_to_pixel_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-0.5, 1.5)), Some(Pixel(1, 3)));
    }

    #[test]
    fn point_to_pixel_drops_the_far_edges_and_outside() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 2.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.1, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, std::f64::NAN)), None);
    }

    #[test]
    fn point_to_pixel_maps_on_large_mixed_planes() {
        let pm =
            PlaneMapper::new(640, 640, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(320, 320)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, -2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, -1.0)), Some(Pixel(480, 160)));
    }

    #[test]
    fn every_window_point_lands_on_the_grid() {
        let pm = PlaneMapper::new(7, 3, Complex::new(-1.2, -0.3), Complex::new(0.9, 2.5)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let p = pm.sample(&mut rng);
            assert!(pm.complex_plane.contains(&p));
            if let Some(Pixel(x, y)) = pm.point_to_pixel(&p) {
                assert!(x < 7 && y < 3);
            }
        }
    }
}
