// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game.  A seed point is dropped somewhere in the window,
//! and then, over and over, a matrix is picked at random, the point
//! is moved by it and warped by the variation.  After a short
//! warm-up the orbit sits on the attractor, and from then on every
//! position it visits is painted in the color of the matrix that put
//! it there.

use affine::AffineMatrix;
use canvas::Canvas;
use num::Complex;
use planes::PlaneMapper;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use symmetry::Symmetry;
use variations::Variation;

/// Steps taken from each seed before anything is plotted.
pub const WARMUP: usize = 20;

/// The read-only half of a worker: what to iterate and where to put
/// it.  Any number of threads may borrow one of these at once; each
/// brings its own random source and gets back its own canvas.
pub struct ChaosGame<'a> {
    matrices: &'a [AffineMatrix],
    variation: Variation,
    plane: &'a PlaneMapper,
    symmetry: &'a Symmetry,
    iterations: usize,
    choose: Uniform<usize>,
}

impl<'a> ChaosGame<'a> {
    /// The matrix slice must not be empty.
    pub fn new(
        matrices: &'a [AffineMatrix],
        variation: Variation,
        plane: &'a PlaneMapper,
        symmetry: &'a Symmetry,
        iterations: usize,
    ) -> Self {
        assert!(!matrices.is_empty(), "the chaos game needs at least one matrix");
        ChaosGame {
            matrices,
            variation,
            plane,
            symmetry,
            iterations,
            choose: Uniform::new(0, matrices.len()),
        }
    }

    /// One step: a random matrix, then the variation.  Returns the new
    /// point and the matrix that produced it.
    #[inline]
    fn step<R: Rng>(&self, point: Complex<f64>, rng: &mut R) -> (Complex<f64>, &'a AffineMatrix) {
        let matrix = &self.matrices[self.choose.sample(rng)];
        (self.variation.transform(matrix.apply(point)), matrix)
    }

    /// Play `points` orbits into a fresh canvas.  Returns the canvas
    /// and how many landings were recorded on it.
    pub fn run<R: Rng>(&self, points: usize, rng: &mut R) -> (Canvas, u64) {
        let (width, height) = (self.plane.integral_plane.0, self.plane.integral_plane.1);
        let mut canvas = Canvas::new(width, height);
        let mut plotted = 0;
        for _ in 0..points {
            let mut point = self.plane.sample(rng);
            for _ in 0..WARMUP {
                point = self.step(point, rng).0;
            }
            for _ in 0..self.iterations {
                let (next, matrix) = self.step(point, rng);
                point = next;
                for copy in self.symmetry.expand(point) {
                    if let Some(pixel) = self.plane.point_to_pixel(&copy) {
                        canvas.plot(pixel, matrix.color);
                        plotted += 1;
                    }
                }
            }
        }
        (canvas, plotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affine::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity(color: Color) -> AffineMatrix {
        AffineMatrix::new([1.0, 0.0, 0.0, 0.0, 1.0, 0.0], color)
    }

    fn plane(w: usize, h: usize, variation: Variation) -> PlaneMapper {
        let window = variation.window();
        PlaneMapper::new(w, h, window.0, window.1).unwrap()
    }

    #[test]
    fn hits_stay_on_the_canvas_and_are_counted() {
        let matrices = AffineMatrix::preset(1).unwrap();
        let plane = plane(64, 48, Variation::Fisheye);
        let symmetry = Symmetry::new(3);
        let game = ChaosGame::new(&matrices, Variation::Fisheye, &plane, &symmetry, 30);
        let mut rng = StdRng::seed_from_u64(3);
        let (canvas, plotted) = game.run(200, &mut rng);
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 48);
        assert!(plotted > 0);
        assert_eq!(canvas.total_hits(), plotted);
        assert!(plotted <= 200 * 30 * 3);
    }

    #[test]
    fn same_seed_same_canvas() {
        let matrices = AffineMatrix::preset(3).unwrap();
        let plane = plane(40, 40, Variation::Diamond);
        let symmetry = Symmetry::new(2);
        let game = ChaosGame::new(&matrices, Variation::Diamond, &plane, &symmetry, 25);
        let a = game.run(100, &mut StdRng::seed_from_u64(99));
        let b = game.run(100, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn single_matrix_paints_its_own_color() {
        let white = Color::new(255, 255, 255);
        let matrices = vec![identity(white)];
        let plane = plane(50, 50, Variation::Bubble);
        let symmetry = Symmetry::new(1);
        let game = ChaosGame::new(&matrices, Variation::Bubble, &plane, &symmetry, 10);
        let (canvas, _) = game.run(50, &mut StdRng::seed_from_u64(1));
        assert!(canvas.populated() > 0);
        for cell in canvas.cells().filter(|c| c.is_hit()) {
            assert_eq!(cell.color, white);
        }
    }

    #[test]
    fn symmetry_of_one_matches_plain_plotting() {
        let matrices = AffineMatrix::preset(2).unwrap();
        let plane = plane(32, 32, Variation::Exponential);
        let one = Symmetry::new(1);
        let game = ChaosGame::new(&matrices, Variation::Exponential, &plane, &one, 15);
        let (expanded, _) = game.run(40, &mut StdRng::seed_from_u64(5));

        // The same orbits, plotted without going through the expander.
        let mut rng = StdRng::seed_from_u64(5);
        let choose = Uniform::new(0, matrices.len());
        let mut plain = Canvas::new(32, 32);
        for _ in 0..40 {
            let mut point: Complex<f64> = plane.sample(&mut rng);
            for step in 0..(WARMUP + 15) {
                let m = &matrices[choose.sample(&mut rng)];
                point = Variation::Exponential.transform(m.apply(point));
                if step >= WARMUP {
                    if let Some(pixel) = plane.point_to_pixel(&point) {
                        plain.plot(pixel, m.color);
                    }
                }
            }
        }
        assert_eq!(expanded, plain);
    }

    #[test]
    fn symmetry_multiplies_landings_on_a_symmetric_window() {
        let matrices = vec![identity(Color::new(10, 20, 30))];
        let plane = plane(100, 100, Variation::Bubble);
        let one = Symmetry::new(1);
        let four = Symmetry::new(4);
        let single = ChaosGame::new(&matrices, Variation::Bubble, &plane, &one, 10);
        let quad = ChaosGame::new(&matrices, Variation::Bubble, &plane, &four, 10);
        let (_, a) = single.run(30, &mut StdRng::seed_from_u64(8));
        let (_, b) = quad.run(30, &mut StdRng::seed_from_u64(8));
        // Bubble's ring sits well inside its window, so nothing is lost.
        assert_eq!(a, 30 * 10);
        assert_eq!(b, 4 * a);
    }
}
