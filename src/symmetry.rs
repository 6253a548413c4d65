// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rotational symmetry.  Every accepted point is plotted once for
//! each of `order` evenly spaced turns about the origin.

use num::Complex;
use std::f64::consts::PI;

/// The rotations for one symmetry order, computed once per render and
/// shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct Symmetry {
    rotations: Vec<Complex<f64>>,
}

impl Symmetry {
    /// Order must be at least one; the configuration guarantees it.
    pub fn new(order: usize) -> Symmetry {
        assert!(order > 0, "symmetry order must be at least one");
        let increment = 2.0 * PI / (order as f64);
        let rotations = (0..order)
            .map(|s| {
                let angle = (s as f64) * increment;
                Complex::new(angle.cos(), angle.sin())
            })
            .collect();
        Symmetry { rotations }
    }

    /// How many copies each point becomes.
    pub fn order(&self) -> usize {
        self.rotations.len()
    }

    /// The rotated copies of a point, starting with the point itself.
    /// Multiplying by `cos θ + i·sin θ` is the usual
    /// `x cos θ − y sin θ, x sin θ + y cos θ`.
    pub fn expand<'a>(&'a self, point: Complex<f64>) -> impl Iterator<Item = Complex<f64>> + 'a {
        self.rotations.iter().map(move |r| point * *r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn order_one_is_the_identity() {
        let s = Symmetry::new(1);
        let p = Complex::new(0.3, -1.1);
        let copies: Vec<_> = s.expand(p).collect();
        assert_eq!(copies, vec![p]);
    }

    #[test]
    fn order_four_turns_by_quarters() {
        let s = Symmetry::new(4);
        let copies: Vec<_> = s.expand(Complex::new(1.0, 0.0)).collect();
        assert_eq!(copies.len(), 4);
        assert!(close(copies[0], Complex::new(1.0, 0.0)));
        assert!(close(copies[1], Complex::new(0.0, 1.0)));
        assert!(close(copies[2], Complex::new(-1.0, 0.0)));
        assert!(close(copies[3], Complex::new(0.0, -1.0)));
    }

    #[test]
    fn rotation_preserves_radius() {
        let s = Symmetry::new(7);
        let p = Complex::new(0.6, 0.8);
        assert_eq!(s.order(), 7);
        for q in s.expand(p) {
            assert!((q.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic]
    fn order_zero_is_refused() {
        Symmetry::new(0);
    }
}
