// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The nonlinear half of each chaos-game step.  After the affine
//! matrix moves a point, a variation warps it; the variation is what
//! gives a flame its character.  Variations carry no state, so one
//! value is shared by every worker.

use errors::FlameError;
use num::Complex;
use planes::ComplexPlane;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

const BUBBLE_RADIUS: f64 = 4.0;
const RAYS_PSI: f64 = 1.5;
const RAYS_EPSILON: f64 = 1e-6;

/// The available warps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variation {
    /// Polar swap: sine of the angle against cosine of the radius.
    Diamond,
    /// Pulls distant points in, pushes near ones out, toward a ring.
    Bubble,
    /// Radial compression with the axes swapped.
    Fisheye,
    /// Exponential in x, periodic in y, axes swapped.
    Exponential,
    /// Tangent-driven radial streaks.
    Rays,
}

impl Variation {
    /// Every variation, in selector order (selector 1 is Diamond).
    pub const ALL: [Variation; 5] = [
        Variation::Diamond,
        Variation::Bubble,
        Variation::Fisheye,
        Variation::Exponential,
        Variation::Rays,
    ];

    /// The constant each variation multiplies its output by.
    pub fn scale(self) -> f64 {
        match self {
            Variation::Diamond => 1.25,
            Variation::Bubble => 1.7,
            Variation::Fisheye => 1.0,
            Variation::Exponential => 1.5,
            Variation::Rays => 0.5,
        }
    }

    /// Warp a point.
    pub fn transform(self, point: Complex<f64>) -> Complex<f64> {
        let (x, y) = (point.re, point.im);
        let s = self.scale();
        match self {
            Variation::Diamond => {
                let r = point.norm();
                let theta = point.arg();
                Complex::new(s * theta.sin() * r.cos(), s * theta.cos() * r.sin())
            }
            Variation::Bubble => {
                let k = BUBBLE_RADIUS / (point.norm_sqr() + BUBBLE_RADIUS);
                Complex::new(s * k * x, s * k * y)
            }
            Variation::Fisheye => {
                let k = 2.0 / (point.norm() + 1.0);
                Complex::new(s * k * y, s * k * x)
            }
            Variation::Exponential => {
                let e = (x - 1.0).exp();
                Complex::new(s * e * (PI * y).sin(), s * e * (PI * y).cos())
            }
            Variation::Rays => {
                let mut r2 = point.norm_sqr();
                if r2 == 0.0 {
                    r2 = RAYS_EPSILON;
                }
                let v = point.norm();
                let k = v * (RAYS_PSI * PI * v).tan() / r2;
                Complex::new(s * k * x.cos(), s * k * y.sin())
            }
        }
    }

    /// The region of the plane the attractor is framed in.  Diamond,
    /// Bubble and Fisheye have bounded output and get a window that
    /// holds all of it; Exponential and Rays are unbounded and are
    /// framed around the origin.
    pub fn window(self) -> ComplexPlane {
        let square = |h: f64| ComplexPlane(Complex::new(-h, -h), Complex::new(h, h));
        match self {
            Variation::Diamond => square(1.3),
            Variation::Bubble | Variation::Fisheye => square(2.0),
            Variation::Exponential | Variation::Rays => square(1.2),
        }
    }

    /// Resolve a numeric selector: 1 through 5 name a variation in
    /// the order of `ALL`, 0 asks for one at random.
    pub fn select<R: Rng>(selector: usize, rng: &mut R) -> Result<Variation, FlameError> {
        match selector {
            0 => Ok(Variation::random(rng)),
            n if n <= Variation::ALL.len() => Ok(Variation::ALL[n - 1]),
            n => Err(FlameError::Parse(format!(
                "variation selector {} is not between 0 and {}",
                n,
                Variation::ALL.len()
            ))),
        }
    }

    /// Pick any variation with equal odds.
    pub fn random<R: Rng>(rng: &mut R) -> Variation {
        Variation::ALL[rng.gen_range(0, Variation::ALL.len())]
    }

    /// The lower-case name, as accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            Variation::Diamond => "diamond",
            Variation::Bubble => "bubble",
            Variation::Fisheye => "fisheye",
            Variation::Exponential => "exponential",
            Variation::Rays => "rays",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variation {
    type Err = FlameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Variation::ALL
            .iter()
            .cloned()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| FlameError::Parse(format!("unknown variation '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn diamond_on_the_unit_x_axis() {
        // theta = 0, r = 1
        let p = Variation::Diamond.transform(Complex::new(1.0, 0.0));
        assert!(close(p, Complex::new(0.0, 1.25 * 1.0_f64.sin())));
    }

    #[test]
    fn bubble_scales_toward_the_ring() {
        let p = Variation::Bubble.transform(Complex::new(2.0, 0.0));
        // k = 4 / (4 + 4)
        assert!(close(p, Complex::new(1.7 * 0.5 * 2.0, 0.0)));
    }

    #[test]
    fn fisheye_swaps_axes() {
        let p = Variation::Fisheye.transform(Complex::new(3.0, 4.0));
        // r = 5, k = 1/3
        assert!(close(p, Complex::new(4.0 / 3.0, 1.0)));
    }

    #[test]
    fn exponential_swaps_axes() {
        let p = Variation::Exponential.transform(Complex::new(1.0, 0.5));
        // exp(0) = 1, sin(pi/2) = 1, cos(pi/2) = 0
        assert!(close(p, Complex::new(1.5, 0.0)));
    }

    #[test]
    fn rays_survives_the_origin() {
        let p = Variation::Rays.transform(Complex::new(0.0, 0.0));
        assert!(p.re.is_finite() && p.im.is_finite());
        assert_eq!(p, Complex::new(0.0, 0.0));
    }

    #[test]
    fn rays_away_from_the_origin() {
        let (x, y) = (0.1_f64, 0.2_f64);
        let r2 = x * x + y * y;
        let v = r2.sqrt();
        let k = v * (1.5 * PI * v).tan() / r2;
        let p = Variation::Rays.transform(Complex::new(x, y));
        assert!(close(p, Complex::new(0.5 * k * x.cos(), 0.5 * k * y.sin())));
    }

    #[test]
    fn transforms_are_pure() {
        let p = Complex::new(0.3, -0.7);
        for v in Variation::ALL.iter() {
            assert_eq!(v.transform(p), v.transform(p));
        }
    }

    #[test]
    fn selectors_resolve_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Variation::select(1, &mut rng).unwrap(), Variation::Diamond);
        assert_eq!(Variation::select(5, &mut rng).unwrap(), Variation::Rays);
        assert!(Variation::select(6, &mut rng).is_err());
        let v = Variation::select(0, &mut rng).unwrap();
        assert!(Variation::ALL.contains(&v));
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for v in Variation::ALL.iter() {
            assert_eq!(v.name().parse::<Variation>().unwrap(), *v);
        }
        assert_eq!("Bubble".parse::<Variation>().unwrap(), Variation::Bubble);
        assert!("swirl".parse::<Variation>().is_err());
    }

    #[test]
    fn windows_are_well_formed() {
        for v in Variation::ALL.iter() {
            let ComplexPlane(ll, ru) = v.window();
            assert!(ll.re < ru.re && ll.im < ru.im);
        }
    }
}
