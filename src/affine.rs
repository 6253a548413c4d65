// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Affine matrices and the colors attached to them.  Every step of
//! the chaos game picks one of these at random, moves the point with
//! it, and paints whatever pixel the point lands on in its color.

use errors::FlameError;
use num::Complex;
use std::f64::consts::FRAC_PI_4;
use std::str::FromStr;

/// An RGB triplet.  Channels are bytes, so they can never leave the
/// 0..=255 range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Constructor.
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// The integer midpoint of two colors, channel by channel.  Used
    /// both when a pixel is hit again and when two canvases merge.
    /// Repeated blending weighs the newest color at one half, the
    /// one before at one quarter, and so on; it is not a mean.
    pub fn blend(self, other: Color) -> Color {
        let mid = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2) as u8;
        Color {
            r: mid(self.r, other.r),
            g: mid(self.g, other.g),
            b: mid(self.b, other.b),
        }
    }

    /// Darken by a factor in [0, 1], flooring each channel.
    pub fn scale(self, factor: f64) -> Color {
        let channel = |c: u8| num::clamp((f64::from(c) * factor).floor(), 0.0, 255.0) as u8;
        Color {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

/// The map `x' = a·x + b·y + c`, `y' = d·x + e·y + f`, tagged with the
/// color its points are painted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineMatrix {
    /// x coefficient of x'
    pub a: f64,
    /// y coefficient of x'
    pub b: f64,
    /// x' translation
    pub c: f64,
    /// x coefficient of y'
    pub d: f64,
    /// y coefficient of y'
    pub e: f64,
    /// y' translation
    pub f: f64,
    /// The color painted by points this matrix produced.
    pub color: Color,
}

impl AffineMatrix {
    /// Constructor.  Coefficients in the order a through f.
    pub fn new(coefficients: [f64; 6], color: Color) -> AffineMatrix {
        let [a, b, c, d, e, f] = coefficients;
        AffineMatrix {
            a,
            b,
            c,
            d,
            e,
            f,
            color,
        }
    }

    /// Move a point with this matrix.  The real part is x, the
    /// imaginary part is y.
    #[inline]
    pub fn apply(&self, point: Complex<f64>) -> Complex<f64> {
        Complex::new(
            self.a * point.re + self.b * point.im + self.c,
            self.d * point.re + self.e * point.im + self.f,
        )
    }

    /// The number of built-in matrix sets.
    pub const PRESET_COUNT: usize = 5;

    /// One of the built-in matrix sets, or None if the index is past
    /// the end of the list.
    pub fn preset(index: usize) -> Option<Vec<AffineMatrix>> {
        let m = |a, b, c, d, e, f, r, g, bl| AffineMatrix::new([a, b, c, d, e, f], Color::new(r, g, bl));
        let (cos, sin) = (FRAC_PI_4.cos(), FRAC_PI_4.sin());
        match index {
            0 => Some(vec![
                m(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 255, 255, 255),
                m(1.5, 0.0, 0.0, 0.0, 1.5, 0.0, 147, 112, 219),
                m(cos, -sin, 0.0, sin, cos, 0.0, 48, 177, 206),
                m(1.0, 0.2, 0.0, 0.2, 1.0, 0.0, 0, 0, 255),
                m(1.0, 0.0, 0.5, 0.0, 1.0, -0.5, 0, 0, 255),
            ]),
            1 => Some(vec![
                m(0.6, 0.0, -0.5, 0.0, 0.6, 0.5, 160, 32, 240),
                m(0.6, 0.0, 0.5, 0.0, 0.6, 0.5, 255, 215, 0),
                m(0.6, 0.0, -0.5, 0.0, 0.6, -0.5, 255, 127, 80),
                m(0.6, 0.0, 0.5, 0.0, 0.6, -0.5, 138, 40, 210),
                m(1.5, 0.0, 0.0, 0.0, 1.5, 0.0, 255, 255, 255),
                m(cos, -sin, 0.0, sin, cos, 0.0, 255, 0, 0),
            ]),
            2 => Some(vec![
                m(0.9, 0.2, 0.0, 0.1, 0.8, 0.0, 255, 105, 180),
                m(0.6, 0.0, -0.2, 0.0, 0.6, 0.2, 135, 206, 250),
                m(0.7, -0.3, 0.0, -0.3, 0.7, 0.0, 255, 215, 0),
                m(0.8, 0.1, 0.3, 0.1, 0.8, -0.3, 124, 252, 0),
            ]),
            3 => Some(vec![
                m(0.8, -0.2, 0.1, 0.2, 0.8, -0.1, 255, 99, 71),
                m(0.7, 0.0, 0.0, 0.0, 0.9, 0.2, 135, 206, 250),
                m(-0.6, 0.4, 0.1, 0.4, 0.6, -0.3, 144, 238, 144),
                m(0.5, -0.5, -0.2, 0.5, 0.5, 0.1, 255, 215, 0),
                m(0.9, 0.1, 0.0, 0.1, 0.9, 0.2, 75, 0, 130),
            ]),
            4 => Some(vec![
                m(0.7, -0.2, 0.0, 0.2, 0.7, 0.0, 255, 165, 0),
                m(0.6, 0.0, -0.1, 0.0, 0.8, 0.2, 70, 130, 180),
                m(-0.5, 0.3, 0.2, 0.3, 0.5, -0.2, 220, 20, 60),
                m(0.5, 0.0, -0.2, 0.0, 0.5, 0.3, 124, 252, 0),
                m(0.4, -0.4, 0.1, 0.4, 0.4, -0.1, 255, 255, 51),
            ]),
            _ => None,
        }
    }
}

/// Reads `a,b,c,d,e,f,r,g,b`: six real coefficients followed by three
/// color channels.
impl FromStr for AffineMatrix {
    type Err = FlameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(|f| f.trim()).collect();
        if fields.len() != 9 {
            return Err(FlameError::Parse(format!(
                "expected nine comma-separated values in '{}', found {}",
                s,
                fields.len()
            )));
        }

        let mut coefficients = [0.0_f64; 6];
        for (slot, field) in coefficients.iter_mut().zip(&fields[..6]) {
            *slot = f64::from_str(field)
                .map_err(|_| FlameError::Parse(format!("'{}' is not a coefficient", field)))?;
        }

        let channel = |field: &str| {
            u8::from_str(field).map_err(|_| {
                FlameError::Parse(format!("'{}' is not a color channel in 0..=255", field))
            })
        };
        let color = Color::new(channel(fields[6])?, channel(fields[7])?, channel(fields[8])?);
        Ok(AffineMatrix::new(coefficients, color))
    }
}
