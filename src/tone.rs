// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tone mapping.  Hit counts across a flame follow something like a
//! power law: a few cells are hit enormously often and most only a
//! handful of times.  Plotting them linearly would leave a few bright
//! specks on black, so brightness is taken from the log of the count,
//! scaled against the densest cell, then gamma corrected.

use canvas::Canvas;
use config::DEFAULT_GAMMA;

/// Log-density and gamma correction over a whole canvas.
#[derive(Copy, Clone, Debug)]
pub struct ToneMapper {
    gamma: f64,
}

impl Default for ToneMapper {
    fn default() -> Self {
        ToneMapper::new(DEFAULT_GAMMA)
    }
}

impl ToneMapper {
    /// The gamma must be finite and positive; the configuration checks
    /// that before a mapper is built.
    pub fn new(gamma: f64) -> ToneMapper {
        ToneMapper { gamma }
    }

    /// The gamma in use.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// First pass: write `log10(hits)` into every hit cell and return
    /// the largest such value.  Unhit cells are skipped.
    fn densities(canvas: &mut Canvas) -> f64 {
        let mut max = 0.0_f64;
        for cell in canvas.cells_mut().filter(|c| c.is_hit()) {
            cell.normal = (cell.hits as f64).log10();
            max = max.max(cell.normal);
        }
        max
    }

    /// Darken every cell by its gamma-corrected relative density.  On
    /// return each cell's `normal` holds that relative density, in
    /// [0, 1].  When no cell has been hit more than once every
    /// relative density is 0, and the whole canvas goes black.
    pub fn apply(&self, canvas: &mut Canvas) {
        let max = ToneMapper::densities(canvas);
        let exponent = 1.0 / self.gamma;
        for cell in canvas.cells_mut() {
            let normalized = if max > 0.0 { cell.normal / max } else { 0.0 };
            let factor = normalized.powf(exponent);
            cell.color = cell.color.scale(factor);
            cell.normal = normalized;
        }
    }
}
