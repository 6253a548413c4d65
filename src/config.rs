// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything one render needs to know, and the checks that make it
//! safe to hand to the engine.

use affine::AffineMatrix;
use errors::FlameError;
use planes::ComplexPlane;
use variations::Variation;

/// The gamma used when none is given.
pub const DEFAULT_GAMMA: f64 = 2.2;

/// The parameters of a render.  Build one with `new` and the
/// chainable setters, then hand it to `Renderer::new`, which calls
/// `validate` before anything else happens.
#[derive(Clone, Debug)]
pub struct FlameConfig {
    /// Raster columns.
    pub width: usize,
    /// Raster rows.
    pub height: usize,
    /// The warp applied after every affine step.
    pub variation: Variation,
    /// Plotted iterations per seed point, after the warm-up.
    pub iterations: usize,
    /// Seed points across all workers.
    pub points: usize,
    /// The affine maps the chaos game chooses between.
    pub matrices: Vec<AffineMatrix>,
    /// Rotated copies per accepted point.
    pub symmetry: usize,
    /// Worker threads.
    pub threads: usize,
    /// Tone mapping gamma.
    pub gamma: f64,
    /// Base seed for the workers' random sources.  None draws from the
    /// operating system.
    pub seed: Option<u64>,
    /// Overrides the variation's own window.
    pub window: Option<ComplexPlane>,
}

impl FlameConfig {
    /// A single-threaded, unseeded, symmetry-free configuration with
    /// 100 iterations per point and 10,000 points.
    pub fn new(width: usize, height: usize, variation: Variation, matrices: Vec<AffineMatrix>) -> Self {
        FlameConfig {
            width,
            height,
            variation,
            iterations: 100,
            points: 10_000,
            matrices,
            symmetry: 1,
            threads: 1,
            gamma: DEFAULT_GAMMA,
            seed: None,
            window: None,
        }
    }

    /// Set the plotted iterations per point.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the seed point budget.
    pub fn points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Set the symmetry order.
    pub fn symmetry(mut self, symmetry: usize) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Set the worker count.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the tone mapping gamma.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Seed the random sources.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Frame the render in a window other than the variation's own.
    pub fn window(mut self, window: ComplexPlane) -> Self {
        self.window = Some(window);
        self
    }

    /// The window the render will actually use.
    pub fn effective_window(&self) -> ComplexPlane {
        self.window.unwrap_or_else(|| self.variation.window())
    }

    /// Refuse anything the engine cannot run.  The window itself is
    /// checked when the plane mapper is built from it.
    pub fn validate(&self) -> Result<(), FlameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FlameError::config(format!(
                "image size must be positive, not {}x{}",
                self.width, self.height
            )));
        }
        if self.matrices.is_empty() {
            return Err(FlameError::config("at least one affine matrix is required"));
        }
        if self.iterations == 0 {
            return Err(FlameError::config("iteration count must be positive"));
        }
        if self.points == 0 {
            return Err(FlameError::config("point count must be positive"));
        }
        if self.symmetry == 0 {
            return Err(FlameError::config("symmetry order must be at least one"));
        }
        if self.threads == 0 {
            return Err(FlameError::config("thread count must be at least one"));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(FlameError::config(format!(
                "gamma must be a positive number, not {}",
                self.gamma
            )));
        }
        if let Some(bad) = self.matrices.iter().find(|m| {
            ![m.a, m.b, m.c, m.d, m.e, m.f].iter().all(|v| v.is_finite())
        }) {
            return Err(FlameError::config(format!("matrix {:?} has a non-finite coefficient", bad)));
        }
        Ok(())
    }
}
