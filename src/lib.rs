#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal flame renderer
//!
//! A fractal flame is the attractor of an iterated function system:
//! a handful of affine maps, each followed by a nonlinear warp called
//! a variation.  Start a point anywhere, keep applying a map chosen
//! at random, and after a few steps the point stops wandering and
//! starts tracing the attractor.  Paint every position it visits in
//! the color of the map that put it there, count how often each pixel
//! is visited, and you have the raw material of the image.
//!
//! Raw visit counts are useless as brightness, since a few pixels
//! collect most of the visits.  The final image takes the log of each
//! count relative to the busiest pixel, gamma corrects it, and uses
//! that to darken the accumulated color.
//!
//! The work is split between threads that each play the game on their
//! own canvas with their own random source; the canvases are merged
//! once every thread is done.
//!
//! ```no_run
//! use flame::{AffineMatrix, FlameConfig, Renderer, Variation};
//!
//! let matrices = AffineMatrix::preset(1).unwrap();
//! let config = FlameConfig::new(800, 600, Variation::Fisheye, matrices)
//!     .points(20_000)
//!     .symmetry(3)
//!     .threads(4);
//! let image = Renderer::new(config).unwrap().render().unwrap();
//! image.save("flame.png").unwrap();
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod affine;
pub mod canvas;
pub mod chaos;
pub mod config;
pub mod errors;
pub mod planes;
pub mod render;
pub mod symmetry;
pub mod tone;
pub mod variations;

pub use affine::{AffineMatrix, Color};
pub use canvas::{Canvas, Cell};
pub use config::FlameConfig;
pub use errors::FlameError;
pub use planes::{ComplexPlane, Pixel};
pub use render::Renderer;
pub use variations::Variation;

/// Validate a configuration and render it in one go.
pub fn render(config: &FlameConfig) -> Result<image::RgbImage, FlameError> {
    Renderer::new(config.clone())?.render()
}
