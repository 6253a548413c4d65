// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by every stage of a render.

/// Everything that can stop a render.  The engine reports at most one
/// of these per run, and never alongside a partial image.
#[derive(Debug, Fail, PartialEq)]
pub enum FlameError {
    /// The configuration cannot describe a render: an empty matrix
    /// set, a zero-sized raster, a symmetry order of zero, and so on.
    #[fail(display = "invalid configuration: {}", _0)]
    Configuration(String),

    /// A worker thread died before handing back its canvas.
    #[fail(display = "render worker {} failed to complete", _0)]
    WorkerFailure(usize),

    /// The tone-mapped canvas could not be laid out as a raster of the
    /// given width and height.
    #[fail(display = "could not assemble a {}x{} raster", _0, _1)]
    Raster(usize, usize),

    /// Text that was supposed to describe a matrix or a variation
    /// could not be read as one.
    #[fail(display = "parse error: {}", _0)]
    Parse(String),
}

impl FlameError {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        FlameError::Configuration(msg.into())
    }
}
