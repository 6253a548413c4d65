// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The accumulation grid.  Each worker owns one Canvas while it plays
//! the chaos game; afterwards the canvases are folded into one with
//! `merge`, and that survivor is handed to the tone mapper.

use affine::Color;
use errors::FlameError;
use image::RgbImage;
use planes::Pixel;

/// One pixel's worth of accumulated orbit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    /// Where this cell sits on the grid.
    pub pixel: Pixel,
    /// The running color.
    pub color: Color,
    /// How many times an orbit has landed here.
    pub hits: u64,
    /// Log density, filled in by the tone mapper.  Zero until then.
    pub normal: f64,
}

impl Cell {
    /// An untouched black cell.
    pub fn empty(pixel: Pixel) -> Cell {
        Cell {
            pixel,
            color: Color::default(),
            hits: 0,
            normal: 0.0,
        }
    }

    /// True once anything has landed on this cell.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hits > 0
    }
}

/// A width×height grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A canvas with every cell black and unhit.
    pub fn new(width: usize, height: usize) -> Canvas {
        let cells = iproduct!(0..height, 0..width)
            .map(|(y, x)| Cell::empty(Pixel(x, y)))
            .collect();
        Canvas {
            width,
            height,
            cells,
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, pixel: Pixel) -> usize {
        let Pixel(x, y) = pixel;
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) is outside a {}x{} canvas",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// The cell at a pixel.  Panics if the pixel is off the canvas.
    pub fn cell(&self, pixel: Pixel) -> &Cell {
        &self.cells[self.offset(pixel)]
    }

    /// Replace the cell at a pixel.  The replacement keeps the pixel
    /// coordinates of the slot it lands in.  Panics if the pixel is
    /// off the canvas.
    pub fn set(&mut self, pixel: Pixel, cell: Cell) {
        let offset = self.offset(pixel);
        self.cells[offset] = Cell { pixel, ..cell };
    }

    /// Whether an orbit has ever landed on this pixel.  A cell's color
    /// does not count; only its hit count does.
    pub fn contains(&self, pixel: Pixel) -> bool {
        self.cell(pixel).is_hit()
    }

    /// Record one landing.  The first landing takes the color as is;
    /// later ones average it, integer-wise, with what is already there.
    pub fn plot(&mut self, pixel: Pixel, color: Color) {
        let offset = self.offset(pixel);
        let cell = &mut self.cells[offset];
        if cell.is_hit() {
            cell.color = cell.color.blend(color);
        } else {
            cell.color = color;
        }
        cell.hits += 1;
    }

    /// Fold another canvas into this one.  Where only one side was hit
    /// that side's cell wins; where both were, colors blend and hit
    /// counts add.  Panics if the canvases differ in size.
    pub fn merge(&mut self, other: &Canvas) {
        assert!(
            self.width == other.width && self.height == other.height,
            "cannot merge a {}x{} canvas into a {}x{} canvas",
            other.width,
            other.height,
            self.width,
            self.height
        );
        for (mine, theirs) in self.cells.iter_mut().zip(&other.cells) {
            match (mine.is_hit(), theirs.is_hit()) {
                (_, false) => {}
                (false, true) => *mine = *theirs,
                (true, true) => {
                    mine.color = mine.color.blend(theirs.color);
                    mine.hits += theirs.hits;
                }
            }
        }
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Number of cells with at least one hit.
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|c| c.is_hit()).count()
    }

    /// Sum of the hit counts of every cell.
    pub fn total_hits(&self) -> u64 {
        self.cells.iter().map(|c| c.hits).sum()
    }

    /// Lay the cells' colors out as an RGB raster.
    pub fn to_raster(&self) -> Result<RgbImage, FlameError> {
        let mut buffer = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            buffer.extend_from_slice(&[cell.color.r, cell.color.g, cell.color.b]);
        }
        RgbImage::from_raw(self.width as u32, self.height as u32, buffer)
            .ok_or(FlameError::Raster(self.width, self.height))
    }
}
