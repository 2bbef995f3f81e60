//! Resolution pyramid and its smoothed approximations.
//!
//! Design
//! - Level 0 is the full-resolution image; level `i` is the *original* image
//!   resampled to `floor(w / F^i) x floor(h / F^i)`, not the previous level.
//! - No Gaussian blur is applied. The approximation of level `i` is level
//!   `i + 1` resampled back up to level `i`'s size; the coarser level stands
//!   in for a low-pass copy.
//! - Every member of a stack is built with the same division count, so all
//!   pyramids in a stack share one shape.
use log::debug;

use crate::error::Result;
use crate::params::FusionParams;
use crate::photo::Photo;
use crate::pixel_grid::{Dimensions, PixelGrid};
use crate::resample::{resize_bilinear, Sample};

/// Ordered levels of one image, finest (index 0) to coarsest (last).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pyramid<T> {
    levels: Vec<PixelGrid<T>>,
}

/// Intensity pyramid of one photo.
pub type ResolutionPyramid = Pyramid<u8>;

/// Laplacian (detail) pyramid: one signed residual per non-coarsest level.
pub type DetailPyramid = Pyramid<i32>;

impl<T: Copy> Pyramid<T> {
    pub fn from_levels(levels: Vec<PixelGrid<T>>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[PixelGrid<T>] {
        &self.levels
    }

    /// Level `index`, where 0 is full resolution.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn level(&self, index: usize) -> &PixelGrid<T> {
        &self.levels[index]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn finest(&self) -> Option<&PixelGrid<T>> {
        self.levels.first()
    }

    pub fn coarsest(&self) -> Option<&PixelGrid<T>> {
        self.levels.last()
    }

    /// Per-level dimensions; two pyramids with equal shapes can be fused.
    pub fn shape(&self) -> Vec<Dimensions> {
        self.levels.iter().map(PixelGrid::dimensions).collect()
    }
}

impl ResolutionPyramid {
    /// Builds a `divisions + 1` level pyramid from `photo`.
    ///
    /// # Parameters
    /// - `photo`: The full-resolution source, stored unchanged as level 0.
    /// - `divisions`: Number of reduced levels, normally
    ///   [`FusionParams::max_divisions`] of the first stack member.
    /// - `params`: Supplies the shrink factor.
    ///
    /// # Returns
    /// An error only if a reduced level would be smaller than 2x2, which
    /// `max_divisions` with validated parameters rules out.
    pub fn build(photo: &Photo, divisions: usize, params: &FusionParams) -> Result<Self> {
        let base = photo.dimensions();
        let mut levels = Vec::with_capacity(divisions + 1);
        levels.push(photo.pixels().clone());
        for level in 1..=divisions {
            let target = params.level_dimensions(base, level);
            levels.push(resize_bilinear(photo.pixels(), target)?);
        }
        debug!(
            "Built {}-level pyramid for {base}: coarsest {}",
            levels.len(),
            levels.last().map(PixelGrid::dimensions).unwrap_or(base)
        );
        Ok(Self { levels })
    }

    /// Smoothed approximation of every level except the coarsest.
    ///
    /// Approximation `i` is level `i + 1` resampled up to the exact size of
    /// level `i`. A pyramid of `L + 1` levels yields `L` approximations.
    pub fn approximations(&self) -> Result<Vec<PixelGrid<u8>>> {
        upsample_pairs(&self.levels)
    }
}

fn upsample_pairs<T: Sample>(levels: &[PixelGrid<T>]) -> Result<Vec<PixelGrid<T>>> {
    levels
        .windows(2)
        .map(|pair| resize_bilinear(&pair[1], pair[0].dimensions()))
        .collect()
}

impl DetailPyramid {
    /// Total number of detail samples across all levels.
    pub fn sample_count(&self) -> usize {
        self.levels.iter().map(|l| l.dimensions().area()).sum()
    }
}
