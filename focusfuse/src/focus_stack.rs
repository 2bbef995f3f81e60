use log::{debug, info};
use rayon::prelude::*;

use crate::error::{FusionError, Result};
use crate::fusion::{fuse_details, mean_grids};
use crate::laplacian::detail_pyramid;
use crate::params::FusionParams;
use crate::photo::Photo;
use crate::pixel_grid::{Dimensions, PixelGrid};
use crate::pyramid::{DetailPyramid, ResolutionPyramid};
use crate::reconstruct::reconstruct;

/// Smallest stack that can be fused.
pub const MIN_STACK_SIZE: usize = 2;

/// Everything derived from one stack member before fusion.
///
/// Only [`FocusStackFuser::decompose`] builds one, so the resolution pyramid
/// always holds at least the full-resolution level.
#[derive(Debug, Clone)]
pub struct MemberDecomposition {
    /// Resolution pyramid of the member, level 0 being the photo itself.
    pyramid: ResolutionPyramid,

    /// Detail pyramid: one level fewer than `pyramid`.
    details: DetailPyramid,
}

impl MemberDecomposition {
    pub fn pyramid(&self) -> &ResolutionPyramid {
        &self.pyramid
    }

    pub fn details(&self) -> &DetailPyramid {
        &self.details
    }

    /// The smallest resolution level, or `None` for an empty pyramid.
    pub fn coarsest(&self) -> Option<&PixelGrid<u8>> {
        self.pyramid.coarsest()
    }
}

/// Fuses a focus stack into one all-in-focus photo.
///
/// The pipeline is:
/// 1. **Validation**: at least [`MIN_STACK_SIZE`] photos, all of one size.
/// 2. **Decomposition** of every member (in parallel): resolution pyramid,
///    smoothed approximations, detail pyramid. All members share the division
///    count derived from the first photo, so every pyramid has the same shape.
/// 3. **Base**: the coarsest level averaged across the stack.
/// 4. **Fusion**: per level and position, the strongest detail in the stack.
/// 5. **Reconstruction** from the base, coarsest to finest, then clamping.
#[derive(Debug, Clone, Default)]
pub struct FocusStackFuser {
    params: FusionParams,
}

impl FocusStackFuser {
    /// Creates a fuser with validated parameters.
    pub fn new(params: FusionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &FusionParams {
        &self.params
    }

    /// Checks that `stack` can be fused and returns the shared dimensions.
    ///
    /// # Returns
    /// - [`FusionError::NotEnoughImages`] for fewer than [`MIN_STACK_SIZE`] photos.
    /// - [`FusionError::EmptyImage`] if the first photo has no pixels.
    /// - [`FusionError::DimensionMismatch`] naming the first photo whose size
    ///   differs from the first one's.
    pub fn validate_stack(&self, stack: &[Photo]) -> Result<Dimensions> {
        if stack.len() < MIN_STACK_SIZE {
            return Err(FusionError::NotEnoughImages {
                required: MIN_STACK_SIZE,
                actual: stack.len(),
            });
        }

        let expected = stack[0].dimensions();
        if expected.is_empty() {
            return Err(FusionError::EmptyImage {
                index: 0,
                dimensions: expected,
            });
        }

        for (index, photo) in stack.iter().enumerate().skip(1) {
            if photo.dimensions() != expected {
                return Err(FusionError::DimensionMismatch {
                    index,
                    expected,
                    actual: photo.dimensions(),
                });
            }
        }
        Ok(expected)
    }

    /// Builds the resolution and detail pyramids of one member.
    pub fn decompose(&self, photo: &Photo, divisions: usize) -> Result<MemberDecomposition> {
        let pyramid = ResolutionPyramid::build(photo, divisions, &self.params)?;
        let details = detail_pyramid(&pyramid)?;
        Ok(MemberDecomposition { pyramid, details })
    }

    /// Runs the full pipeline over `stack`.
    ///
    /// # Returns
    /// A photo with the stack's dimensions and intensities in
    /// `[0, params.max_value]`. Validation failures are reported before any
    /// pyramid is built; no partial output is ever produced.
    pub fn fuse(&self, stack: &[Photo]) -> Result<Photo> {
        let dimensions = self.validate_stack(stack)?;
        let divisions = self.params.max_divisions(dimensions);
        info!(
            "Fusing {} images of {dimensions} through {} pyramid levels",
            stack.len(),
            divisions + 1
        );

        let members = stack
            .par_iter()
            .map(|photo| self.decompose(photo, divisions))
            .collect::<Result<Vec<_>>>()?;
        debug!("Decomposed {} stack members", members.len());

        let coarsest = members
            .iter()
            .map(MemberDecomposition::coarsest)
            .collect::<Option<Vec<&PixelGrid<u8>>>>()
            .ok_or(FusionError::LevelCountMismatch {
                expected: divisions + 1,
                actual: 0,
            })?;
        let base = mean_grids(&coarsest)?;

        let details: Vec<DetailPyramid> = members.into_iter().map(|m| m.details).collect();
        let fused = fuse_details(&details)?;

        reconstruct(&base, &fused, self.params.max_value)
    }
}

/// Fuses `stack` with the default parameters.
pub fn fuse_stack(stack: &[Photo]) -> Result<Photo> {
    FocusStackFuser::default().fuse(stack)
}
