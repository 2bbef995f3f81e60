use crate::error::{FusionError, Result};
use crate::pixel_grid::PixelGrid;
use crate::pyramid::{DetailPyramid, ResolutionPyramid};

/// Computes the detail (Laplacian) pyramid of one image.
///
/// `detail[i] = pyramid[i] - approximations[i]`, with both operands widened
/// to signed integers before subtracting. The coarsest resolution level has
/// no approximation and therefore no detail level.
///
/// # Parameters
/// - `pyramid`: The image's resolution pyramid (`L + 1` levels).
/// - `approximations`: The `L` smoothed approximations from
///   [`ResolutionPyramid::approximations`].
///
/// # Returns
/// `L` detail levels, or an internal-invariant error if the counts or any
/// level's dimensions disagree.
pub fn extract_details(
    pyramid: &ResolutionPyramid,
    approximations: &[PixelGrid<u8>],
) -> Result<DetailPyramid> {
    let expected = pyramid.len().saturating_sub(1);
    if approximations.len() != expected {
        return Err(FusionError::LevelCountMismatch {
            expected,
            actual: approximations.len(),
        });
    }

    let levels = pyramid
        .levels()
        .iter()
        .zip(approximations)
        .map(|(level, approx)| level.subtract(approx))
        .collect::<Result<Vec<_>>>()?;

    Ok(DetailPyramid::from_levels(levels))
}

/// Builds approximations and extracts details in one step.
pub fn detail_pyramid(pyramid: &ResolutionPyramid) -> Result<DetailPyramid> {
    let approximations = pyramid.approximations()?;
    extract_details(pyramid, &approximations)
}
