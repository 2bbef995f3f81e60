use log::debug;

use crate::error::Result;
use crate::photo::Photo;
use crate::pixel_grid::DetailImage;
use crate::pyramid::DetailPyramid;
use crate::resample::resize_bilinear;

/// Collapses a fused detail pyramid onto its base, coarsest to finest.
///
/// Starting from `base`, each step upsamples the running result to the size
/// of the next finer detail level (signed, unclamped) and adds that level.
///
/// # Parameters
/// - `base`: Averaged coarsest level of the stack.
/// - `fused`: Fused detail pyramid, finest level first.
///
/// # Returns
/// The full-resolution signed result. Values may lie outside the intensity
/// range; see [`reconstruct`] for the clamped photo.
pub fn collapse(base: &DetailImage, fused: &DetailPyramid) -> Result<DetailImage> {
    let mut result = base.clone();
    for (index, detail) in fused.levels().iter().enumerate().rev() {
        let upsampled = resize_bilinear(&result, detail.dimensions())?;
        result = upsampled.add(detail)?;
        debug!("Reconstructed level {index} at {}", result.dimensions());
    }
    Ok(result)
}

/// Reconstructs the fused photo and clamps it into `[0, max_value]`.
pub fn reconstruct(base: &DetailImage, fused: &DetailPyramid, max_value: u8) -> Result<Photo> {
    let collapsed = collapse(base, fused)?;
    Ok(Photo::from_detail_clamped(&collapsed, max_value))
}
