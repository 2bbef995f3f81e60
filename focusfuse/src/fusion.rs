//! Cross-stack combination rules.
//!
//! - Detail levels are fused by picking, at every position, the member value
//!   with the greatest magnitude (sign preserved). On equal magnitude the
//!   member earliest in the stack wins.
//! - The coarsest resolution level carries no selection; it is averaged
//!   across the stack and seeds reconstruction.
use log::debug;
use rayon::prelude::*;

use crate::error::{FusionError, GridOp, Result};
use crate::pixel_grid::{DetailImage, PixelGrid};
use crate::pyramid::DetailPyramid;

/// Returns the value with the largest absolute magnitude.
///
/// Ties keep the earliest value; an empty input yields 0.
#[inline]
pub fn max_abs_response(values: impl IntoIterator<Item = i32>) -> i32 {
    values.into_iter().fold(0, |best, value| {
        if value.unsigned_abs() > best.unsigned_abs() {
            value
        } else {
            best
        }
    })
}

/// Fuses the detail pyramids of every stack member into one.
///
/// # Parameters
/// - `members`: One detail pyramid per stack member, all of identical shape.
///
/// # Returns
/// A pyramid with the members' shape where each sample is the
/// [`max_abs_response`] of the members' samples at that level and position.
/// Fails if `members` is empty or the shapes disagree.
pub fn fuse_details(members: &[DetailPyramid]) -> Result<DetailPyramid> {
    let first = members.first().ok_or(FusionError::NotEnoughImages {
        required: 1,
        actual: 0,
    })?;

    for member in &members[1..] {
        if member.len() != first.len() {
            return Err(FusionError::LevelCountMismatch {
                expected: first.len(),
                actual: member.len(),
            });
        }
        for (a, b) in first.levels().iter().zip(member.levels()) {
            a.ensure_compatible(b, GridOp::Fuse)?;
        }
    }

    let levels: Vec<DetailImage> = (0..first.len())
        .into_par_iter()
        .map(|index| {
            PixelGrid::from_fn(first.level(index).dimensions(), |x, y| {
                max_abs_response(members.iter().map(|m| m.level(index).get(x, y)))
            })
        })
        .collect();

    debug!(
        "Fused {} detail pyramids ({} levels, {} samples each)",
        members.len(),
        first.len(),
        first.sample_count()
    );

    Ok(DetailPyramid::from_levels(levels))
}

/// Pixelwise arithmetic mean of compatible grids, truncated toward zero.
///
/// # Returns
/// [`FusionError::IncompatibleGrids`] if any grid's dimensions differ from the
/// first one's, [`FusionError::NotEnoughImages`] if `grids` is empty.
pub fn mean_grids(grids: &[&PixelGrid<u8>]) -> Result<DetailImage> {
    let first = grids.first().ok_or(FusionError::NotEnoughImages {
        required: 1,
        actual: 0,
    })?;
    for grid in &grids[1..] {
        first.ensure_compatible(*grid, GridOp::Mean)?;
    }

    let count = grids.len() as i64;
    Ok(PixelGrid::from_fn(first.dimensions(), |x, y| {
        let total: i64 = grids.iter().map(|g| i64::from(g.get(x, y))).sum();
        (total / count) as i32
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_grid::Dimensions;

    fn single_level(values: Vec<i32>) -> DetailPyramid {
        DetailPyramid::from_levels(vec![PixelGrid::from_vec(2, 2, values).unwrap()])
    }

    #[test]
    fn larger_magnitude_wins_with_sign() {
        assert_eq!(max_abs_response([-30, 20]), -30);
        assert_eq!(max_abs_response([20, -30]), -30);
        assert_eq!(max_abs_response([0, 0, 5]), 5);
        assert_eq!(max_abs_response(std::iter::empty()), 0);
    }

    #[test]
    fn ties_keep_earliest_member() {
        assert_eq!(max_abs_response([12, -12]), 12);
        assert_eq!(max_abs_response([-12, 12]), -12);
        assert_eq!(max_abs_response([3, 7, -7, 7]), 7);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(max_abs_response([i32::MAX, i32::MIN]), i32::MIN);
    }

    #[test]
    fn fuses_every_position_independently() {
        let a = single_level(vec![-30, 1, 0, 9]);
        let b = single_level(vec![20, -2, 0, -9]);
        let fused = fuse_details(&[a, b]).unwrap();
        assert_eq!(fused.level(0).pixels(), &[-30, -2, 0, 9]);
    }

    #[test]
    fn fuses_all_levels() {
        let a = DetailPyramid::from_levels(vec![
            PixelGrid::new(4, 4, 1),
            PixelGrid::new(2, 2, -8),
        ]);
        let b = DetailPyramid::from_levels(vec![
            PixelGrid::new(4, 4, -3),
            PixelGrid::new(2, 2, 5),
        ]);
        let fused = fuse_details(&[a, b]).unwrap();
        assert_eq!(fused.shape(), vec![Dimensions::new(4, 4), Dimensions::new(2, 2)]);
        assert!(fused.level(0).pixels().iter().all(|&v| v == -3));
        assert!(fused.level(1).pixels().iter().all(|&v| v == -8));
    }

    #[test]
    fn parallel_fusion_matches_sequential_scan() {
        let shape = [Dimensions::new(37, 23), Dimensions::new(18, 11), Dimensions::new(9, 5)];
        let members: Vec<DetailPyramid> = (0..4i32)
            .map(|m| {
                DetailPyramid::from_levels(
                    shape
                        .iter()
                        .map(|&dims| {
                            PixelGrid::from_fn(dims, |x, y| {
                                ((x as i32 * 31 + y as i32 * 17 + m * 53) % 97) - 48
                            })
                        })
                        .collect(),
                )
            })
            .collect();

        let fused = fuse_details(&members).unwrap();

        for (index, &dims) in shape.iter().enumerate() {
            for y in 0..dims.height {
                for x in 0..dims.width {
                    let mut best = 0i32;
                    for member in &members {
                        let value = member.level(index).get(x, y);
                        if value.abs() > best.abs() {
                            best = value;
                        }
                    }
                    assert_eq!(fused.level(index).get(x, y), best, "level {index} at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn rejects_shape_mismatch() {
        let a = single_level(vec![0; 4]);
        let b = DetailPyramid::from_levels(vec![PixelGrid::new(3, 2, 0)]);
        assert!(matches!(
            fuse_details(&[a.clone(), b]).unwrap_err(),
            FusionError::IncompatibleGrids { op: GridOp::Fuse, .. }
        ));

        let deeper = DetailPyramid::from_levels(vec![PixelGrid::new(2, 2, 0); 2]);
        assert_eq!(
            fuse_details(&[a, deeper]).unwrap_err(),
            FusionError::LevelCountMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn mean_truncates() {
        let a = PixelGrid::from_vec(3, 1, vec![10u8, 255, 0]).unwrap();
        let b = PixelGrid::from_vec(3, 1, vec![11u8, 254, 1]).unwrap();
        let c = PixelGrid::from_vec(3, 1, vec![11u8, 255, 1]).unwrap();
        let mean = mean_grids(&[&a, &b, &c]).unwrap();
        // 32 / 3, 764 / 3, 2 / 3
        assert_eq!(mean.pixels(), &[10, 254, 0]);
    }

    #[test]
    fn mean_of_identical_grids_is_identity() {
        let a = PixelGrid::from_vec(2, 2, vec![1u8, 2, 3, 250]).unwrap();
        assert_eq!(mean_grids(&[&a, &a]).unwrap(), a.to_detail());
    }

    #[test]
    fn mean_rejects_mismatch() {
        let a = PixelGrid::new(4, 4, 0u8);
        let b = PixelGrid::new(4, 5, 0u8);
        assert!(matches!(
            mean_grids(&[&a, &b]).unwrap_err(),
            FusionError::IncompatibleGrids { op: GridOp::Mean, .. }
        ));
    }
}
