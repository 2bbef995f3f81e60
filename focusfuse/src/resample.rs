//! Bilinear resampling with align-corners coordinate mapping.
//!
//! Target pixel `(x, y)` reads the source at
//! `(x * (src_w - 1) / (dst_w - 1), y * (src_h - 1) / (dst_h - 1))`, so the
//! four corner pixels map exactly onto the source corners. All blending is
//! done in `f64`; only the final value is narrowed to the sample type.
use log::warn;

use crate::error::{FusionError, Result};
use crate::pixel_grid::{Dimensions, PixelGrid};

/// A sample type the resampler can read from and narrow back into.
pub trait Sample: Copy + Send + Sync {
    fn to_f64(self) -> f64;

    /// Narrows an interpolated value to `Self`, truncating toward zero.
    ///
    /// Returns the stored sample and `true` if the value had to be clamped
    /// into the type's range first.
    fn narrow(value: f64) -> (Self, bool);
}

impl Sample for u8 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn narrow(value: f64) -> (Self, bool) {
        if value > f64::from(u8::MAX) {
            (u8::MAX, true)
        } else if value < 0.0 {
            (0, true)
        } else {
            (value as u8, false)
        }
    }
}

impl Sample for i32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    // Detail values may legitimately be negative; never clamped.
    #[inline]
    fn narrow(value: f64) -> (Self, bool) {
        (value as i32, false)
    }
}

/// Bilinearly interpolates `grid` at the real-valued position `(x, y)`.
///
/// The position is clamped into the grid first. At integer coordinates the
/// floor and ceiling coincide, so fewer than four distinct samples are blended.
///
/// # Panics
/// Panics if `grid` is empty.
pub fn interpolate<T: Sample>(grid: &PixelGrid<T>, x: f64, y: f64) -> f64 {
    let x = x.clamp(0.0, (grid.width() - 1) as f64);
    let y = y.clamp(0.0, (grid.height() - 1) as f64);

    let min_x = x.floor();
    let max_x = x.ceil();
    let min_y = y.floor();
    let max_y = y.ceil();

    let dx = x - min_x;
    let dy = y - min_y;

    let (x0, x1) = (min_x as usize, max_x as usize);
    let (y0, y1) = (min_y as usize, max_y as usize);

    let top_left = grid.get(x0, y0).to_f64();
    let top_right = grid.get(x1, y0).to_f64();
    let bottom_left = grid.get(x0, y1).to_f64();
    let bottom_right = grid.get(x1, y1).to_f64();

    let top = top_left + (top_right - top_left) * dx;
    let bottom = bottom_left + (bottom_right - bottom_left) * dx;

    top + (bottom - top) * dy
}

/// Values a resample had to clamp while narrowing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClampReport {
    /// Number of output samples that were clamped.
    pub clamped: usize,

    /// The interpolated value furthest from zero among the clamped ones.
    pub extreme: f64,
}

/// Resizes `src` to `target` using bilinear interpolation.
///
/// # Parameters
/// - `src`: The grid to resample. Must not be empty.
/// - `target`: Output dimensions. Both sides must be at least 2, since the
///   align-corners ratio divides by `target - 1`.
///
/// # Returns
/// A new grid of exactly `target` dimensions. For 8-bit samples, values that
/// drift outside `[0, 255]` are clamped and reported once through `log::warn!`.
pub fn resize_bilinear<T: Sample>(src: &PixelGrid<T>, target: Dimensions) -> Result<PixelGrid<T>> {
    let (out, report) = resize_bilinear_with_report(src, target)?;
    if report.clamped > 0 {
        warn!(
            "Clamped {} interpolated values outside the sample range while resampling {} -> {target} (extreme {:.2})",
            report.clamped,
            src.dimensions(),
            report.extreme
        );
    }
    Ok(out)
}

/// Same as [`resize_bilinear`], but returns the clamp statistics instead of logging them.
pub fn resize_bilinear_with_report<T: Sample>(
    src: &PixelGrid<T>,
    target: Dimensions,
) -> Result<(PixelGrid<T>, ClampReport)> {
    if target.width < 2 || target.height < 2 {
        return Err(FusionError::TargetTooSmall(target));
    }
    if src.dimensions().is_empty() {
        return Err(FusionError::EmptySource(src.dimensions()));
    }

    let src_span = ((src.width() - 1) as f64, (src.height() - 1) as f64);
    let dst_span = ((target.width - 1) as f64, (target.height - 1) as f64);

    let mut report = ClampReport::default();

    let out = PixelGrid::from_fn(target, |x, y| {
        // Multiply before dividing so the last row and column land exactly on the source edge.
        let sx = x as f64 * src_span.0 / dst_span.0;
        let sy = y as f64 * src_span.1 / dst_span.1;
        let value = interpolate(src, sx, sy);
        let (sample, was_clamped) = T::narrow(value);
        if was_clamped {
            report.clamped += 1;
            if value.abs() > report.extreme.abs() {
                report.extreme = value;
            }
        }
        sample
    });

    Ok((out, report))
}
