use crate::error::{FusionError, Result};
use crate::pixel_grid::Dimensions;

/// Named constants that shape the pyramid and the output range.
///
/// The defaults (`shrink_factor = 2`, `min_dimension = 40`, `max_value = 255`)
/// are what the command-line tool uses; tests override them to exercise
/// other depths and ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionParams {
    /// Each pyramid level is `1 / shrink_factor` the size of its parent.
    pub shrink_factor: usize,

    /// The coarsest level's smaller side never drops below this many pixels.
    pub min_dimension: usize,

    /// Reconstructed intensities are clamped into `[0, max_value]`.
    pub max_value: u8,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            shrink_factor: 2,
            min_dimension: 40,
            max_value: u8::MAX,
        }
    }
}

impl FusionParams {
    pub fn with_shrink_factor(mut self, shrink_factor: usize) -> Self {
        self.shrink_factor = shrink_factor;
        self
    }

    pub fn with_min_dimension(mut self, min_dimension: usize) -> Self {
        self.min_dimension = min_dimension;
        self
    }

    pub fn with_max_value(mut self, max_value: u8) -> Self {
        self.max_value = max_value;
        self
    }

    /// Rejects parameter combinations that would produce degenerate levels.
    ///
    /// A minimum dimension below 2 would allow 1-pixel levels, which the
    /// align-corners resampler cannot target.
    pub fn validate(&self) -> Result<()> {
        if self.shrink_factor < 2 {
            return Err(FusionError::InvalidParams("shrink factor must be at least 2"));
        }
        if self.min_dimension < 2 {
            return Err(FusionError::InvalidParams("minimum dimension must be at least 2"));
        }
        if self.max_value == 0 {
            return Err(FusionError::InvalidParams("maximum value must be positive"));
        }
        Ok(())
    }

    /// Number of times an image of `dimensions` can be shrunk while its
    /// smaller side stays at or above `min_dimension`.
    ///
    /// Equal to `floor(log_F(min(width, height) / T))` clamped to zero, but
    /// computed in integers so exact powers (e.g. 320 / 40 = 2^3) never lose
    /// a level to floating-point error.
    pub fn max_divisions(&self, dimensions: Dimensions) -> usize {
        if self.shrink_factor < 2 {
            return 0;
        }
        let smaller = dimensions.width.min(dimensions.height);
        let mut divisions = 0;
        let mut needed = self.min_dimension.saturating_mul(self.shrink_factor);
        while needed <= smaller {
            divisions += 1;
            needed = needed.saturating_mul(self.shrink_factor);
        }
        divisions
    }

    /// Dimensions of pyramid level `level` for a full-resolution image of `base`.
    pub fn level_dimensions(&self, base: Dimensions, level: usize) -> Dimensions {
        let divisor = (0..level).fold(1usize, |acc, _| acc.saturating_mul(self.shrink_factor));
        Dimensions::new(base.width / divisor, base.height / divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_for_320_square() {
        let params = FusionParams::default();
        assert_eq!(params.max_divisions(Dimensions::new(320, 320)), 3);
    }

    #[test]
    fn depth_uses_smaller_side() {
        let params = FusionParams::default();
        assert_eq!(params.max_divisions(Dimensions::new(1000, 100)), 1);
        assert_eq!(params.max_divisions(Dimensions::new(79, 5000)), 0);
        assert_eq!(params.max_divisions(Dimensions::new(80, 80)), 1);
    }

    #[test]
    fn depth_is_zero_below_threshold() {
        let params = FusionParams::default();
        assert_eq!(params.max_divisions(Dimensions::new(4, 4)), 0);
        assert_eq!(params.max_divisions(Dimensions::new(39, 400)), 0);
    }

    #[test]
    fn depth_with_other_factor() {
        let params = FusionParams::default()
            .with_shrink_factor(3)
            .with_min_dimension(10);
        // 10 * 3^3 = 270 <= 300 < 810
        assert_eq!(params.max_divisions(Dimensions::new(300, 300)), 3);
    }

    #[test]
    fn level_dimensions_round_down() {
        let params = FusionParams::default();
        let base = Dimensions::new(333, 250);
        assert_eq!(params.level_dimensions(base, 0), base);
        assert_eq!(params.level_dimensions(base, 1), Dimensions::new(166, 125));
        assert_eq!(params.level_dimensions(base, 2), Dimensions::new(83, 62));
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        assert!(FusionParams::default().validate().is_ok());
        assert!(FusionParams::default().with_shrink_factor(1).validate().is_err());
        assert!(FusionParams::default().with_min_dimension(1).validate().is_err());
        assert!(FusionParams::default().with_max_value(0).validate().is_err());
    }
}
