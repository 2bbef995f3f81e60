use crate::error::{FusionError, GridOp, Result};

/// Width and height of a grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of samples a grid of these dimensions holds.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangular grid of samples indexed by (x, y).
///
/// Samples are stored row by row in a single vector, so the grid always holds
/// exactly `width * height` values. Two grids are *compatible* when their
/// widths and heights are equal; every pixelwise binary operation checks this
/// and returns [`FusionError::IncompatibleGrids`] instead of truncating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid<T> {
    /// Row-major sample storage of length `width * height`.
    data: Vec<T>,

    /// Number of samples in each row.
    width: usize,

    /// Number of rows.
    height: usize,
}

/// Signed residual produced by subtracting two 8-bit grids.
pub type DetailImage = PixelGrid<i32>;

impl<T: Copy> PixelGrid<T> {
    /// Creates a `width` × `height` grid with every sample set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            data: vec![fill; width * height],
            width,
            height,
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Parameters
    /// - `width`, `height`: The grid dimensions.
    /// - `data`: Samples laid out row by row.
    ///
    /// # Returns
    /// [`FusionError::BufferLength`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let dimensions = Dimensions::new(width, height);
        if data.len() != dimensions.area() {
            return Err(FusionError::BufferLength {
                dimensions,
                len: data.len(),
                expected: dimensions.area(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` at every position, row by row.
    ///
    /// This is the shape every per-pixel stage takes: an output sample depends
    /// only on same-position (or interpolated) inputs.
    pub fn from_fn(dimensions: Dimensions, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dimensions.area());
        for y in 0..dimensions.height {
            for x in 0..dimensions.width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Returns the sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[x + y * self.width]
    }

    /// All samples in row-major order.
    pub fn pixels(&self) -> &[T] {
        &self.data
    }

    /// Iterates the grid row by row. Yields nothing for an empty grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// `true` if both grids have the same width and height.
    pub fn is_compatible<U>(&self, other: &PixelGrid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fails with [`FusionError::IncompatibleGrids`] unless the two grids are compatible.
    pub fn ensure_compatible<U>(&self, other: &PixelGrid<U>, op: GridOp) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(FusionError::IncompatibleGrids {
                op,
                left: self.dimensions(),
                right: Dimensions::new(other.width, other.height),
            })
        }
    }

    /// Applies `f` to every sample, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> PixelGrid<U> {
        PixelGrid {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Combines two compatible grids sample by sample.
    pub fn zip_map<U: Copy, V>(
        &self,
        other: &PixelGrid<U>,
        op: GridOp,
        f: impl Fn(T, U) -> V,
    ) -> Result<PixelGrid<V>> {
        self.ensure_compatible(other, op)?;
        Ok(PixelGrid {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
        })
    }
}

impl<T: Copy + Into<i32>> PixelGrid<T> {
    /// Signed difference `self - other`, widening both operands first.
    pub fn subtract(&self, other: &PixelGrid<T>) -> Result<DetailImage> {
        self.zip_map(other, GridOp::Subtract, |a, b| {
            let (a, b): (i32, i32) = (a.into(), b.into());
            a - b
        })
    }

    /// Widens every sample to a signed detail value.
    pub fn to_detail(&self) -> DetailImage {
        self.map(Into::into)
    }
}

impl DetailImage {
    /// Pixelwise sum of two compatible detail grids.
    pub fn add(&self, other: &DetailImage) -> Result<DetailImage> {
        self.zip_map(other, GridOp::Add, |a, b| a + b)
    }
}
