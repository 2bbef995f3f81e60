//! # FocusFuse Library
//!
//! The `focusfuse` library merges a focus stack (aligned grayscale exposures of
//! one scene, each sharp over a different depth range) into a single image
//! that is sharp everywhere. Fusion happens in a Laplacian pyramid domain:
//! at every scale and position the stack member with the strongest local
//! detail wins.
//!
//! The library performs no file I/O; callers hand it decoded [`Photo`]s.
//!
//! ## Overview of Modules
//!
//! - **`focus_stack`**: Orchestrates the pipeline with [`FocusStackFuser`]:
//!   stack validation, per-member decomposition, fusion and reconstruction.
//!
//! - **`pixel_grid`**: Defines [`PixelGrid`], a row-major 2D grid that carries its
//!   dimensions and checks compatibility on every pixelwise operation.
//!
//! - **`photo`**: Defines [`Photo`], an 8-bit grayscale grid with a declared
//!   maximum intensity.
//!
//! - **`resample`**: Bilinear resizing with align-corners coordinate mapping,
//!   for both 8-bit and signed detail grids.
//!
//! - **`params`**: [`FusionParams`], the shrink factor, minimum level size and
//!   output range, plus the pyramid depth rule.
//!
//! - **`pyramid`**: Resolution pyramids and their smoothed approximations.
//!
//! - **`laplacian`**: Detail (Laplacian) extraction per level.
//!
//! - **`fusion`**: Max-magnitude detail selection across the stack and the
//!   averaged base level.
//!
//! - **`reconstruct`**: Collapses the fused pyramid back to full resolution.
//!
//! - **`error`**: [`FusionError`], separating invalid input from internal
//!   invariant violations.
//!
//! ## Example
//!
//! ```
//! use focusfuse::{FocusStackFuser, FusionParams, Photo};
//!
//! let near = Photo::from_raw(4, 4, vec![10; 16]).unwrap();
//! let far = Photo::from_raw(4, 4, vec![20; 16]).unwrap();
//!
//! let fuser = FocusStackFuser::new(FusionParams::default()).unwrap();
//! let fused = fuser.fuse(&[near, far]).unwrap();
//! assert_eq!(fused.get(0, 0), 15);
//! ```

pub mod error;
pub mod focus_stack;
pub mod fusion;
pub mod laplacian;
pub mod params;
pub mod photo;
pub mod pixel_grid;
pub mod pyramid;
pub mod reconstruct;
pub mod resample;

pub use crate::error::{FusionError, GridOp, Result};
pub use crate::focus_stack::{fuse_stack, FocusStackFuser, MemberDecomposition, MIN_STACK_SIZE};
pub use crate::params::FusionParams;
pub use crate::photo::Photo;
pub use crate::pixel_grid::{DetailImage, Dimensions, PixelGrid};
pub use crate::pyramid::{DetailPyramid, Pyramid, ResolutionPyramid};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
