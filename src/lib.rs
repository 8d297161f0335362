//! Contour extraction from scalar fields sampled on regular grids.
//!
//! Two extractors, both borrowing a caller-owned sample buffer:
//!
//! - [`PlanarContourExtractor`]: marching squares over a 2D grid, producing
//!   filled triangles or isoline segments, with midpoint or interpolated
//!   edge crossings.
//! - [`VolumeDualContourExtractor`]: dual contouring over a 3D grid, one
//!   vertex per cell placed from edge crossings and gradient estimates,
//!   stitched into quads.
//!
//! # Example
//!
//! ```
//! use isocontour::{ContourParams, PlanarContourExtractor, ScalarGrid2};
//!
//! let grid = ScalarGrid2::from_fn(8, |x, y| {
//!     let (dx, dy) = (x as f32 - 4.0, y as f32 - 4.0);
//!     9.0 - dx * dx - dy * dy
//! })?;
//!
//! let ms = PlanarContourExtractor::setup(8, &grid)?;
//! let params = ContourParams::default().with_threshold(0.0).with_size(2.0);
//! let lines = ms.extract_lines_interpolated(&params);
//! assert!(!lines.is_empty());
//! # Ok::<(), isocontour::ContourError>(())
//! ```
//!
//! Extraction is single-threaded and allocates only its output. Setup
//! validates the grid size once; extraction cannot fail afterwards.

pub mod error;
pub mod mesh;

pub use error::{ContourError, ContourResult};
pub use mesh::{
    ContourMesh, ContourParams, DualContourParams, Grid2, Grid3, PlanarContourExtractor, Pt3,
    QuadMesh, ScalarGrid2, ScalarGrid3, Segment, Vec3, VertexSolver, VolumeDualContourExtractor,
};
