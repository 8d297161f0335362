pub mod dual_contouring;
pub mod grid_trait;
pub mod hermite;
pub mod marching_squares;
pub mod params;
pub mod scalar_grid;
pub mod sdf;
pub mod square_cases;
pub mod types;

// Re-export commonly used items
pub use dual_contouring::VolumeDualContourExtractor;
pub use grid_trait::{Grid2, Grid3};
pub use hermite::HermiteData;
pub use marching_squares::{crossing_fraction, PlanarContourExtractor};
pub use params::{ContourParams, DualContourParams, VertexSolver};
pub use scalar_grid::{ScalarGrid2, ScalarGrid3};
pub use types::{ContourMesh, Pt3, QuadMesh, Segment, Vec3};
