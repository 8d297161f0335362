//! Per-call extraction parameters.

use serde::{Deserialize, Serialize};

use crate::mesh::types::Vec3;

/// Parameters shared by the four marching-squares extraction modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    /// World-space translation added after scaling.
    pub origin: Vec3,

    /// Iso level. Corners with `sample >= threshold` count as inside.
    pub threshold: f32,

    /// World-space extent of the whole grid along each axis.
    pub size: f32,

    /// Emit a full quad for cells with all four corners inside.
    /// Off by default: such cells carry no boundary.
    pub fill_solid_cells: bool,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            threshold: 0.5,
            size: 1.0,
            fill_solid_cells: false,
        }
    }
}

impl ContourParams {
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn with_solid_fill(mut self, fill: bool) -> Self {
        self.fill_solid_cells = fill;
        self
    }
}

/// How a dual-contouring cell vertex is placed from its Hermite data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexSolver {
    /// Damped mass-point relaxation toward the crossing planes.
    #[default]
    MassPoint,

    /// 3×3 normal-equation solve, regularized toward the mass point.
    LeastSquares,
}

/// Parameters for [`VolumeDualContourExtractor::extract`](crate::mesh::VolumeDualContourExtractor::extract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualContourParams {
    /// World-space translation added after scaling.
    pub origin: Vec3,

    /// World-space extent of the whole grid along each axis.
    pub size: f32,

    /// Surface level. Samples with `value >= iso_value` are on the positive side.
    pub iso_value: f32,

    /// Relaxation iteration cap.
    pub max_iterations: usize,

    /// Relaxation stops once the force magnitude drops below this.
    pub convergence_threshold: f32,

    pub solver: VertexSolver,
}

impl Default for DualContourParams {
    fn default() -> Self {
        Self {
            origin: Vec3::zeros(),
            size: 1.0,
            iso_value: 0.0,
            max_iterations: 50,
            convergence_threshold: 1e-5,
            solver: VertexSolver::MassPoint,
        }
    }
}

impl DualContourParams {
    #[must_use]
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn with_iso_value(mut self, iso_value: f32) -> Self {
        self.iso_value = iso_value;
        self
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    #[must_use]
    pub const fn with_convergence_threshold(mut self, threshold: f32) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_solver(mut self, solver: VertexSolver) -> Self {
        self.solver = solver;
        self
    }
}
