//! Marching squares over a 2D sample grid.
//!
//! Each 2×2 block of samples is classified into one of 16 cases against a
//! threshold and replaced by a fixed local template (see [`square_cases`]).
//! Binary modes place edge crossings at edge midpoints; interpolated modes
//! place them where the linear interpolant of the two edge samples meets the
//! threshold.
//!
//! Vertices are not shared between cells.
//!
//! [`square_cases`]: crate::mesh::square_cases

use tracing::debug;

use crate::error::{check_dims, ContourResult};
use crate::mesh::grid_trait::Grid2;
use crate::mesh::params::ContourParams;
use crate::mesh::scalar_grid::ScalarGrid2;
use crate::mesh::square_cases::{
    case_index, CellPoint, FillTemplate, FILL_CASES, SEGMENT_CASES, SOLID_CELL,
};
use crate::mesh::types::{ContourMesh, Pt3, Segment};

/// Where edge crossings sit along a cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Midpoint,
    Interpolated,
}

/// Fraction along an edge where the linear interpolant between `v1` (at 0)
/// and `v2` (at 1) reaches `threshold`.
///
/// Equal endpoint values have no unique crossing; the midpoint is returned.
pub fn crossing_fraction(threshold: f32, v1: f32, v2: f32) -> f32 {
    let delta = v2 - v1;
    if delta == 0.0 {
        return 0.5;
    }
    (threshold - v1) / delta
}

/// Corner samples of one cell.
#[derive(Debug, Clone, Copy)]
struct Cell {
    bl: f32,
    br: f32,
    tr: f32,
    tl: f32,
}

impl Cell {
    fn case(&self, threshold: f32) -> usize {
        case_index(
            self.bl >= threshold,
            self.br >= threshold,
            self.tr >= threshold,
            self.tl >= threshold,
        )
    }

    /// Position of `point` inside the unit cell.
    fn local_position(&self, point: CellPoint, threshold: f32, placement: Placement) -> (f32, f32) {
        let t = |v1: f32, v2: f32| match placement {
            Placement::Midpoint => 0.5,
            Placement::Interpolated => crossing_fraction(threshold, v1, v2),
        };

        match point {
            CellPoint::BottomLeft => (0.0, 0.0),
            CellPoint::BottomRight => (1.0, 0.0),
            CellPoint::TopRight => (1.0, 1.0),
            CellPoint::TopLeft => (0.0, 1.0),
            CellPoint::Bottom => (t(self.bl, self.br), 0.0),
            CellPoint::Right => (1.0, t(self.br, self.tr)),
            CellPoint::Top => (t(self.tl, self.tr), 1.0),
            CellPoint::Left => (0.0, t(self.bl, self.tl)),
        }
    }
}

/// Extracts filled regions or isolines from a borrowed 2D grid.
///
/// Built by [`setup`](Self::setup), which checks that the grid holds
/// `resolution + 1` samples per axis. The grid is never modified.
#[derive(Debug)]
pub struct PlanarContourExtractor<'a, G: Grid2 + ?Sized = ScalarGrid2> {
    resolution: usize,
    grid: &'a G,
}

impl<'a, G: Grid2 + ?Sized> PlanarContourExtractor<'a, G> {
    /// Binds a grid for extraction.
    ///
    /// # Errors
    ///
    /// `ZeroResolution` or `DimensionMismatch` if the grid isn't
    /// `(resolution + 1)²` samples, `SampleOverflow` if that count doesn't fit.
    pub fn setup(resolution: usize, grid: &'a G) -> ContourResult<Self> {
        check_dims(resolution, &grid.dims())?;
        Ok(Self { resolution, grid })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The bound sample grid.
    pub fn grid(&self) -> &'a G {
        self.grid
    }

    /// Filled region where `sample >= threshold`, crossings at edge midpoints.
    pub fn extract_filled_binary(&self, params: &ContourParams) -> ContourMesh {
        self.extract_filled(params, Placement::Midpoint)
    }

    /// Filled region where `sample >= threshold`, crossings interpolated.
    pub fn extract_filled_interpolated(&self, params: &ContourParams) -> ContourMesh {
        self.extract_filled(params, Placement::Interpolated)
    }

    /// Isoline segments with crossings at edge midpoints.
    pub fn extract_lines_binary(&self, params: &ContourParams) -> Vec<Segment> {
        self.extract_lines(params, Placement::Midpoint)
    }

    /// Isoline segments with interpolated crossings.
    pub fn extract_lines_interpolated(&self, params: &ContourParams) -> Vec<Segment> {
        self.extract_lines(params, Placement::Interpolated)
    }

    fn cell(&self, x: usize, y: usize) -> Cell {
        Cell {
            bl: self.grid.get(x, y),
            br: self.grid.get(x + 1, y),
            tr: self.grid.get(x + 1, y + 1),
            tl: self.grid.get(x, y + 1),
        }
    }

    /// Maps a cell-local point to world space.
    fn to_world(&self, local: (f32, f32), x: usize, y: usize, params: &ContourParams) -> Pt3 {
        let scale = params.size / self.resolution as f32;
        Pt3::new(
            (local.0 + x as f32) * scale + params.origin.x,
            (local.1 + y as f32) * scale + params.origin.y,
            params.origin.z,
        )
    }

    fn extract_filled(&self, params: &ContourParams, placement: Placement) -> ContourMesh {
        let mut mesh = ContourMesh::default();
        let threshold = params.threshold;

        for x in 0..self.resolution {
            for y in 0..self.resolution {
                let cell = self.cell(x, y);
                let case = cell.case(threshold);

                let template: &FillTemplate = if case == 15 && params.fill_solid_cells {
                    &SOLID_CELL
                } else {
                    &FILL_CASES[case]
                };

                if template.triangles.is_empty() {
                    continue;
                }

                let start = mesh.vertices.len() as u32;
                for &point in template.points {
                    let local = cell.local_position(point, threshold, placement);
                    mesh.vertices.push(self.to_world(local, x, y, params));
                }
                mesh.indices.extend(template.triangles.iter().map(|&i| start + i));
            }
        }

        debug!(
            resolution = self.resolution,
            ?placement,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Extracted filled contour"
        );

        mesh
    }

    fn extract_lines(&self, params: &ContourParams, placement: Placement) -> Vec<Segment> {
        let mut segments = Vec::new();
        let threshold = params.threshold;

        for x in 0..self.resolution {
            for y in 0..self.resolution {
                let cell = self.cell(x, y);

                for &(a, b) in SEGMENT_CASES[cell.case(threshold)] {
                    let start = cell.local_position(a, threshold, placement);
                    let end = cell.local_position(b, threshold, placement);
                    segments.push(Segment::new(
                        self.to_world(start, x, y, params),
                        self.to_world(end, x, y, params),
                    ));
                }
            }
        }

        debug!(
            resolution = self.resolution,
            ?placement,
            segments = segments.len(),
            "Extracted isolines"
        );

        segments
    }
}
